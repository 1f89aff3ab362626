//! Native host settings
//!
//! Optional JSON settings stored in ~/.config/devprint/host.json, or wherever
//! `DEVPRINT_HOST_CONFIG` points. Every field has a default, so a partial file
//! (or no file at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use dp_core::ScreenGeometry;
use dp_error::{DevprintError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;

/// Settings for [`NativeHost`](crate::NativeHost)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Product token at the start of the synthesized user agent
    pub product: String,
    /// Full user agent override
    pub user_agent: Option<String>,
    /// Reported cookie capability; absent by default
    pub cookies_enabled: Option<bool>,
    /// Screen geometry override for headless or remote sessions
    pub screen: Option<ScreenGeometry>,
    pub paths: HostPaths,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            product: constants::DEFAULT_PRODUCT.to_string(),
            user_agent: None,
            cookies_enabled: None,
            screen: None,
            paths: HostPaths::default(),
        }
    }
}

/// Filesystem locations probed by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPaths {
    pub drm: PathBuf,
    pub os_release: PathBuf,
}

impl Default for HostPaths {
    fn default() -> Self {
        Self {
            drm: PathBuf::from(constants::DRM_PATH),
            os_release: PathBuf::from(constants::OS_RELEASE_PATH),
        }
    }
}

impl HostSettings {
    /// Reject values that would corrupt the user agent
    pub fn validate(&self) -> Result<()> {
        if self.product.trim().is_empty() {
            return Err(DevprintError::InvalidConfig {
                field: "product".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.product.contains(['(', ')', ';']) {
            return Err(DevprintError::InvalidConfig {
                field: "product".to_string(),
                reason: format!("'{}' contains user agent punctuation", self.product),
            });
        }
        Ok(())
    }
}

/// Resolve the settings file location
pub fn get_settings_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(constants::env::HOST_CONFIG) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(constants::CONFIG_DIR_NAME).join(constants::SETTINGS_FILE))
        .ok_or_else(|| DevprintError::config("Could not determine config directory"))
}

/// Load settings from the default location
pub fn load_settings() -> Result<HostSettings> {
    let path = get_settings_path()?;
    load_settings_from(&path)
}

/// Load settings from `path`; a missing file yields defaults
pub fn load_settings_from(path: &Path) -> Result<HostSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "No host settings file, using defaults");
        return Ok(HostSettings::default());
    }

    let size = fs::metadata(path)
        .map_err(|e| DevprintError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > constants::MAX_SETTINGS_SIZE {
        return Err(DevprintError::config(format!(
            "Settings file {} is {} bytes (max {})",
            path.display(),
            size,
            constants::MAX_SETTINGS_SIZE
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| DevprintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let settings: HostSettings = serde_json::from_str(&content)?;
    settings.validate()?;

    debug!(path = %path.display(), "Loaded host settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, HostSettings::default());
        assert_eq!(settings.paths.drm, PathBuf::from("/sys/class/drm"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_settings(r#"{ "cookies_enabled": true, "paths": { "drm": "/tmp/drm" } }"#);
        let settings = load_settings_from(file.path()).unwrap();

        assert_eq!(settings.cookies_enabled, Some(true));
        assert_eq!(settings.product, "devprint");
        assert_eq!(settings.paths.drm, PathBuf::from("/tmp/drm"));
        assert_eq!(settings.paths.os_release, PathBuf::from("/etc/os-release"));
    }

    #[test]
    fn screen_override_is_parsed() {
        let file = write_settings(
            r#"{ "screen": { "width": 3840, "height": 2160, "device_pixel_ratio": 2.0 } }"#,
        );
        let settings = load_settings_from(file.path()).unwrap();
        let screen = settings.screen.unwrap();
        assert_eq!(screen.width, Some(3840));
        assert_eq!(screen.avail_width, None);
        assert_eq!(screen.device_pixel_ratio, Some(2.0));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let file = write_settings("{ product: ");
        let err = load_settings_from(file.path()).unwrap_err();
        assert!(matches!(err, DevprintError::JsonParse(_)));
    }

    #[test]
    fn invalid_product_is_rejected() {
        let file = write_settings(r#"{ "product": "evil; token" }"#);
        let err = load_settings_from(file.path()).unwrap_err();
        assert!(matches!(err, DevprintError::InvalidConfig { .. }));

        let blank = HostSettings {
            product: "  ".to_string(),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }
}
