//! Native host adapter for devprint
//!
//! Implements [`HostEnvironment`] for an ordinary OS process:
//! - Identity: os-release, compile-time OS/arch, product token from settings
//! - Locale: `LANGUAGE`, `LC_ALL`, `LC_MESSAGES`, `LANG`
//! - Display and GPU: DRM sysfs (`/sys/class/drm`)
//! - Clock: C library zone data
//!
//! Signals a native process has no equivalent for (plugins, 2D canvas, touch
//! points) report absent or unavailable exactly as a restricted browser would.

pub mod constants;
pub mod display;
pub mod gpu;
pub mod locale;
pub mod settings;
pub mod system;

pub use settings::{get_settings_path, load_settings, load_settings_from, HostPaths, HostSettings};

use dp_core::{GpuDescriptor, HostEnvironment, PluginInfo, Scene, ScreenGeometry, Signal};
use dp_error::{DevprintError, Result};
use tracing::warn;

/// Signal source backed by the local machine
#[derive(Debug, Clone, Default)]
pub struct NativeHost {
    settings: HostSettings,
}

impl NativeHost {
    /// Host using the settings file, or defaults if it cannot be loaded
    pub fn new() -> Self {
        let settings = match load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load host settings, using defaults: {}", e);
                HostSettings::default()
            }
        };
        Self { settings }
    }

    pub fn with_settings(settings: HostSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl HostEnvironment for NativeHost {
    fn user_agent(&self) -> Result<String> {
        if let Some(ua) = &self.settings.user_agent {
            return Ok(ua.clone());
        }
        let os_name = system::read_os_name(&self.settings.paths.os_release);
        Ok(system::user_agent(&self.settings.product, &os_name))
    }

    fn languages(&self) -> Result<Vec<String>> {
        Ok(env_var(constants::env::LANGUAGE)
            .map(|raw| locale::parse_language_list(&raw))
            .unwrap_or_default())
    }

    fn language(&self) -> Result<Option<String>> {
        Ok(locale::first_locale(
            constants::env::LOCALE_VARS.iter().map(|name| env_var(name)),
        ))
    }

    fn platform(&self) -> Result<String> {
        Ok(system::platform())
    }

    fn do_not_track(&self) -> Result<Option<String>> {
        Ok(env_var(constants::env::DO_NOT_TRACK).and_then(|raw| system::parse_do_not_track(&raw)))
    }

    fn cookies_enabled(&self) -> Result<Option<bool>> {
        Ok(self.settings.cookies_enabled)
    }

    fn max_touch_points(&self) -> Result<Option<u32>> {
        Ok(None)
    }

    fn hardware_concurrency(&self) -> Result<Option<u32>> {
        std::thread::available_parallelism()
            .map(|n| Some(u32::try_from(n.get()).unwrap_or(u32::MAX)))
            .map_err(|e| DevprintError::unavailable(Signal::HardwareConcurrency.name(), e.to_string()))
    }

    fn screen(&self) -> Result<ScreenGeometry> {
        if let Some(screen) = self.settings.screen {
            return Ok(screen);
        }
        let mode = display::read_primary_mode(&self.settings.paths.drm)?;
        let scale = constants::env::SCALE_VARS
            .iter()
            .find_map(|name| env_var(name).and_then(|raw| display::parse_scale(&raw)));
        Ok(display::geometry_from_mode(mode, scale))
    }

    fn timezone_offset_minutes(&self) -> Result<i32> {
        system::timezone_offset_minutes()
    }

    fn plugins(&self) -> Result<Option<Vec<PluginInfo>>> {
        Ok(None)
    }

    fn render_canvas(&self, _scene: &Scene) -> Result<Vec<u8>> {
        Err(DevprintError::unavailable(
            Signal::Canvas.name(),
            "no 2D rendering context",
        ))
    }

    fn gpu(&self) -> Result<Option<GpuDescriptor>> {
        gpu::read_gpu(&self.settings.paths.drm)
    }

    fn local_storage(&self) -> Result<bool> {
        Ok(system::has_local_storage())
    }

    fn session_storage(&self) -> Result<bool> {
        Ok(system::has_session_storage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_core::{SignalCollector, FINGERPRINT_SCENE};
    use std::fs;
    use tempfile::TempDir;

    fn sandboxed_host(root: &TempDir) -> NativeHost {
        NativeHost::with_settings(HostSettings {
            paths: HostPaths {
                drm: root.path().join("drm"),
                os_release: root.path().join("os-release"),
            },
            ..Default::default()
        })
    }

    #[test]
    fn canvas_is_unavailable() {
        let host = NativeHost::default();
        let err = host.render_canvas(&FINGERPRINT_SCENE).unwrap_err();
        assert!(err.is_signal_unavailable());
    }

    #[test]
    fn settings_override_user_agent_and_screen() {
        let host = NativeHost::with_settings(HostSettings {
            user_agent: Some("Kiosk/1.0".into()),
            screen: Some(ScreenGeometry {
                width: Some(1280),
                height: Some(800),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(host.user_agent().unwrap(), "Kiosk/1.0");
        assert_eq!(Signal::Screen.read(&host).unwrap(), "1280x800xxxx1");
    }

    #[test]
    fn fake_sysfs_feeds_screen_and_gpu() {
        let root = TempDir::new().unwrap();
        let connector = root.path().join("drm/card0-DP-1");
        fs::create_dir_all(&connector).unwrap();
        fs::write(connector.join("status"), "connected\n").unwrap();
        fs::write(connector.join("modes"), "2560x1440\n").unwrap();
        let device = root.path().join("drm/card0/device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("vendor"), "0x10de\n").unwrap();
        fs::write(device.join("device"), "0x2684\n").unwrap();
        fs::write(root.path().join("os-release"), "PRETTY_NAME=\"Test OS 1\"\n").unwrap();

        let host = sandboxed_host(&root);
        let screen = host.screen().unwrap();
        assert_eq!((screen.width, screen.height), (Some(2560), Some(1440)));
        assert_eq!(Signal::Gpu.read(&host).unwrap(), "NVIDIA|NVIDIA 0x2684");
        assert!(host.user_agent().unwrap().starts_with("devprint (Test OS 1; "));
    }

    #[test]
    fn empty_sysfs_still_collects() {
        let root = TempDir::new().unwrap();
        let host = sandboxed_host(&root);
        let readings = SignalCollector::new(&host).readings();

        let by_signal = |s: Signal| readings.iter().find(|r| r.signal == s).unwrap();
        assert!(!by_signal(Signal::Screen).available);
        assert_eq!(by_signal(Signal::Gpu).value, "");
        assert_eq!(by_signal(Signal::Plugins).value, "");
        assert_eq!(by_signal(Signal::MaxTouchPoints).value, "0");
        assert!(!by_signal(Signal::HardwareConcurrency).value.is_empty());
    }
}
