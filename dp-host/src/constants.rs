//! Paths and defaults for the native host

/// Path to DRM (Direct Rendering Manager) devices
pub const DRM_PATH: &str = "/sys/class/drm";

/// OS identification file
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Product token placed at the start of the user agent
pub const DEFAULT_PRODUCT: &str = "devprint";

/// Colour depth reported for DRM displays, which do not expose one
pub const DEFAULT_COLOR_DEPTH: u32 = 24;

/// Settings file name inside the devprint config directory
pub const SETTINGS_FILE: &str = "host.json";

/// Config directory name
pub const CONFIG_DIR_NAME: &str = "devprint";

/// Maximum settings file size accepted
pub const MAX_SETTINGS_SIZE: u64 = 64 * 1024;

/// Environment variables consulted by the native host
pub mod env {
    /// Overrides the settings file location
    pub const HOST_CONFIG: &str = "DEVPRINT_HOST_CONFIG";
    /// Colon-separated language priority list
    pub const LANGUAGE: &str = "LANGUAGE";
    /// Locale variables in lookup order
    pub const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];
    /// Console do-not-track convention
    pub const DO_NOT_TRACK: &str = "DO_NOT_TRACK";
    /// Toolkit scale factors in lookup order
    pub const SCALE_VARS: [&str; 2] = ["GDK_SCALE", "QT_SCALE_FACTOR"];
}

/// PCI vendor ids of common GPU vendors
pub mod pci {
    pub const AMD_VENDOR_ID: &str = "0x1002";
    pub const NVIDIA_VENDOR_ID: &str = "0x10de";
    pub const INTEL_VENDOR_ID: &str = "0x8086";

    /// Display name for a PCI vendor id, if known
    pub fn vendor_name(vendor_id: &str) -> Option<&'static str> {
        match vendor_id {
            AMD_VENDOR_ID => Some("AMD"),
            NVIDIA_VENDOR_ID => Some("NVIDIA"),
            INTEL_VENDOR_ID => Some("Intel"),
            _ => None,
        }
    }
}
