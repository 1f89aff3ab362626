//! Operating system facts: identity, clock and storage locations

use std::fs;
use std::path::Path;

use dp_core::Signal;
use dp_error::{DevprintError, Result};

/// Human readable OS name from an os-release file.
///
/// Prefers `PRETTY_NAME`, then `NAME`, then the compile-time OS name.
pub fn read_os_name(os_release: &Path) -> String {
    let content = fs::read_to_string(os_release).unwrap_or_default();
    parse_os_release(&content, "PRETTY_NAME")
        .or_else(|| parse_os_release(&content, "NAME"))
        .unwrap_or_else(|| os_display_name().to_string())
}

/// Value of `key` in os-release syntax, quotes removed
pub fn parse_os_release(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        if k.trim() != key {
            return None;
        }
        let v = v.trim().trim_matches('"').trim_matches('\'').trim();
        (!v.is_empty()).then(|| v.to_string())
    })
}

/// Display form of the compile-time OS name
pub fn os_display_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "android" => "Android",
        other => other,
    }
}

/// `Linux x86_64` style platform string
pub fn platform() -> String {
    format!("{} {}", os_display_name(), std::env::consts::ARCH)
}

/// `product (os name; arch)` user agent
pub fn user_agent(product: &str, os_name: &str) -> String {
    format!("{} ({}; {})", product, os_name, std::env::consts::ARCH)
}

/// Interpret a `DO_NOT_TRACK` value: truthy is `"1"`, explicit opt-in is `"0"`
pub fn parse_do_not_track(raw: &str) -> Option<String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "0" | "false" | "no" => Some("0".to_string()),
        _ => Some("1".to_string()),
    }
}

/// Minutes to add to local time to reach UTC, from the C library's zone data
#[cfg(unix)]
pub fn timezone_offset_minutes() -> Result<i32> {
    // SAFETY: time(NULL) has no preconditions; localtime_r only writes into the
    // tm we own and returns null on failure, which is checked.
    let gmtoff = unsafe {
        let now = libc::time(std::ptr::null_mut());
        let mut tm: libc::tm = std::mem::zeroed();
        if libc::localtime_r(&now, &mut tm).is_null() {
            return Err(DevprintError::unavailable(
                Signal::TimezoneOffset.name(),
                "localtime_r failed",
            ));
        }
        tm.tm_gmtoff
    };
    Ok((-(gmtoff / 60)) as i32)
}

#[cfg(not(unix))]
pub fn timezone_offset_minutes() -> Result<i32> {
    Err(DevprintError::unavailable(
        Signal::TimezoneOffset.name(),
        "no zone data on this platform",
    ))
}

/// Persistent per-user storage is available
pub fn has_local_storage() -> bool {
    dirs::data_local_dir().is_some_and(|dir| dir.is_dir())
}

/// Scratch storage for the current session is available
pub fn has_session_storage() -> bool {
    std::env::temp_dir().is_dir()
}
