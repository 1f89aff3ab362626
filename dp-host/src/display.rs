//! Screen geometry from DRM connectors
//!
//! Reads `/sys/class/drm/cardN-<connector>/{status,modes}`. The first mode
//! listed for a connector is its preferred mode.

use std::fs;
use std::path::Path;

use dp_core::{ScreenGeometry, Signal};
use dp_error::{DevprintError, Result};
use tracing::debug;

use crate::constants;

/// Preferred mode of the first connected connector, by connector name order
pub fn read_primary_mode(drm_path: &Path) -> Result<(u32, u32)> {
    let entries = fs::read_dir(drm_path).map_err(|e| {
        DevprintError::unavailable(
            Signal::Screen.name(),
            format!("cannot read {}: {}", drm_path.display(), e),
        )
    })?;

    // Directory order is not stable; sort so the same display wins every time
    let mut connectors: Vec<_> = entries
        .flatten()
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with("card") && name.contains('-')
        })
        .map(|e| e.path())
        .collect();
    connectors.sort();

    for connector in connectors {
        let status = fs::read_to_string(connector.join("status")).unwrap_or_default();
        if status.trim() != "connected" {
            continue;
        }
        let modes = fs::read_to_string(connector.join("modes")).unwrap_or_default();
        if let Some(mode) = modes.lines().next().and_then(parse_mode) {
            debug!(connector = %connector.display(), width = mode.0, height = mode.1, "Found display mode");
            return Ok(mode);
        }
    }

    Err(DevprintError::unavailable(Signal::Screen.name(), "no connected display"))
}

/// Parse a DRM mode line such as `1920x1080` or `1920x1080i`
pub fn parse_mode(line: &str) -> Option<(u32, u32)> {
    let (w, h) = line.trim().split_once('x')?;
    let h: String = h.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Build the screen signal from a DRM mode and an optional scale factor
pub fn geometry_from_mode((width, height): (u32, u32), scale: Option<f64>) -> ScreenGeometry {
    ScreenGeometry {
        width: Some(width),
        height: Some(height),
        avail_width: Some(width),
        avail_height: Some(height),
        color_depth: Some(constants::DEFAULT_COLOR_DEPTH),
        device_pixel_ratio: scale,
    }
}

/// Parse a toolkit scale factor, ignoring nonsense values
pub fn parse_scale(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite() && *s > 0.0)
}
