//! Signals and the host capability interface
//!
//! A [`Signal`] is one named slot of the fingerprint. The host exposes raw
//! facts through [`HostEnvironment`]; [`Signal::read`] turns those facts into
//! the exact string that enters the canonical fingerprint.
//!
//! # Stability
//!
//! [`Signal::ORDER`] and the normalization rules below are part of the
//! identifier contract. Reordering, adding or removing a signal, or changing
//! how a value is rendered changes every identifier for every device.

use std::fmt;

use dp_error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::{self, Scene, FINGERPRINT_SCENE};
use crate::constants::{defaults, delimiters};

// ============================================================================
// Host Data Types
// ============================================================================

/// Screen geometry as reported by the host
///
/// Absent or zero dimensions render as an empty component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub avail_width: Option<u32>,
    pub avail_height: Option<u32>,
    pub color_depth: Option<u32>,
    pub device_pixel_ratio: Option<f64>,
}

/// An installed plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// GPU identification from the host's graphics context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDescriptor {
    pub vendor: Option<String>,
    pub renderer: Option<String>,
}

// ============================================================================
// Host Capability Interface
// ============================================================================

/// Raw environment facts a host can report.
///
/// Every method may fail with
/// [`DevprintError::SignalUnavailable`](dp_error::DevprintError::SignalUnavailable)
/// (API absent, permission denied, restricted context). Failures never leave
/// the collector; they turn into an empty signal value.
///
/// Methods with a default implementation are secondary properties consulted
/// only when the primary one yields nothing.
#[cfg_attr(test, mockall::automock)]
pub trait HostEnvironment {
    fn user_agent(&self) -> Result<String>;

    /// Preferred languages, most preferred first
    fn languages(&self) -> Result<Vec<String>>;

    /// Single preferred language, used when `languages` is empty
    fn language(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// Legacy single-language property, last in the fallback chain
    fn user_language(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn platform(&self) -> Result<String>;

    fn do_not_track(&self) -> Result<Option<String>>;

    /// Vendor-specific do-not-track property, used when the standard one is empty
    fn legacy_do_not_track(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// `None` when the host has no notion of cookie support
    fn cookies_enabled(&self) -> Result<Option<bool>>;

    fn max_touch_points(&self) -> Result<Option<u32>>;

    /// Logical processor count
    fn hardware_concurrency(&self) -> Result<Option<u32>>;

    fn screen(&self) -> Result<ScreenGeometry>;

    /// Minutes to add to local time to reach UTC (UTC+1 is `-60`)
    fn timezone_offset_minutes(&self) -> Result<i32>;

    /// `None` when the host offers no plugin introspection
    fn plugins(&self) -> Result<Option<Vec<PluginInfo>>>;

    /// Rasterize `scene` onto a new offscreen surface and return its RGBA bytes.
    ///
    /// Implementations must use a fresh surface per call so concurrent
    /// collections never observe each other's drawing.
    fn render_canvas(&self, scene: &Scene) -> Result<Vec<u8>>;

    /// `None` when no GPU context can be created
    fn gpu(&self) -> Result<Option<GpuDescriptor>>;

    fn local_storage(&self) -> Result<bool>;

    fn session_storage(&self) -> Result<bool>;
}

// ============================================================================
// Signals
// ============================================================================

/// One slot of the canonical fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    UserAgent,
    Languages,
    Platform,
    DoNotTrack,
    CookiesEnabled,
    MaxTouchPoints,
    HardwareConcurrency,
    Screen,
    TimezoneOffset,
    Plugins,
    Canvas,
    Gpu,
    LocalStorage,
    SessionStorage,
}

impl Signal {
    /// Fixed fingerprint order
    pub const ORDER: [Signal; 14] = [
        Signal::UserAgent,
        Signal::Languages,
        Signal::Platform,
        Signal::DoNotTrack,
        Signal::CookiesEnabled,
        Signal::MaxTouchPoints,
        Signal::HardwareConcurrency,
        Signal::Screen,
        Signal::TimezoneOffset,
        Signal::Plugins,
        Signal::Canvas,
        Signal::Gpu,
        Signal::LocalStorage,
        Signal::SessionStorage,
    ];

    /// Stable name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            Signal::UserAgent => "user_agent",
            Signal::Languages => "languages",
            Signal::Platform => "platform",
            Signal::DoNotTrack => "do_not_track",
            Signal::CookiesEnabled => "cookies_enabled",
            Signal::MaxTouchPoints => "max_touch_points",
            Signal::HardwareConcurrency => "hardware_concurrency",
            Signal::Screen => "screen",
            Signal::TimezoneOffset => "timezone_offset",
            Signal::Plugins => "plugins",
            Signal::Canvas => "canvas",
            Signal::Gpu => "gpu",
            Signal::LocalStorage => "local_storage",
            Signal::SessionStorage => "session_storage",
        }
    }

    /// Read this signal from `host` and render it as its fingerprint string.
    ///
    /// Errors are the host's; the collector decides what to do with them.
    pub fn read(self, host: &dyn HostEnvironment) -> Result<String> {
        match self {
            Signal::UserAgent => host.user_agent(),
            Signal::Languages => read_languages(host),
            Signal::Platform => host.platform(),
            Signal::DoNotTrack => {
                let chain: [Property<'_>; 2] =
                    [&|| host.do_not_track(), &|| host.legacy_do_not_track()];
                Ok(first_present(self, &chain))
            }
            Signal::CookiesEnabled => Ok(host
                .cookies_enabled()?
                .map(|enabled| enabled.to_string())
                .unwrap_or_default()),
            Signal::MaxTouchPoints => Ok(host
                .max_touch_points()?
                .filter(|&n| n != 0)
                .unwrap_or(defaults::MAX_TOUCH_POINTS)
                .to_string()),
            Signal::HardwareConcurrency => Ok(host
                .hardware_concurrency()?
                .filter(|&n| n != 0)
                .map(|n| n.to_string())
                .unwrap_or_default()),
            Signal::Screen => Ok(render_screen(&host.screen()?)),
            Signal::TimezoneOffset => {
                let offset = host.timezone_offset_minutes()?;
                Ok(if offset == 0 { String::new() } else { offset.to_string() })
            }
            Signal::Plugins => Ok(host
                .plugins()?
                .map(|plugins| render_plugins(&plugins))
                .unwrap_or_default()),
            Signal::Canvas => {
                let pixels = host.render_canvas(&FINGERPRINT_SCENE)?;
                canvas::subsample(&FINGERPRINT_SCENE, &pixels)
            }
            Signal::Gpu => Ok(host
                .gpu()?
                .map(|gpu| {
                    [
                        gpu.vendor.unwrap_or_default(),
                        gpu.renderer.unwrap_or_default(),
                    ]
                    .join(delimiters::GPU)
                })
                .unwrap_or_default()),
            Signal::LocalStorage => host.local_storage().map(|b| b.to_string()),
            Signal::SessionStorage => host.session_storage().map(|b| b.to_string()),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Normalization
// ============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

type Property<'a> = &'a dyn Fn() -> Result<Option<String>>;

/// First non-empty value of a fallback chain. An unavailable property counts
/// as empty; the chain is empty only when every property is.
fn first_present(signal: Signal, chain: &[Property<'_>]) -> String {
    chain
        .iter()
        .find_map(|property| match property() {
            Ok(value) => non_empty(value),
            Err(e) => {
                debug!(signal = %signal, error = %e, "Property unavailable, trying fallback");
                None
            }
        })
        .unwrap_or_default()
}

fn read_languages(host: &dyn HostEnvironment) -> Result<String> {
    let list = || {
        host.languages().map(|languages| {
            Some(languages.join(delimiters::LANGUAGE)).filter(|joined| !joined.is_empty())
        })
    };
    let chain: [Property<'_>; 3] = [&list, &|| host.language(), &|| host.user_language()];
    Ok(first_present(Signal::Languages, &chain))
}

fn render_dimension(value: Option<u32>) -> String {
    value.filter(|&v| v != 0).map(|v| v.to_string()).unwrap_or_default()
}

/// Render a pixel ratio the way a number-to-string host would (`1`, `1.25`).
fn render_ratio(ratio: Option<f64>) -> String {
    let ratio = ratio
        .filter(|r| *r != 0.0 && !r.is_nan())
        .unwrap_or(defaults::DEVICE_PIXEL_RATIO);
    if ratio.is_infinite() {
        return if ratio > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    ratio.to_string()
}

/// Six screen components joined by `x`
pub fn render_screen(screen: &ScreenGeometry) -> String {
    [
        render_dimension(screen.width),
        render_dimension(screen.height),
        render_dimension(screen.avail_width),
        render_dimension(screen.avail_height),
        render_dimension(screen.color_depth),
        render_ratio(screen.device_pixel_ratio),
    ]
    .join(delimiters::SCREEN)
}

/// `name::description` per plugin, pipe-joined
pub fn render_plugins(plugins: &[PluginInfo]) -> String {
    plugins
        .iter()
        .map(|p| {
            format!(
                "{}{}{}",
                p.name.as_deref().unwrap_or_default(),
                delimiters::PLUGIN_FIELD,
                p.description.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(delimiters::PLUGIN)
}
