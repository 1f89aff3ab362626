//! Host backed by a fixed set of recorded signal values
//!
//! Useful when the signals were gathered elsewhere (for example reported by a
//! remote client as JSON) and for deterministic fixtures. A field left as
//! `None` reads as unavailable.

use dp_error::{DevprintError, Result};
use serde::{Deserialize, Serialize};

use crate::canvas::Scene;
use crate::signal::{GpuDescriptor, HostEnvironment, PluginInfo, ScreenGeometry, Signal};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSnapshot {
    pub user_agent: Option<String>,
    pub languages: Option<Vec<String>>,
    pub language: Option<String>,
    pub user_language: Option<String>,
    pub platform: Option<String>,
    pub do_not_track: Option<String>,
    pub legacy_do_not_track: Option<String>,
    pub cookies_enabled: Option<bool>,
    pub max_touch_points: Option<u32>,
    pub hardware_concurrency: Option<u32>,
    pub screen: Option<ScreenGeometry>,
    pub timezone_offset_minutes: Option<i32>,
    pub plugins: Option<Vec<PluginInfo>>,
    /// RGBA readback of the fingerprint scene
    pub canvas_pixels: Option<Vec<u8>>,
    pub gpu: Option<GpuDescriptor>,
    pub local_storage: Option<bool>,
    pub session_storage: Option<bool>,
}

impl SignalSnapshot {
    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn recorded<T: Clone>(value: &Option<T>, signal: Signal) -> Result<T> {
    value
        .clone()
        .ok_or_else(|| DevprintError::unavailable(signal.name(), "not recorded"))
}

impl HostEnvironment for SignalSnapshot {
    fn user_agent(&self) -> Result<String> {
        recorded(&self.user_agent, Signal::UserAgent)
    }

    fn languages(&self) -> Result<Vec<String>> {
        // The secondary properties still get a chance when the list is missing
        Ok(self.languages.clone().unwrap_or_default())
    }

    fn language(&self) -> Result<Option<String>> {
        Ok(self.language.clone())
    }

    fn user_language(&self) -> Result<Option<String>> {
        Ok(self.user_language.clone())
    }

    fn platform(&self) -> Result<String> {
        recorded(&self.platform, Signal::Platform)
    }

    fn do_not_track(&self) -> Result<Option<String>> {
        Ok(self.do_not_track.clone())
    }

    fn legacy_do_not_track(&self) -> Result<Option<String>> {
        Ok(self.legacy_do_not_track.clone())
    }

    fn cookies_enabled(&self) -> Result<Option<bool>> {
        recorded(&self.cookies_enabled, Signal::CookiesEnabled).map(Some)
    }

    fn max_touch_points(&self) -> Result<Option<u32>> {
        recorded(&self.max_touch_points, Signal::MaxTouchPoints).map(Some)
    }

    fn hardware_concurrency(&self) -> Result<Option<u32>> {
        Ok(self.hardware_concurrency)
    }

    fn screen(&self) -> Result<ScreenGeometry> {
        recorded(&self.screen, Signal::Screen)
    }

    fn timezone_offset_minutes(&self) -> Result<i32> {
        recorded(&self.timezone_offset_minutes, Signal::TimezoneOffset)
    }

    fn plugins(&self) -> Result<Option<Vec<PluginInfo>>> {
        Ok(self.plugins.clone())
    }

    fn render_canvas(&self, _scene: &Scene) -> Result<Vec<u8>> {
        recorded(&self.canvas_pixels, Signal::Canvas)
    }

    fn gpu(&self) -> Result<Option<GpuDescriptor>> {
        Ok(self.gpu.clone())
    }

    fn local_storage(&self) -> Result<bool> {
        recorded(&self.local_storage, Signal::LocalStorage)
    }

    fn session_storage(&self) -> Result<bool> {
        recorded(&self.session_storage, Signal::SessionStorage)
    }
}
