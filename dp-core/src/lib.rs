//! devprint core library
//!
//! Derives a stable, non-cryptographic device identifier from environment
//! signals reported by a host.
//!
//! # Pipeline
//!
//! 1. [`SignalCollector`] reads every [`Signal`] from a [`HostEnvironment`] in a
//!    fixed order, isolating failures, and joins them into a
//!    [`FingerprintString`].
//! 2. [`hash_fingerprint`] runs four FNV-1a passes over affixed copies of that
//!    string.
//! 3. [`encode`] renders the four words as a 32-character hex
//!    [`DeviceIdentifier`].
//!
//! The identifier is heuristic: collisions and spoofing are both possible.
//!
//! # Example
//!
//! ```
//! use dp_core::{device_identifier, SignalSnapshot};
//!
//! let host = SignalSnapshot {
//!     user_agent: Some("TestUA".into()),
//!     ..Default::default()
//! };
//! let id = device_identifier(&host);
//! assert_eq!(id.as_str().len(), 32);
//! ```

pub mod canvas;
pub mod collector;
pub mod constants;
pub mod hash;
pub mod identifier;
pub mod signal;
pub mod snapshot;

pub use canvas::{DrawCommand, Scene, FINGERPRINT_SCENE};
pub use collector::{FingerprintString, SignalCollector, SignalReading};
pub use constants::FINGERPRINT_VERSION;
pub use hash::{fnv1a_32, hash_fingerprint, HashPass, HashWord};
pub use identifier::{encode, is_well_formed, DeviceIdentifier};
pub use signal::{GpuDescriptor, HostEnvironment, PluginInfo, ScreenGeometry, Signal};
pub use snapshot::SignalSnapshot;

pub use dp_error::{DevprintError, Result};

use tracing::info;

/// Run the whole pipeline against `host`. Never fails.
pub fn device_identifier(host: &dyn HostEnvironment) -> DeviceIdentifier {
    let fingerprint = SignalCollector::new(host).collect();
    let id = encode(hash_fingerprint(&fingerprint));
    info!(
        version = FINGERPRINT_VERSION,
        fingerprint_len = fingerprint.as_str().len(),
        "Generated device identifier"
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golden_host() -> SignalSnapshot {
        SignalSnapshot {
            user_agent: Some("TestUA".into()),
            languages: Some(vec!["en-US".into()]),
            screen: Some(ScreenGeometry {
                width: Some(1920),
                height: Some(1080),
                avail_width: Some(1920),
                avail_height: Some(1040),
                color_depth: Some(24),
                device_pixel_ratio: Some(1.0),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn golden_fingerprint_string() {
        let host = golden_host();
        let fp = SignalCollector::new(&host).collect();
        assert_eq!(
            fp.as_str(),
            "TestUA||en-US||||||||||||1920x1080x1920x1040x24x1||||||||||||"
        );
    }

    #[test]
    fn golden_identifier() {
        let id = device_identifier(&golden_host());
        assert_eq!(id.as_str(), "95710e3e8cac5a82b75bbf2a308cf685");
    }

    #[test]
    fn all_unavailable_identifier_is_well_formed() {
        let id = device_identifier(&SignalSnapshot::default());
        assert_eq!(id.as_str(), "a68badc572bd49d183fe1b516cdf6e44");
        assert!(is_well_formed(id.as_str()));
    }
}
