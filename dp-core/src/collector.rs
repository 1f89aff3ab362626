//! Signal collection with per-signal fault isolation
//!
//! Each signal is read inside its own boundary: an adapter error or an
//! adapter panic becomes an empty value for that signal and collection moves
//! on. Nothing raised by a host ever escapes [`SignalCollector::collect`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::debug;

use crate::constants::delimiters;
use crate::signal::{HostEnvironment, Signal};

/// Ordered, delimiter-joined signal values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FingerprintString(String);

impl FingerprintString {
    /// Join already-rendered signal values with the field delimiter
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push_str(delimiters::FIELD);
            }
            out.push_str(part.as_ref());
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FingerprintString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of reading one signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalReading {
    pub signal: Signal,
    /// Rendered value; empty when unavailable
    pub value: String,
    pub available: bool,
}

/// Reads every signal from a host in the fixed order
pub struct SignalCollector<'a> {
    host: &'a dyn HostEnvironment,
}

impl<'a> SignalCollector<'a> {
    pub fn new(host: &'a dyn HostEnvironment) -> Self {
        Self { host }
    }

    /// Read one signal, converting any failure into an empty value
    pub fn read(&self, signal: Signal) -> SignalReading {
        let host = self.host;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| signal.read(host)));

        match outcome {
            Ok(Ok(value)) => SignalReading {
                signal,
                value,
                available: true,
            },
            Ok(Err(e)) => {
                debug!(signal = %signal, error = %e, "Signal unavailable");
                SignalReading::unavailable(signal)
            }
            Err(payload) => {
                debug!(
                    signal = %signal,
                    panic = panic_message(payload.as_ref()),
                    "Signal adapter panicked"
                );
                SignalReading::unavailable(signal)
            }
        }
    }

    /// Per-signal breakdown, in fingerprint order
    pub fn readings(&self) -> Vec<SignalReading> {
        Signal::ORDER.iter().map(|&signal| self.read(signal)).collect()
    }

    /// Build the canonical fingerprint string. Never fails.
    pub fn collect(&self) -> FingerprintString {
        let readings = self.readings();
        let missing = readings.iter().filter(|r| !r.available).count();
        debug!(
            signals = readings.len(),
            unavailable = missing,
            "Collected fingerprint signals"
        );
        FingerprintString::from_parts(readings.into_iter().map(|r| r.value))
    }
}

impl SignalReading {
    fn unavailable(signal: Signal) -> Self {
        Self {
            signal,
            value: String::new(),
            available: false,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ScreenGeometry;
    use crate::snapshot::SignalSnapshot;
    use dp_error::Result;

    /// Snapshot host whose user agent read panics
    struct PanickingHost(SignalSnapshot);

    impl HostEnvironment for PanickingHost {
        fn user_agent(&self) -> Result<String> {
            panic!("user agent adapter crashed")
        }
        fn languages(&self) -> Result<Vec<String>> {
            self.0.languages()
        }
        fn platform(&self) -> Result<String> {
            self.0.platform()
        }
        fn do_not_track(&self) -> Result<Option<String>> {
            self.0.do_not_track()
        }
        fn cookies_enabled(&self) -> Result<Option<bool>> {
            self.0.cookies_enabled()
        }
        fn max_touch_points(&self) -> Result<Option<u32>> {
            self.0.max_touch_points()
        }
        fn hardware_concurrency(&self) -> Result<Option<u32>> {
            self.0.hardware_concurrency()
        }
        fn screen(&self) -> Result<ScreenGeometry> {
            self.0.screen()
        }
        fn timezone_offset_minutes(&self) -> Result<i32> {
            self.0.timezone_offset_minutes()
        }
        fn plugins(&self) -> Result<Option<Vec<crate::signal::PluginInfo>>> {
            self.0.plugins()
        }
        fn render_canvas(&self, scene: &crate::canvas::Scene) -> Result<Vec<u8>> {
            self.0.render_canvas(scene)
        }
        fn gpu(&self) -> Result<Option<crate::signal::GpuDescriptor>> {
            self.0.gpu()
        }
        fn local_storage(&self) -> Result<bool> {
            self.0.local_storage()
        }
        fn session_storage(&self) -> Result<bool> {
            self.0.session_storage()
        }
    }

    #[test]
    fn all_unavailable_yields_only_delimiters() {
        let host = SignalSnapshot::default();
        let fp = SignalCollector::new(&host).collect();
        assert_eq!(fp.as_str(), "||".repeat(13));
    }

    #[test]
    fn readings_follow_fixed_order() {
        let host = SignalSnapshot::default();
        let readings = SignalCollector::new(&host).readings();
        let order: Vec<Signal> = readings.iter().map(|r| r.signal).collect();
        assert_eq!(order, Signal::ORDER.to_vec());
        assert!(readings.iter().all(|r| r.value.is_empty()));
        assert!(!readings[0].available);
    }

    #[test]
    fn failing_signal_does_not_abort_collection() {
        let host = SignalSnapshot {
            platform: Some("Linux x86_64".into()),
            local_storage: Some(true),
            ..Default::default()
        };
        let fp = SignalCollector::new(&host).collect();
        assert_eq!(
            fp.as_str(),
            "||||Linux x86_64||||||||||||||||||||true||"
        );
    }

    #[test]
    fn panicking_adapter_is_contained() {
        let host = PanickingHost(SignalSnapshot {
            user_agent: Some("never read".into()),
            platform: Some("Linux x86_64".into()),
            ..Default::default()
        });
        let collector = SignalCollector::new(&host);

        let ua = collector.read(Signal::UserAgent);
        assert!(!ua.available);
        assert!(ua.value.is_empty());

        let fp = collector.collect();
        assert!(fp.as_str().starts_with("||||Linux x86_64||"));
    }

    #[test]
    fn from_parts_joins_with_field_delimiter() {
        assert_eq!(FingerprintString::from_parts(["a", "", "b"]).as_str(), "a||||b");
        assert!(FingerprintString::from_parts(Vec::<String>::new()).is_empty());
    }
}
