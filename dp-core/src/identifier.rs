//! Fixed-width hex rendering of the hash words

use std::fmt;
use std::str::FromStr;

use dp_error::{DevprintError, Result};
use serde::{Deserialize, Serialize};

use crate::constants::identifier;
use crate::hash::HashWord;

/// 32 lowercase hex characters identifying a device.
///
/// Treat as opaque: the word boundaries inside are not part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentifier(String);

impl DeviceIdentifier {
    /// Validate a previously issued identifier
    pub fn parse(s: &str) -> Result<Self> {
        if is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DevprintError::InvalidIdentifier(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceIdentifier {
    type Err = DevprintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeviceIdentifier {
    type Error = DevprintError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DeviceIdentifier> for String {
    fn from(id: DeviceIdentifier) -> Self {
        id.0
    }
}

/// Render each word as 8 zero-padded lowercase hex digits, in order
pub fn encode(words: [HashWord; identifier::WORD_COUNT]) -> DeviceIdentifier {
    let mut out = String::with_capacity(identifier::LENGTH);
    for word in words {
        out.push_str(&format!("{:08x}", word));
    }
    DeviceIdentifier(out)
}

/// Exactly 32 characters, all `[0-9a-f]`
pub fn is_well_formed(s: &str) -> bool {
    s.len() == identifier::LENGTH
        && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_small_words() {
        let id = encode([0, 1, 0xabc, 0xffff_ffff]);
        assert_eq!(id.as_str(), "000000000000000100000abcffffffff");
        assert!(is_well_formed(id.as_str()));
    }

    #[test]
    fn keeps_word_order() {
        let id = encode([0x811c_9dc5, 0x00bd_ca71, 0xf2ae_0b51, 0x06b2_e9ec]);
        assert_eq!(id.to_string(), "811c9dc500bdca71f2ae0b5106b2e9ec");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!(DeviceIdentifier::parse("811C9DC500BDCA71F2AE0B5106B2E9EC").is_err());
        assert!(DeviceIdentifier::parse("811c9dc5").is_err());
        assert!(DeviceIdentifier::parse("811c9dc500bdca71f2ae0b5106b2e9eg").is_err());
        assert!("811c9dc500bdca71f2ae0b5106b2e9ec".parse::<DeviceIdentifier>().is_ok());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = encode([1, 2, 3, 4]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000001000000020000000300000004\"");
        let back: DeviceIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<DeviceIdentifier>("\"nope\"").is_err());
    }
}
