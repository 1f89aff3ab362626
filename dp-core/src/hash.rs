//! Shift-and-add FNV-1a hashing of the canonical fingerprint
//!
//! The fingerprint is hashed four times, each over a differently affixed copy
//! of the same string. The four words are correlated; the extra passes only
//! widen the identifier space beyond a single 32-bit value.

use crate::collector::FingerprintString;
use crate::constants::{hash as hash_const, identifier};

/// Unsigned 32-bit hash output
pub type HashWord = u32;

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
///
/// The multiply by the FNV prime is expressed as
/// `h + (h<<1) + (h<<4) + (h<<7) + (h<<8) + (h<<24)`, which is the same value
/// modulo 2^32. Total over all inputs; the empty string yields the offset basis.
pub fn fnv1a_32(input: &str) -> HashWord {
    input.encode_utf16().fold(hash_const::FNV_OFFSET_BASIS, |h, unit| {
        let h = h ^ HashWord::from(unit);
        h.wrapping_add(h << 1)
            .wrapping_add(h << 4)
            .wrapping_add(h << 7)
            .wrapping_add(h << 8)
            .wrapping_add(h << 24)
    })
}

/// The four input transforms, in identifier word order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashPass {
    /// `fp`
    Plain,
    /// `"::salt::" + fp`
    Salted,
    /// `fp + "::v2"`
    Versioned,
    /// `"prefix-" + fp`
    Prefixed,
}

impl HashPass {
    pub const ALL: [HashPass; identifier::WORD_COUNT] = [
        HashPass::Plain,
        HashPass::Salted,
        HashPass::Versioned,
        HashPass::Prefixed,
    ];

    /// Build the string this pass hashes
    pub fn apply(self, fingerprint: &str) -> String {
        match self {
            HashPass::Plain => fingerprint.to_string(),
            HashPass::Salted => format!("{}{}", hash_const::SALT_PREFIX, fingerprint),
            HashPass::Versioned => format!("{}{}", fingerprint, hash_const::VERSION_SUFFIX),
            HashPass::Prefixed => format!("{}{}", hash_const::PASS_PREFIX, fingerprint),
        }
    }

    pub fn hash(self, fingerprint: &str) -> HashWord {
        fnv1a_32(&self.apply(fingerprint))
    }
}

/// Hash a canonical fingerprint into four words
pub fn hash_fingerprint(fingerprint: &FingerprintString) -> [HashWord; identifier::WORD_COUNT] {
    HashPass::ALL.map(|pass| pass.hash(fingerprint.as_str()))
}
