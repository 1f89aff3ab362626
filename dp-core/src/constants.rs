//! Constants for the fingerprint wire contract
//!
//! Every value in this module feeds directly into the canonical fingerprint
//! string or the hash passes. Changing any of them changes every identifier
//! ever produced, so a change here must bump `FINGERPRINT_VERSION`.

/// Version of the signal set, ordering and delimiters below
pub const FINGERPRINT_VERSION: u32 = 1;

/// Delimiters used when building the canonical string
pub mod delimiters {
    /// Separates signals in the canonical fingerprint string
    pub const FIELD: &str = "||";
    /// Separates the six screen geometry components
    pub const SCREEN: &str = "x";
    /// Separates preferred languages
    pub const LANGUAGE: &str = ",";
    /// Separates installed plugins
    pub const PLUGIN: &str = "|";
    /// Separates a plugin name from its description
    pub const PLUGIN_FIELD: &str = "::";
    /// Separates GPU vendor and renderer
    pub const GPU: &str = "|";
}

/// Hash engine parameters
pub mod hash {
    /// FNV-1a 32-bit offset basis
    pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
    /// FNV-1a 32-bit prime (applied as shift-and-add)
    pub const FNV_PRIME: u32 = 0x0100_0193;

    /// Prefix of the salted pass
    pub const SALT_PREFIX: &str = "::salt::";
    /// Suffix of the versioned pass
    pub const VERSION_SUFFIX: &str = "::v2";
    /// Prefix of the prefixed pass
    pub const PASS_PREFIX: &str = "prefix-";
}

/// Identifier rendering
pub mod identifier {
    /// Number of 32-bit words in an identifier
    pub const WORD_COUNT: usize = 4;
    /// Hex digits per word
    pub const HEX_DIGITS_PER_WORD: usize = 8;
    /// Total identifier length in characters
    pub const LENGTH: usize = WORD_COUNT * HEX_DIGITS_PER_WORD;
}

/// Rendering sample parameters
pub mod canvas {
    /// Offscreen surface width in pixels
    pub const WIDTH: u32 = 240;
    /// Offscreen surface height in pixels
    pub const HEIGHT: u32 = 60;
    /// Bytes per pixel in the readback buffer (RGBA)
    pub const BYTES_PER_PIXEL: usize = 4;
    /// Every Nth byte of the readback buffer is kept
    pub const SAMPLE_STRIDE: usize = 50;

    pub const FONT: &str = "16px Arial, \"Helvetica Neue\", Helvetica, sans-serif";
    pub const TEXT: &str = "fingerprint-canvas-\u{1F642}-AaBbYyZz123";
    /// Rotation applied around the text, in radians
    pub const TEXT_ROTATION: f64 = 0.02;
}

/// Signal defaults applied during normalization
pub mod defaults {
    /// Touch points reported when the host does not expose the value
    pub const MAX_TOUCH_POINTS: u32 = 0;
    /// Device pixel ratio assumed when the host reports none
    pub const DEVICE_PIXEL_RATIO: f64 = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_length_is_32() {
        assert_eq!(identifier::LENGTH, 32);
    }

    #[test]
    fn field_delimiter_differs_from_inner_delimiters() {
        for inner in [
            delimiters::SCREEN,
            delimiters::LANGUAGE,
            delimiters::PLUGIN,
            delimiters::PLUGIN_FIELD,
            delimiters::GPU,
        ] {
            assert_ne!(inner, delimiters::FIELD);
        }
    }
}
