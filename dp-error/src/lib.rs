//! Unified error handling for devprint
//!
//! A single error type shared by the core engine, the host adapters and the
//! facade crate. Signal adapters only ever produce `SignalUnavailable`; the
//! remaining variants belong to settings and identifier parsing.

use std::io;
use std::path::PathBuf;

/// Result type alias using DevprintError
pub type Result<T> = std::result::Result<T, DevprintError>;

/// Unified error type for all devprint operations
#[derive(thiserror::Error, Debug)]
pub enum DevprintError {
    // ============================================================================
    // Signal Adapter Errors
    // ============================================================================
    #[error("Signal {signal} unavailable: {reason}")]
    SignalUnavailable {
        signal: String,
        reason: String,
    },

    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // Identifier Errors
    // ============================================================================
    #[error("Invalid device identifier: {0}")]
    InvalidIdentifier(String),
}

impl DevprintError {
    /// Create a signal-unavailable error for the named signal
    pub fn unavailable(signal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SignalUnavailable {
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from a signal adapter
    pub fn is_signal_unavailable(&self) -> bool {
        matches!(self, Self::SignalUnavailable { .. })
    }
}
