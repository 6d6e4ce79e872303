//! # Error Types
//!
//! Errors raised while moving shared records on and off the wire.

use thiserror::Error;

/// Encoding or decoding of a wire record failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A record could not be serialized.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Stored or received bytes could not be parsed.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// A string argument was not valid hex.
    #[error("Invalid hex argument: {0}")]
    Hex(String),
}
