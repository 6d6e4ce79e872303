//! # Error Types
//!
//! - `TxBuildError`: argument validation and signing
//! - `TransportError`: talking to the ledger
//! - `ClientError`: what a command surfaces

use shared_types::CodecError;
use thiserror::Error;

/// Errors raised while building a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxBuildError {
    /// Wrong number of arguments.
    #[error("expected {expected} arguments, got {got}")]
    ArityError {
        /// Accepted argument count, e.g. `"2 or 3"`.
        expected: &'static str,
        /// Count supplied.
        got: usize,
    },

    /// The recipient is not a valid address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The amount is not a non-negative integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The optional message is over the limit.
    #[error("message is too long: {len} bytes, should not exceed {max}")]
    MessageTooLong {
        /// Message length in bytes.
        len: usize,
        /// Limit in bytes.
        max: usize,
    },

    /// The signer could not produce a signature.
    #[error("signing failed: {0}")]
    SigningError(String),

    /// A command needs the private key and none is loaded.
    #[error("key is not applied")]
    NoKeyConfigured,

    /// The transaction could not be encoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Errors from the ledger transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The ledger answered with a JSON-RPC error.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// The response could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Errors a client command can return.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Building the transaction failed.
    #[error(transparent)]
    Build(#[from] TxBuildError),

    /// Submitting it failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A query result was not valid JSON.
    #[error("invalid query result: {0}")]
    InvalidResult(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TxBuildError::ArityError {
            expected: "2 or 3",
            got: 1,
        };
        assert_eq!(err.to_string(), "expected 2 or 3 arguments, got 1");

        let err = TxBuildError::MessageTooLong { len: 300, max: 256 };
        assert_eq!(
            err.to_string(),
            "message is too long: 300 bytes, should not exceed 256"
        );
    }

    #[test]
    fn test_client_error_is_transparent() {
        let err: ClientError = TxBuildError::NoKeyConfigured.into();
        assert_eq!(err.to_string(), "key is not applied");
    }
}
