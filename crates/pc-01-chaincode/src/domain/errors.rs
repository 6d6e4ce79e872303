//! # Error Types
//!
//! All error types for chaincode invocation.

use shared_types::CodecError;
use thiserror::Error;

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from the host-provided key/value store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused a write.
    #[error("write rejected for key {key}: {reason}")]
    WriteRejected {
        /// Key being written.
        key: String,
        /// Host-supplied reason.
        reason: String,
    },

    /// An adapter lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

// =============================================================================
// CHAINCODE ERRORS
// =============================================================================

/// Errors returned to the host as the invocation's failure result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChaincodeError {
    /// The deployment record is absent. Fatal: nothing can run without it.
    #[error("FATAL: no global setting found at key {key}")]
    MissingState {
        /// Key that was read.
        key: String,
    },

    /// Persisted bytes could not be parsed.
    #[error("FATAL: stored record could not be decoded: {0}")]
    DecodeError(String),

    /// Save-back or status mutation attempted before any successful load.
    #[error("FATAL: invalid cache")]
    InvalidCache,

    /// Caller lacks the privilege the function group requires.
    #[error("no privilege: {principal} may not call {function}")]
    PermissionDenied {
        /// Attempted function.
        function: String,
        /// Resolved caller.
        principal: String,
    },

    /// The 4-byte prefix names no known function group.
    #[error("unknown function group: {0:?}")]
    UnknownGroup(String),

    /// The function name is shorter than the group prefix.
    #[error("function name {name:?} shorter than the {min}-byte group prefix")]
    FunctionNameTooShort {
        /// Offending name.
        name: String,
        /// Required prefix length.
        min: usize,
    },

    /// The group exists but nothing is routed for this name.
    #[error("function group not exist or invokable: {0}")]
    UnroutableFunction(String),

    /// The caller identity could not be resolved from the context.
    #[error("identity resolution failed: {0}")]
    Identity(String),

    /// Host store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A status mutation would break `0 <= unassigned <= total`.
    #[error("supply invariant violated: unassigned {unassigned} outside 0..={total}")]
    SupplyInvariant {
        /// Resulting total supply.
        total: i64,
        /// Resulting unassigned supply.
        unassigned: i64,
    },

    /// A record could not be encoded for storage.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Handler arguments are malformed.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The caller has not registered a public key yet.
    #[error("user {0} has no registered public key")]
    UnregisteredKey(String),

    /// A signed payload did not verify.
    #[error("signature rejected: {0}")]
    BadSignature(String),

    /// Caller balance too low for the transfer.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested.
        required: u64,
        /// Caller balance.
        available: u64,
    },

    /// The same signed fund message was submitted twice in a row.
    #[error("replayed transaction for user {0}")]
    ReplayedNonce(String),

    /// Queried user has no record.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A registered key must derive the caller's own address.
    #[error("public key does not belong to caller {0}")]
    AddressMismatch(String),
}

impl ChaincodeError {
    /// Returns true for errors that mean the contract process cannot operate.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingState { .. } | Self::DecodeError(_) | Self::InvalidCache
        )
    }
}

impl From<CodecError> for ChaincodeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encode(msg) => Self::Encode(msg),
            CodecError::Decode(msg) => Self::DecodeError(msg),
            CodecError::Hex(msg) => Self::InvalidArguments(msg),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChaincodeError::MissingState {
            key: "global_setting".to_string(),
        };
        assert_eq!(err.to_string(), "FATAL: no global setting found at key global_setting");

        let err = ChaincodeError::PermissionDenied {
            function: "ADMN_MINT".to_string(),
            principal: "bob".to_string(),
        };
        assert_eq!(err.to_string(), "no privilege: bob may not call ADMN_MINT");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ChaincodeError::InvalidCache.is_fatal());
        assert!(ChaincodeError::DecodeError("x".into()).is_fatal());
        assert!(!ChaincodeError::UnroutableFunction("USER_X".into()).is_fatal());
        assert!(!ChaincodeError::PermissionDenied {
            function: "f".into(),
            principal: "p".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ChaincodeError = StoreError::Unavailable("down".into()).into();
        assert!(matches!(err, ChaincodeError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: ChaincodeError = CodecError::Decode("bad".into()).into();
        assert_eq!(err, ChaincodeError::DecodeError("bad".into()));

        let err: ChaincodeError = CodecError::Hex("odd length".into()).into();
        assert!(matches!(err, ChaincodeError::InvalidArguments(_)));
    }
}
