//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the chaincode depends on. The host runtime (or a test)
//! supplies the implementations:
//! - the key/value store backing ledger state
//! - caller identity resolution
//! - the audit trail for privilege denials

use crate::domain::entities::{AuditRecord, CallerIdentity, InvocationContext};
use crate::domain::errors::{ChaincodeError, StoreError};
use shared_types::SecurityBootstrap;

// =============================================================================
// KEY/VALUE STORE (host-provided)
// =============================================================================

/// Ledger state as exposed by the host for the current invocation.
///
/// Calls are synchronous; the host serializes reads and writes within one
/// invocation. Writes of an invocation that returns an error must be
/// discarded by the host: a handler may issue several `put`s and the
/// chaincode does not undo the ones that succeeded before a failure.
pub trait KeyValueStore: Send + Sync {
    /// Read a key.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - If the key exists
    /// * `None` - If the key was never written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a key, replacing any previous value.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

// =============================================================================
// IDENTITY RESOLUTION
// =============================================================================

/// Resolves the caller's privilege and region from the invocation context.
///
/// `bootstrap` carries the security fields of the loaded global settings
/// record.
pub trait IdentityResolver: Send + Sync {
    /// Resolve the caller.
    fn resolve(
        &self,
        ctx: &InvocationContext,
        bootstrap: &SecurityBootstrap,
    ) -> Result<CallerIdentity, ChaincodeError>;
}

// =============================================================================
// AUDIT TRAIL
// =============================================================================

/// Receives one record per privilege denial.
pub trait AuditSink: Send + Sync {
    /// Record a denial. Must not fail the invocation.
    fn record(&self, record: AuditRecord);
}
