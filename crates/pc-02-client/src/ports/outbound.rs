//! # Driven Ports (SPI - Outbound)

use crate::domain::entities::InvocationRequest;
use crate::domain::errors::{TransportError, TxBuildError};
use async_trait::async_trait;
use shared_types::SignedPayload;

/// Checks that a string is a well-formed ledger address.
pub trait AddressValidator: Send + Sync {
    /// Returns a human-readable reason when `address` is rejected.
    fn validate(&self, address: &str) -> Result<(), String>;
}

/// Holds the client's private key and signs transaction messages.
pub trait TransactionSigner: Send + Sync {
    /// Compressed public key, or `None` if no key is loaded.
    fn public_key(&self) -> Option<Vec<u8>>;

    /// Sign `message` and wrap it with the public key.
    fn sign(&self, message: Vec<u8>) -> Result<SignedPayload, TxBuildError>;
}

/// Submits invocations and queries to a ledger.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Submit a state-changing invocation; returns the transaction id.
    async fn invoke(&self, request: &InvocationRequest) -> Result<String, TransportError>;

    /// Run a read-only query; returns the raw result bytes.
    async fn query(&self, request: &InvocationRequest) -> Result<Vec<u8>, TransportError>;
}
