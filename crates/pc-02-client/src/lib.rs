//! # PC-02 Client - Transaction Builder and RPC Fire Client
//!
//! **Subsystem ID:** 2
//!
//! Client side of the Pai-Chain token ledger:
//!
//! ```text
//! CLI args -> TransactionBuilder (validate, sign) -> RpcArguments
//!          -> RpcFireClient (chaincode id + function) -> LedgerTransport
//! ```
//!
//! | Component | Location |
//! |-----------|----------|
//! | Transaction builder | `domain/builder.rs` |
//! | Fire client, command facade | `service/rpc.rs` |
//! | Ports | `ports/outbound.rs` |
//! | Key signer, address check, JSON-RPC | `adapters/` |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{HexAddressValidator, JsonRpcTransport, LocalKeySigner};
    pub use crate::domain::builder::TransactionBuilder;
    pub use crate::domain::entities::{InvocationRequest, DEFAULT_CHAINCODE_ID};
    pub use crate::domain::errors::{ClientError, TransportError, TxBuildError};
    pub use crate::ports::outbound::{AddressValidator, LedgerTransport, TransactionSigner};
    pub use crate::service::{ClientConfig, RpcFireClient, RpcManager};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Client";
