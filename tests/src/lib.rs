//! # Pai-Chain Test Suite
//!
//! Cross-crate flows: the client builds and signs, a loopback transport
//! hands the request to an in-process chaincode over an in-memory store.
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── loopback.rs   # LedgerTransport backed by PaiChaincode
//!     └── flows.rs      # end-to-end scenarios
//! ```
//!
//! ```bash
//! cargo test -p pc-tests
//! ```

pub mod integration;
