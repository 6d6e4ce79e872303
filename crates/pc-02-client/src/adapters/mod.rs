//! # Adapters Layer
//!
//! - `LocalKeySigner`: signs with a secp256k1 key held in memory
//! - `HexAddressValidator`: 40-hex-digit ledger addresses
//! - `JsonRpcTransport`: JSON-RPC 2.0 over HTTP

pub mod address;
pub mod json_rpc;
pub mod signer;

pub use address::HexAddressValidator;
pub use json_rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JsonRpcTransport};
pub use signer::LocalKeySigner;
