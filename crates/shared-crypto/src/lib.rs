//! # Shared Crypto - Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Payload digests, address derivation |
//! | `ecdsa` | secp256k1 | Transaction and key-registration signing |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, no RNG needed to sign
//! - Secret key bytes are zeroized when a key pair is dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature, ADDRESS_LEN};
pub use errors::CryptoError;
pub use hashing::{sha256, Sha256Hasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
