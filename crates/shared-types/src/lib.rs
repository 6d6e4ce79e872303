//! # Shared Types Crate
//!
//! Records and messages exchanged between the Pai-Chain chaincode and its
//! clients.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: persisted record layouts and signed message
//!   layouts are defined once, here.
//! - **Binary Wire Format**: everything persisted or signed is bincode; a
//!   signed payload travels as one hex string argument.
//! - **Closed Function Namespace**: function names carry a 4-byte group
//!   prefix, see [`functions`].

pub mod codec;
pub mod entities;
pub mod errors;
pub mod functions;

pub use codec::{decode, encode};
pub use entities::*;
pub use errors::*;
