//! # Ports Layer
//!
//! Collaborators of the transaction builder and the fire client.

pub mod outbound;

pub use outbound::*;
