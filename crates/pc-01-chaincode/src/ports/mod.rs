//! # Ports Layer
//!
//! - `inbound`: the entry points the host runtime drives
//! - `outbound`: the collaborators the chaincode depends on

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
