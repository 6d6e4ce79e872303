//! # Adapters Layer (Outer Hexagon)
//!
//! Implementations of the outbound ports. The in-memory store and the
//! memory audit sink back tests and local tooling; a ledger host provides
//! its own store.

pub mod audit;
pub mod identity;
pub mod memory_store;

pub use audit::*;
pub use identity::*;
pub use memory_store::*;
