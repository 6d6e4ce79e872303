//! Client to chaincode integration.

pub mod flows;
pub mod loopback;

pub use loopback::LoopbackLedger;
