//! # Service Layer
//!
//! - `config`: endpoint and chaincode settings
//! - `rpc`: the fire client and the command facade

pub mod config;
pub mod rpc;

pub use config::ClientConfig;
pub use rpc::{RpcFireClient, RpcManager};
