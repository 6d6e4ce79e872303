//! # Client Entities

use serde::{Deserialize, Serialize};

/// Chaincode id of the deployed Pai-Chain token ledger.
pub const DEFAULT_CHAINCODE_ID: &str = "50637ebc88e9c0f2ea9d240784b491c4fde8ebd177a95fbc2f087312111affef1898fea4c267ff1084db244de6c6860f4367b700659d44b7b47fabda27347c23";

/// One call against a deployed chaincode, as submitted to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Target chaincode id.
    pub chaincode: String,
    /// Full function name, e.g. `USER_FUND`.
    pub function: String,
    /// String arguments.
    pub args: Vec<String>,
}
