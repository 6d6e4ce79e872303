//! Client configuration.

use crate::domain::entities::DEFAULT_CHAINCODE_ID;
use std::time::Duration;

/// Where and what the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Ledger JSON-RPC endpoint.
    pub endpoint: String,
    /// Target chaincode id.
    pub chaincode_name: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:7050".to_string(),
            chaincode_name: DEFAULT_CHAINCODE_ID.to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `PAI_RPC_ENDPOINT` and `PAI_CHAINCODE_ID`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = lookup("PAI_RPC_ENDPOINT").filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(chaincode) = lookup("PAI_CHAINCODE_ID").filter(|v| !v.is_empty()) {
            config.chaincode_name = chaincode;
        }
        config
    }
}
