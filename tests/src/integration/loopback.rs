//! In-process ledger for end-to-end tests.
//!
//! Plays the part of the ledger host: checks the chaincode id, stamps a
//! transaction id and the authenticated caller onto the invocation, and
//! maps chaincode errors to JSON-RPC errors the way a peer would.

use async_trait::async_trait;
use pc_01_chaincode::prelude::*;
use pc_02_client::prelude::{InvocationRequest, LedgerTransport, TransportError};
use shared_types::{GlobalSetting, SecurityBootstrap, UserData, GLOBAL_SETTING_KEY};
use std::sync::Arc;
use uuid::Uuid;

/// Error code for chaincode failures.
pub const CHAINCODE_ERROR: i64 = -32000;

/// Error code for an unknown chaincode id.
pub const UNKNOWN_CHAINCODE: i64 = -32601;

/// Chaincode used by the loopback ledger.
pub type TestChaincode = PaiChaincode<BootstrapIdentityResolver, MemoryAuditSink>;

/// A ledger with a single deployed chaincode.
#[derive(Clone)]
pub struct LoopbackLedger {
    chaincode_id: String,
    chaincode: Arc<TestChaincode>,
    store: Arc<InMemoryStore>,
}

impl LoopbackLedger {
    /// Deploy a fresh chaincode under `chaincode_id` with an empty store.
    pub fn new(chaincode_id: impl Into<String>) -> Self {
        Self {
            chaincode_id: chaincode_id.into(),
            chaincode: Arc::new(create_test_service()),
            store: Arc::new(InMemoryStore::new()),
        }
    }

    /// Write the deployment record.
    pub fn deploy(&self, total_supply: i64, admins: &[&str]) {
        let setting = GlobalSetting {
            total_supply,
            unassigned_supply: total_supply,
            security: SecurityBootstrap {
                admin_principals: admins.iter().map(|a| (*a).to_string()).collect(),
                manager_principals: Vec::new(),
                default_region: "global".to_string(),
            },
        };
        let bytes = setting.to_bytes().expect("encode setting");
        self.store.put(GLOBAL_SETTING_KEY, bytes).expect("store setting");
    }

    /// Set a user's balance directly in the store.
    pub fn set_balance(&self, id: &str, balance: u64) {
        let key = UserData::store_key(id);
        let mut user = match self.store.get(&key).expect("read user") {
            Some(bytes) => shared_types::decode(&bytes).expect("decode user"),
            None => UserData::new(id, "global"),
        };
        user.balance = balance;
        let bytes = shared_types::encode(&user).expect("encode user");
        self.store.put(&key, bytes).expect("store user");
    }

    /// The deployed chaincode.
    pub fn chaincode(&self) -> &TestChaincode {
        &self.chaincode
    }

    /// The backing store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// A transport whose invocations are authenticated as `principal`.
    pub fn connect(&self, principal: impl Into<String>) -> LoopbackTransport {
        LoopbackTransport {
            ledger: self.clone(),
            principal: principal.into(),
        }
    }
}

/// Transport for one authenticated caller.
pub struct LoopbackTransport {
    ledger: LoopbackLedger,
    principal: String,
}

impl LoopbackTransport {
    fn context(&self, request: &InvocationRequest) -> Result<InvocationContext, TransportError> {
        if request.chaincode != self.ledger.chaincode_id {
            return Err(TransportError::Rpc {
                code: UNKNOWN_CHAINCODE,
                message: format!("chaincode {} not deployed", request.chaincode),
            });
        }
        Ok(InvocationContext::new(
            self.principal.clone(),
            Uuid::new_v4().to_string(),
        ))
    }
}

fn to_rpc_error(err: ChaincodeError) -> TransportError {
    TransportError::Rpc {
        code: CHAINCODE_ERROR,
        message: err.to_string(),
    }
}

#[async_trait]
impl LedgerTransport for LoopbackTransport {
    async fn invoke(&self, request: &InvocationRequest) -> Result<String, TransportError> {
        let ctx = self.context(request)?;
        self.ledger
            .chaincode
            .invoke(&*self.ledger.store, &ctx, &request.function, &request.args)
            .map_err(to_rpc_error)?;
        Ok(ctx.tx_id)
    }

    async fn query(&self, request: &InvocationRequest) -> Result<Vec<u8>, TransportError> {
        let ctx = self.context(request)?;
        self.ledger
            .chaincode
            .query(&*self.ledger.store, &ctx, &request.function, &request.args)
            .map_err(to_rpc_error)
    }
}
