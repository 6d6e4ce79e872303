//! # RPC Fire Client
//!
//! `RpcFireClient` submits built arguments to one chaincode. `RpcManager`
//! pairs it with a [`TransactionBuilder`] to serve the CLI commands.
//!
//! Transport failures are returned as-is; nothing is retried.

use crate::domain::builder::TransactionBuilder;
use crate::domain::entities::InvocationRequest;
use crate::domain::errors::{ClientError, TransportError};
use crate::ports::outbound::{AddressValidator, LedgerTransport, TransactionSigner};
use shared_types::functions::{QUERY_GLOBAL, QUERY_USER, USER_FUND, USER_REG_PUBLIC_KEY};
use shared_types::RpcArguments;
use tracing::{info, instrument};

/// Submits invocations against a named chaincode.
#[derive(Debug)]
pub struct RpcFireClient<T: LedgerTransport> {
    chaincode_name: String,
    transport: T,
}

impl<T: LedgerTransport> RpcFireClient<T> {
    /// Client for `chaincode_name` over `transport`.
    pub fn new(transport: T, chaincode_name: impl Into<String>) -> Self {
        Self {
            chaincode_name: chaincode_name.into(),
            transport,
        }
    }

    /// Current target chaincode id.
    pub fn chaincode_name(&self) -> &str {
        &self.chaincode_name
    }

    /// Retarget at another chaincode id.
    pub fn set_chaincode_name(&mut self, chaincode_name: impl Into<String>) {
        self.chaincode_name = chaincode_name.into();
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, function: &str, args: Vec<String>) -> InvocationRequest {
        InvocationRequest {
            chaincode: self.chaincode_name.clone(),
            function: function.to_string(),
            args,
        }
    }

    /// Submit `function(args)`; returns the ledger's transaction id.
    #[instrument(skip(self, args), fields(chaincode = %self.chaincode_name))]
    pub async fn fire(&self, function: &str, args: RpcArguments) -> Result<String, TransportError> {
        let request = self.request(function, args.into_inner());
        let tx_id = self.transport.invoke(&request).await?;
        info!(%tx_id, "transaction submitted");
        Ok(tx_id)
    }

    /// Run a read-only query; returns the raw output.
    #[instrument(skip(self, args), fields(chaincode = %self.chaincode_name))]
    pub async fn query(&self, function: &str, args: Vec<String>) -> Result<Vec<u8>, TransportError> {
        let request = self.request(function, args);
        self.transport.query(&request).await
    }
}

/// Command facade behind `pai-cli rpc ...`.
#[derive(Debug)]
pub struct RpcManager<V: AddressValidator, S: TransactionSigner, T: LedgerTransport> {
    builder: TransactionBuilder<V, S>,
    client: RpcFireClient<T>,
}

impl<V, S, T> RpcManager<V, S, T>
where
    V: AddressValidator,
    S: TransactionSigner,
    T: LedgerTransport,
{
    /// Combine a builder and a fire client.
    pub fn new(builder: TransactionBuilder<V, S>, client: RpcFireClient<T>) -> Self {
        Self { builder, client }
    }

    /// The fire client.
    pub fn client(&self) -> &RpcFireClient<T> {
        &self.client
    }

    /// The fire client, mutably (for `rpc chaincode <id>`).
    pub fn client_mut(&mut self) -> &mut RpcFireClient<T> {
        &mut self.client
    }

    /// `rpc user fund <to> <amount> [message]`
    pub async fn fund(&self, args: &[String]) -> Result<String, ClientError> {
        let rpc_args = self.builder.build_fund_transaction(args)?;
        Ok(self.client.fire(USER_FUND, rpc_args).await?)
    }

    /// `rpc user register`
    pub async fn register(&self, args: &[String]) -> Result<String, ClientError> {
        let rpc_args = self.builder.build_registration(args)?;
        Ok(self.client.fire(USER_REG_PUBLIC_KEY, rpc_args).await?)
    }

    /// `rpc user query <id>`
    pub async fn query_user(&self, id: &str) -> Result<serde_json::Value, ClientError> {
        let raw = self.client.query(QUERY_USER, vec![id.to_string()]).await?;
        Self::parse_json(&raw)
    }

    /// `rpc query`
    pub async fn query_global(&self) -> Result<serde_json::Value, ClientError> {
        let raw = self.client.query(QUERY_GLOBAL, Vec::new()).await?;
        Self::parse_json(&raw)
    }

    fn parse_json(raw: &[u8]) -> Result<serde_json::Value, ClientError> {
        serde_json::from_slice(raw).map_err(|e| ClientError::InvalidResult(e.to_string()))
    }
}
