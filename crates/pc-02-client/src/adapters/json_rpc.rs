//! JSON-RPC 2.0 transport to a ledger peer.
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `chaincode_invoke` | `[InvocationRequest]` | transaction id (string) |
//! | `chaincode_query` | `[InvocationRequest]` | query output (string) |

use crate::domain::entities::InvocationRequest;
use crate::domain::errors::TransportError;
use crate::ports::outbound::LedgerTransport;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Method name.
    pub method: String,
    /// Positional params.
    pub params: T,
    /// Request id.
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    /// Build a 2.0 request.
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Protocol version echoed by the peer.
    pub jsonrpc: String,
    /// Id of the request answered.
    pub id: u64,
    /// Result on success.
    pub result: Option<T>,
    /// Error on failure.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Optional extra data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC Error {}: {}", self.code, self.message)
    }
}

/// Parse a raw response body into its result.
pub(crate) fn parse_response<R: DeserializeOwned>(body: &[u8]) -> Result<R, TransportError> {
    let response: JsonRpcResponse<R> =
        serde_json::from_slice(body).map_err(|e| TransportError::Parse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(TransportError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    response
        .result
        .ok_or_else(|| TransportError::Parse("Missing result in response".to_string()))
}

/// HTTP JSON-RPC client for a ledger peer.
#[derive(Debug)]
pub struct JsonRpcTransport {
    client: Client,
    endpoint: String,
    request_id: AtomicU64,
}

impl JsonRpcTransport {
    /// Create a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, TransportError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        debug!(method, id = request.id, endpoint = %self.endpoint, "json-rpc call");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(format!("Cannot connect to {}", self.endpoint))
                } else {
                    TransportError::Http(e)
                }
            })?;

        let body = response.bytes().await.map_err(TransportError::Http)?;
        parse_response(&body)
    }
}

#[async_trait]
impl LedgerTransport for JsonRpcTransport {
    async fn invoke(&self, request: &InvocationRequest) -> Result<String, TransportError> {
        self.call("chaincode_invoke", [request]).await
    }

    async fn query(&self, request: &InvocationRequest) -> Result<Vec<u8>, TransportError> {
        let output: String = self.call("chaincode_query", [request]).await?;
        Ok(output.into_bytes())
    }
}
