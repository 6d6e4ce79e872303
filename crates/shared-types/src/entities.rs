//! # Core Ledger Entities
//!
//! ## Clusters
//!
//! - **Global State**: `GlobalSetting`, `SecurityBootstrap`
//! - **Accounts**: `UserData`
//! - **Transactions**: `FundTransactionData`, `FundTransaction`,
//!   `RegisterPublicKey`, `SignedPayload`, `RpcArguments`

use crate::codec;
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: GLOBAL STATE
// =============================================================================

/// Well-known store key of the global settings record.
pub const GLOBAL_SETTING_KEY: &str = "global_setting";

/// Key prefix for per-user records.
pub const USER_KEY_PREFIX: &str = "user:";

/// Maximum nonce (message) length carried by a fund transaction, in bytes.
pub const MAX_NONCE_LEN: usize = 256;

/// Canonical form of an address or principal: trimmed, ASCII lowercase.
///
/// Records are keyed and compared on this form only.
pub fn canonical_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Principals the privilege policy bootstraps from at deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityBootstrap {
    /// Principals holding the Admin privilege.
    pub admin_principals: Vec<String>,
    /// Principals holding the Manager privilege.
    pub manager_principals: Vec<String>,
    /// Region assigned to callers whose context names none.
    pub default_region: String,
}

/// The singleton deployment record stored under [`GLOBAL_SETTING_KEY`].
///
/// Invariant: `0 <= unassigned_supply <= total_supply`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSetting {
    /// Tokens ever issued.
    pub total_supply: i64,
    /// Tokens not yet assigned to any user.
    pub unassigned_supply: i64,
    /// Security bootstrap fields.
    pub security: SecurityBootstrap,
}

impl GlobalSetting {
    /// Check the supply invariant.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.unassigned_supply < 0 || self.unassigned_supply > self.total_supply {
            return Err(CodecError::Decode(format!(
                "supply invariant violated: unassigned {} outside 0..={}",
                self.unassigned_supply, self.total_supply
            )));
        }
        Ok(())
    }

    /// Decode from stored bytes and check the supply invariant.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let setting: Self = codec::decode(bytes)?;
        setting.validate()?;
        Ok(setting)
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }
}

// =============================================================================
// CLUSTER B: ACCOUNTS
// =============================================================================

/// Per-user ledger record, stored under `user:<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// User address.
    pub id: String,
    /// Operating region the user was first seen in.
    pub region: String,
    /// Token balance.
    pub balance: u64,
    /// Registered compressed public key, if any.
    pub public_key: Option<Vec<u8>>,
    /// Digest of the last accepted fund transaction message.
    pub last_tx_digest: Option<[u8; 32]>,
}

impl UserData {
    /// Fresh record for a user the ledger has not seen before.
    pub fn new(id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Store key of this user's record.
    pub fn store_key(id: &str) -> String {
        format!("{USER_KEY_PREFIX}{id}")
    }
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// The value-moving part of a fund transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundTransactionData {
    /// Recipient address.
    pub recipient: String,
    /// Amount in base units.
    pub amount: u64,
}

/// A fund transaction as signed by the client.
///
/// The `nonce` plays two roles: it is a salt that makes two otherwise
/// identical transfers sign to different payloads, and it carries an
/// optional human-readable note (at most [`MAX_NONCE_LEN`] bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundTransaction {
    /// Recipient and amount.
    pub data: FundTransactionData,
    /// Optional salt / note.
    pub nonce: Option<Vec<u8>>,
    /// Set once the ledger has applied the transaction; always false on the wire.
    pub invoked: bool,
}

/// Registration of the caller's public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPublicKey {
    /// Compressed secp256k1 public key.
    pub public_key: Vec<u8>,
}

/// A signed message: the encoded inner record, the signer key and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPayload {
    /// bincode of the inner record.
    pub message: Vec<u8>,
    /// Compressed public key of the signer.
    pub public_key: Vec<u8>,
    /// 64-byte r||s signature over `message`.
    pub signature: Vec<u8>,
}

impl SignedPayload {
    /// Render as a single chaincode string argument.
    pub fn to_argument(&self) -> Result<String, CodecError> {
        codec::encode_hex(self)
    }

    /// Parse from a chaincode string argument.
    pub fn from_argument(argument: &str) -> Result<Self, CodecError> {
        codec::decode_hex(argument)
    }
}

/// Argument list ready for submission to the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcArguments(pub Vec<String>);

impl RpcArguments {
    /// Arguments carrying a single signed payload.
    pub fn from_payload(payload: &SignedPayload) -> Result<Self, CodecError> {
        Ok(Self(vec![payload.to_argument()?]))
    }

    /// Borrow the raw argument strings.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume into the raw argument strings.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
