//! # Wire Codec
//!
//! Fallible, pure encode/decode for every persisted or signed record.

use crate::errors::CodecError;
use serde::{de::DeserializeOwned, Serialize};

/// Serialize a record to its binary wire form.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parse a record from its binary wire form.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encode a record and render it as a single hex string argument.
pub fn encode_hex<T: Serialize>(value: &T) -> Result<String, CodecError> {
    encode(value).map(hex::encode)
}

/// Inverse of [`encode_hex`].
pub fn decode_hex<T: DeserializeOwned>(argument: &str) -> Result<T, CodecError> {
    let bytes = hex::decode(argument).map_err(|e| CodecError::Hex(e.to_string()))?;
    decode(&bytes)
}
