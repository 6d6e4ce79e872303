//! # ECDSA Signatures (secp256k1)
//!
//! Key pairs used by clients to sign ledger transactions, and the matching
//! verification used by the chaincode handlers.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalized signatures (k256 default)
//!
//! ## Addresses
//!
//! A ledger address is the lowercase hex of the first 20 bytes of
//! `sha256(compressed_public_key)`.

use crate::{hashing::sha256, CryptoError};
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use zeroize::Zeroize;

/// Length of a raw address in bytes (hex form is twice as long).
pub const ADDRESS_LEN: usize = 20;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from an arbitrary slice, checking the length first.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 33] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: 33,
                actual: bytes.len(),
            })?;
        Self::from_bytes(array)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Verify a signature over `message`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_slice(&signature.0).map_err(|_| CryptoError::InvalidSignature)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Derive the ledger address owned by this key.
    pub fn to_address(&self) -> String {
        let digest = sha256(&self.0);
        hex::encode(&digest[..ADDRESS_LEN])
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, rejecting anything that is not 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a hex-encoded secret key, as exported by wallets.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let mut raw = hex::decode(encoded.trim().trim_start_matches("0x"))
            .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?;
        let result = match <[u8; 32]>::try_from(raw.as_slice()) {
            Ok(bytes) => Self::from_bytes(bytes),
            Err(_) => Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: raw.len(),
            }),
        };
        raw.zeroize();
        result
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let verifying_key = self.signing_key.verifying_key();
        let sec1_bytes = verifying_key.to_sec1_bytes();
        // SEC1 compressed encoding is always 33 bytes: 0x02/0x03 || x
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        Secp256k1PublicKey(bytes)
    }

    /// Ledger address of this key pair.
    pub fn address(&self) -> String {
        self.public_key().to_address()
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        let bytes: [u8; 64] = sig.to_bytes().into();
        Secp256k1Signature(bytes)
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Secp256k1KeyPair::generate();
        let message = b"fund 100 to someone";

        let signature = keypair.sign(message);
        let result = keypair.public_key().verify(message, &signature);

        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = Secp256k1KeyPair::generate();

        let signature = keypair.sign(b"message1");
        let result = keypair.public_key().verify(b"message2", &signature);

        assert_eq!(result, Err(CryptoError::SignatureVerificationFailed));
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = Secp256k1KeyPair::from_bytes([0xABu8; 32]).unwrap();
        let message = b"deterministic test";

        let sig1 = keypair.sign(message);
        let sig2 = keypair.sign(message);

        assert_eq!(sig1.as_bytes(), sig2.as_bytes());
    }

    #[test]
    fn test_address_shape() {
        let keypair = Secp256k1KeyPair::from_bytes([0x11u8; 32]).unwrap();
        let address = keypair.address();

        assert_eq!(address.len(), ADDRESS_LEN * 2);
        assert!(address.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(address, keypair.public_key().to_address());
    }

    #[test]
    fn test_from_hex() {
        let original = Secp256k1KeyPair::from_bytes([0x42u8; 32]).unwrap();
        let encoded = hex::encode(original.to_bytes());

        let restored = Secp256k1KeyPair::from_hex(&encoded).unwrap();
        assert_eq!(original.public_key(), restored.public_key());

        let prefixed = Secp256k1KeyPair::from_hex(&format!("0x{encoded}")).unwrap();
        assert_eq!(original.public_key(), prefixed.public_key());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(
            Secp256k1KeyPair::from_hex("zz"),
            Err(CryptoError::InvalidEncoding(_))
        ));
        assert!(matches!(
            Secp256k1KeyPair::from_hex("abcd"),
            Err(CryptoError::InvalidKeyLength { expected: 32, actual: 2 })
        ));
    }

    #[test]
    fn test_public_key_from_slice() {
        let keypair = Secp256k1KeyPair::generate();
        let bytes = keypair.public_key().as_bytes().to_vec();

        assert_eq!(
            Secp256k1PublicKey::from_slice(&bytes).unwrap(),
            keypair.public_key()
        );
        assert!(matches!(
            Secp256k1PublicKey::from_slice(&bytes[..10]),
            Err(CryptoError::InvalidKeyLength { expected: 33, actual: 10 })
        ));
    }
}
