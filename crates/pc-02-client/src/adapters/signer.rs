//! In-memory key signer.

use crate::domain::errors::TxBuildError;
use crate::ports::outbound::TransactionSigner;
use shared_crypto::Secp256k1KeyPair;
use shared_types::SignedPayload;

/// Signs with a key loaded once at startup. The key may be absent, in
/// which case only key-less commands work.
#[derive(Debug, Default)]
pub struct LocalKeySigner {
    keypair: Option<Secp256k1KeyPair>,
}

impl LocalKeySigner {
    /// Signer holding `keypair`.
    pub fn new(keypair: Secp256k1KeyPair) -> Self {
        Self {
            keypair: Some(keypair),
        }
    }

    /// Signer without a key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a hex private key, as given on the command line.
    pub fn from_hex(encoded: &str) -> Result<Self, TxBuildError> {
        let keypair = Secp256k1KeyPair::from_hex(encoded)
            .map_err(|e| TxBuildError::SigningError(e.to_string()))?;
        Ok(Self::new(keypair))
    }

    /// Address of the loaded key.
    pub fn address(&self) -> Option<String> {
        self.keypair.as_ref().map(Secp256k1KeyPair::address)
    }
}

impl TransactionSigner for LocalKeySigner {
    fn public_key(&self) -> Option<Vec<u8>> {
        self.keypair
            .as_ref()
            .map(|k| k.public_key().as_bytes().to_vec())
    }

    fn sign(&self, message: Vec<u8>) -> Result<SignedPayload, TxBuildError> {
        let keypair = self
            .keypair
            .as_ref()
            .ok_or_else(|| TxBuildError::SigningError("no private key loaded".into()))?;
        let signature = keypair.sign(&message);
        Ok(SignedPayload {
            message,
            public_key: keypair.public_key().as_bytes().to_vec(),
            signature: signature.as_bytes().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::{Secp256k1PublicKey, Secp256k1Signature};

    #[test]
    fn test_signature_verifies() {
        let signer = LocalKeySigner::new(Secp256k1KeyPair::generate());
        let payload = signer.sign(b"hello".to_vec()).unwrap();

        let key = Secp256k1PublicKey::from_slice(&payload.public_key).unwrap();
        let sig = Secp256k1Signature::from_slice(&payload.signature).unwrap();
        assert!(key.verify(b"hello", &sig).is_ok());
        assert_eq!(signer.public_key(), Some(payload.public_key));
    }

    #[test]
    fn test_empty_signer() {
        let signer = LocalKeySigner::empty();
        assert_eq!(signer.public_key(), None);
        assert_eq!(signer.address(), None);
        assert!(matches!(
            signer.sign(vec![1]),
            Err(TxBuildError::SigningError(_))
        ));
    }

    #[test]
    fn test_from_hex() {
        let signer = LocalKeySigner::from_hex(&"11".repeat(32)).unwrap();
        assert_eq!(signer.address().map(|a| a.len()), Some(40));
        assert!(LocalKeySigner::from_hex("xyz").is_err());
    }
}
