//! # `USER_REGPUBKEY`
//!
//! Binds a secp256k1 public key to the caller. The key must derive the
//! caller's own address and the payload must be signed by it.

use super::{verified_payload, UserTx, UserTxScope, UserUpdates};
use crate::domain::errors::ChaincodeError;
use shared_crypto::Secp256k1PublicKey;
use shared_types::RegisterPublicKey;
use tracing::{debug, info};

/// Handler for `USER_REGPUBKEY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterPublicKeyHandler;

impl UserTx for RegisterPublicKeyHandler {
    fn handle_user_tx(
        &self,
        scope: &UserTxScope<'_>,
        args: &[String],
    ) -> Result<UserUpdates, ChaincodeError> {
        let caller = &scope.caller.principal;
        let payload = verified_payload(args)?;

        let request: RegisterPublicKey = shared_types::decode(&payload.message)
            .map_err(|e| ChaincodeError::InvalidArguments(e.to_string()))?;
        if request.public_key != payload.public_key {
            return Err(ChaincodeError::BadSignature(
                "registration not signed by the registered key".into(),
            ));
        }

        let public_key = Secp256k1PublicKey::from_slice(&request.public_key)
            .map_err(|e| ChaincodeError::InvalidArguments(e.to_string()))?;
        if !public_key.to_address().eq_ignore_ascii_case(caller) {
            return Err(ChaincodeError::AddressMismatch(caller.clone()));
        }

        let mut updates = UserUpdates::new();
        match scope.record.public_key.as_deref() {
            Some(existing) if existing == request.public_key.as_slice() => {
                debug!(user = %caller, "public key already registered");
                updates.put(scope.record.clone());
            }
            Some(_) => {
                return Err(ChaincodeError::InvalidArguments(
                    "a different public key is already registered".into(),
                ));
            }
            None => {
                let mut user = scope.record.clone();
                user.public_key = Some(request.public_key);
                info!(user = %caller, "public key registered");
                updates.put(user);
            }
        }
        Ok(updates)
    }
}
