//! # `USER_FUND`
//!
//! Moves tokens from the caller to a recipient. The argument is a
//! [`SignedPayload`](shared_types::SignedPayload) whose message is a
//! bincode [`FundTransaction`], signed with the caller's registered key.

use super::{verified_payload, UserTx, UserTxScope, UserUpdates};
use crate::domain::errors::ChaincodeError;
use shared_crypto::sha256;
use shared_types::{canonical_address, FundTransaction, UserData, MAX_NONCE_LEN};
use tracing::info;

/// Handler for `USER_FUND`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FundHandler;

impl UserTx for FundHandler {
    fn handle_user_tx(
        &self,
        scope: &UserTxScope<'_>,
        args: &[String],
    ) -> Result<UserUpdates, ChaincodeError> {
        let caller = &scope.caller.principal;
        let payload = verified_payload(args)?;

        let registered = scope
            .record
            .public_key
            .as_deref()
            .ok_or_else(|| ChaincodeError::UnregisteredKey(caller.clone()))?;
        if registered != payload.public_key.as_slice() {
            return Err(ChaincodeError::BadSignature(
                "payload not signed with the registered key".into(),
            ));
        }

        let tx: FundTransaction = shared_types::decode(&payload.message)
            .map_err(|e| ChaincodeError::InvalidArguments(e.to_string()))?;
        if tx.invoked {
            return Err(ChaincodeError::InvalidArguments(
                "transaction is marked as already invoked".into(),
            ));
        }
        if let Some(nonce) = &tx.nonce {
            if nonce.len() > MAX_NONCE_LEN {
                return Err(ChaincodeError::InvalidArguments(format!(
                    "nonce is {} bytes, limit {MAX_NONCE_LEN}",
                    nonce.len()
                )));
            }
        }

        let recipient_id = canonical_address(&tx.data.recipient);
        if recipient_id.is_empty() {
            return Err(ChaincodeError::InvalidArguments("empty recipient".into()));
        }
        if recipient_id == canonical_address(caller) {
            return Err(ChaincodeError::InvalidArguments("cannot fund yourself".into()));
        }

        let digest = sha256(&payload.message);
        if scope.record.last_tx_digest == Some(digest) {
            return Err(ChaincodeError::ReplayedNonce(caller.clone()));
        }

        let amount = tx.data.amount;
        let available = scope.record.balance;
        if available < amount {
            return Err(ChaincodeError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let mut recipient = scope
            .load_user(&recipient_id)?
            .unwrap_or_else(|| UserData::new(recipient_id.as_str(), scope.caller.region.clone()));
        recipient.balance = recipient.balance.checked_add(amount).ok_or_else(|| {
            ChaincodeError::InvalidArguments(format!("balance overflow for {recipient_id}"))
        })?;

        let mut sender = scope.record.clone();
        sender.balance = available - amount;
        sender.last_tx_digest = Some(digest);

        info!(
            from = %sender.id,
            to = %recipient.id,
            amount,
            "fund transfer applied"
        );

        let mut updates = UserUpdates::new();
        updates.put(sender);
        updates.put(recipient);
        Ok(updates)
    }
}
