//! # Transaction Builder
//!
//! Turns command-line arguments into signed chaincode arguments.
//!
//! Every argument is validated before the signer is touched, so a bad
//! command never reaches key material.

use super::errors::TxBuildError;
use crate::ports::outbound::{AddressValidator, TransactionSigner};
use shared_types::{
    canonical_address, FundTransaction, FundTransactionData, RegisterPublicKey, RpcArguments,
    MAX_NONCE_LEN,
};
use tracing::debug;

/// Builds `USER_FUND` and `USER_REGPUBKEY` arguments.
#[derive(Debug)]
pub struct TransactionBuilder<V: AddressValidator, S: TransactionSigner> {
    validator: V,
    signer: S,
}

impl<V: AddressValidator, S: TransactionSigner> TransactionBuilder<V, S> {
    /// Create a builder.
    pub fn new(validator: V, signer: S) -> Self {
        Self { validator, signer }
    }

    /// The signer in use.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// `<to> <amount> [message]`
    ///
    /// # Errors
    ///
    /// - `ArityError` unless there are 2 or 3 arguments
    /// - `InvalidAddress` if the validator rejects the recipient
    /// - `InvalidAmount` for non-numeric or negative amounts
    /// - `MessageTooLong` if the message exceeds 256 bytes
    /// - `SigningError` if the signer fails
    pub fn build_fund_transaction(&self, args: &[String]) -> Result<RpcArguments, TxBuildError> {
        let (to, amount, message) = match args {
            [to, amount] => (to, amount, None),
            [to, amount, message] => (to, amount, Some(message)),
            _ => {
                return Err(TxBuildError::ArityError {
                    expected: "2 or 3",
                    got: args.len(),
                })
            }
        };

        self.validator
            .validate(to)
            .map_err(TxBuildError::InvalidAddress)?;

        let amount: i64 = amount
            .trim()
            .parse()
            .map_err(|_| TxBuildError::InvalidAmount(amount.clone()))?;
        let amount =
            u64::try_from(amount).map_err(|_| TxBuildError::InvalidAmount(amount.to_string()))?;

        let nonce = match message {
            Some(message) if message.len() > MAX_NONCE_LEN => {
                return Err(TxBuildError::MessageTooLong {
                    len: message.len(),
                    max: MAX_NONCE_LEN,
                })
            }
            Some(message) => Some(message.as_bytes().to_vec()),
            None => None,
        };

        let recipient = canonical_address(to);
        let fund = FundTransaction {
            data: FundTransactionData {
                recipient: recipient.clone(),
                amount,
            },
            nonce,
            invoked: false,
        };
        debug!(%recipient, amount, "fund transaction built");

        let payload = self.signer.sign(shared_types::encode(&fund)?)?;
        Ok(RpcArguments::from_payload(&payload)?)
    }

    /// Registration of the loaded key. Takes no arguments.
    ///
    /// # Errors
    ///
    /// - `ArityError` if any argument is given
    /// - `NoKeyConfigured` if the signer holds no key
    pub fn build_registration(&self, args: &[String]) -> Result<RpcArguments, TxBuildError> {
        if !args.is_empty() {
            return Err(TxBuildError::ArityError {
                expected: "0",
                got: args.len(),
            });
        }

        let public_key = self
            .signer
            .public_key()
            .ok_or(TxBuildError::NoKeyConfigured)?;
        let message = shared_types::encode(&RegisterPublicKey { public_key })?;

        let payload = self.signer.sign(message)?;
        Ok(RpcArguments::from_payload(&payload)?)
    }
}
