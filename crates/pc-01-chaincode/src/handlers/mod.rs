//! # User Transaction Handlers
//!
//! `USER*` functions are routed by full name through a [`UserTxRegistry`]
//! filled at construction. A handler sees the caller, the caller's current
//! record and the store, and returns every user record it changed. The
//! router persists those records; handlers never write user state
//! themselves.

pub mod fund;
pub mod register;

pub use fund::FundHandler;
pub use register::RegisterPublicKeyHandler;

use crate::domain::entities::{CallerIdentity, SupplyStatus};
use crate::domain::errors::ChaincodeError;
use crate::domain::settings_cache::GlobalSettingsCache;
use crate::ports::outbound::KeyValueStore;
use shared_crypto::{Secp256k1PublicKey, Secp256k1Signature};
use shared_types::functions::{USER_FUND, USER_REG_PUBLIC_KEY};
use shared_types::{SignedPayload, UserData};
use std::collections::{btree_map, BTreeMap, HashMap};

/// A handler for one `USER*` function.
pub trait UserTx: Send + Sync {
    /// Validate `args` and compute the updated user records.
    fn handle_user_tx(
        &self,
        scope: &UserTxScope<'_>,
        args: &[String],
    ) -> Result<UserUpdates, ChaincodeError>;
}

/// Everything a handler may look at during one invocation.
pub struct UserTxScope<'a> {
    /// Resolved caller.
    pub caller: &'a CallerIdentity,
    /// Caller's record as currently stored (fresh if never stored).
    pub record: &'a UserData,
    /// Host store for this invocation.
    pub store: &'a dyn KeyValueStore,
    /// Global settings cache, already loaded.
    pub settings: &'a GlobalSettingsCache,
    /// Prefix of user record keys.
    pub user_key_prefix: &'a str,
}

impl UserTxScope<'_> {
    /// Read another user's record.
    pub fn load_user(&self, id: &str) -> Result<Option<UserData>, ChaincodeError> {
        load_user(self.store, self.user_key_prefix, id)
    }

    /// Current supply fields.
    pub fn supply(&self) -> Option<SupplyStatus> {
        self.settings.snapshot()
    }

    /// Change the cached supply and write it straight back to the store.
    pub fn commit_supply<F>(&self, mutate: F) -> Result<SupplyStatus, ChaincodeError>
    where
        F: FnOnce(&mut SupplyStatus),
    {
        let status = self.settings.update_status(mutate)?;
        self.settings.save_back(self.store)?;
        Ok(status)
    }
}

/// User records changed by a handler, keyed by id.
///
/// Ordered so records are written back in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdates(BTreeMap<String, UserData>);

impl UserUpdates {
    /// No changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a changed user, replacing an earlier version of the same id.
    pub fn put(&mut self, user: UserData) {
        self.0.insert(user.id.clone(), user);
    }

    /// Changed record for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&UserData> {
        self.0.get(id)
    }

    /// Ids of changed users, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Number of changed users.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for UserUpdates {
    type Item = (String, UserData);
    type IntoIter = btree_map::IntoIter<String, UserData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// `USER*` function name to handler.
pub struct UserTxRegistry {
    handlers: HashMap<String, Box<dyn UserTx>>,
}

impl UserTxRegistry {
    /// Registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with the built-in `USER_FUND` and `USER_REGPUBKEY` handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(USER_FUND, FundHandler);
        registry.register(USER_REG_PUBLIC_KEY, RegisterPublicKeyHandler);
        registry
    }

    /// Add or replace the handler for `function`.
    pub fn register(&mut self, function: impl Into<String>, handler: impl UserTx + 'static) {
        self.handlers.insert(function.into(), Box::new(handler));
    }

    /// Handler for `function`, if registered.
    pub fn get(&self, function: &str) -> Option<&dyn UserTx> {
        self.handlers.get(function).map(|handler| &**handler)
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for UserTxRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for UserTxRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserTxRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// Read and decode the record stored for `id`.
pub fn load_user(
    store: &dyn KeyValueStore,
    prefix: &str,
    id: &str,
) -> Result<Option<UserData>, ChaincodeError> {
    store
        .get(&format!("{prefix}{id}"))?
        .map(|bytes| shared_types::decode(&bytes).map_err(ChaincodeError::from))
        .transpose()
}

/// Parse the single signed-payload argument and check its signature
/// against the key it carries.
pub(crate) fn verified_payload(args: &[String]) -> Result<SignedPayload, ChaincodeError> {
    let [argument] = args else {
        return Err(ChaincodeError::InvalidArguments(format!(
            "expected 1 signed payload argument, got {}",
            args.len()
        )));
    };

    let payload = SignedPayload::from_argument(argument)
        .map_err(|e| ChaincodeError::InvalidArguments(e.to_string()))?;

    let public_key = Secp256k1PublicKey::from_slice(&payload.public_key)
        .map_err(|e| ChaincodeError::BadSignature(e.to_string()))?;
    let signature = Secp256k1Signature::from_slice(&payload.signature)
        .map_err(|e| ChaincodeError::BadSignature(e.to_string()))?;
    public_key
        .verify(&payload.message, &signature)
        .map_err(|e| ChaincodeError::BadSignature(e.to_string()))?;

    Ok(payload)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::adapters::InMemoryStore;
    use crate::domain::entities::CallerIdentity;
    use crate::domain::privilege::PrivilegeLevel;
    use crate::ports::outbound::KeyValueStore;
    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{GlobalSetting, SignedPayload, UserData, GLOBAL_SETTING_KEY};

    pub fn seeded_store(total: i64, unassigned: i64) -> InMemoryStore {
        let store = InMemoryStore::new();
        let setting = GlobalSetting {
            total_supply: total,
            unassigned_supply: unassigned,
            ..GlobalSetting::default()
        };
        store
            .put(GLOBAL_SETTING_KEY, setting.to_bytes().unwrap())
            .unwrap();
        store
    }

    pub fn caller(principal: &str) -> CallerIdentity {
        CallerIdentity {
            principal: principal.to_string(),
            privilege: PrivilegeLevel::Delegate,
            region: "global".to_string(),
        }
    }

    pub fn signed_arg(keypair: &Secp256k1KeyPair, message: Vec<u8>) -> String {
        let signature = keypair.sign(&message);
        SignedPayload {
            message,
            public_key: keypair.public_key().as_bytes().to_vec(),
            signature: signature.as_bytes().to_vec(),
        }
        .to_argument()
        .unwrap()
    }

    pub fn registered_user(keypair: &Secp256k1KeyPair, balance: u64) -> UserData {
        UserData {
            balance,
            public_key: Some(keypair.public_key().as_bytes().to_vec()),
            ..UserData::new(keypair.address(), "global")
        }
    }
}
