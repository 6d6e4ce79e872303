//! # Global Settings Cache
//!
//! Process-local mirror of the `global_setting` record.
//!
//! ## Locking
//!
//! - Fast path: shared lock, return if already loaded.
//! - Load-miss: exclusive lock held for the whole branch. `loaded` is
//!   checked again after acquiring it since another invocation may have
//!   loaded the record in between.
//! - Save-back: exclusive lock.
//!
//! Guards are scoped, so the lock released is always the one acquired.
//!
//! Once loaded, the cache stays loaded until save-back finds the record
//! gone.

use super::entities::SupplyStatus;
use super::errors::ChaincodeError;
use crate::ports::outbound::KeyValueStore;
use parking_lot::RwLock;
use shared_types::{GlobalSetting, SecurityBootstrap, GLOBAL_SETTING_KEY};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CacheState {
    loaded: bool,
    status: SupplyStatus,
    security: Arc<SecurityBootstrap>,
}

/// What an invocation sees once the cache is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheView {
    /// Supply fields at the time of the call.
    pub status: SupplyStatus,
    /// Security bootstrap fields of the loaded record.
    pub security: Arc<SecurityBootstrap>,
}

/// Lazily loaded cache of the global settings record.
#[derive(Debug)]
pub struct GlobalSettingsCache {
    key: String,
    state: RwLock<CacheState>,
}

impl Default for GlobalSettingsCache {
    fn default() -> Self {
        Self::new(GLOBAL_SETTING_KEY)
    }
}

impl GlobalSettingsCache {
    /// Empty cache bound to `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Store key this cache mirrors.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the record on first use; later calls return the cached view.
    ///
    /// # Errors
    ///
    /// - `MissingState` if the record is absent
    /// - `DecodeError` if it cannot be parsed or breaks the supply invariant
    /// - `Store` if the host store fails
    ///
    /// On error the cache stays unloaded.
    pub fn ensure_loaded(&self, store: &dyn KeyValueStore) -> Result<CacheView, ChaincodeError> {
        {
            let state = self.state.read();
            if state.loaded {
                return Ok(Self::view(&state));
            }
        }

        let mut state = self.state.write();
        if state.loaded {
            debug!(key = %self.key, "settings loaded by a concurrent invocation");
            return Ok(Self::view(&state));
        }

        let setting = self.read_record(store)?;
        state.status = SupplyStatus::from_setting(&setting);
        state.security = Arc::new(setting.security);
        state.loaded = true;

        info!(
            key = %self.key,
            total_supply = state.status.total_supply,
            unassigned_supply = state.status.unassigned_supply,
            "global settings loaded"
        );
        Ok(Self::view(&state))
    }

    /// Write the cached supply fields back into the persisted record.
    ///
    /// The record is re-read first. If it has disappeared the cache is
    /// invalidated and nothing is written. If it still exists its supply
    /// fields are overwritten with the cached ones, even when another
    /// writer changed them since the load: this checks existence only and
    /// does not detect concurrent value changes.
    ///
    /// # Errors
    ///
    /// - `InvalidCache` if nothing was ever loaded (the store is not touched)
    /// - `MissingState` if the record vanished
    /// - `DecodeError`, `Encode` or `Store` on codec or host failures
    pub fn save_back(&self, store: &dyn KeyValueStore) -> Result<(), ChaincodeError> {
        let mut state = self.state.write();
        if !state.loaded {
            return Err(ChaincodeError::InvalidCache);
        }

        let mut setting = match self.read_record(store) {
            Ok(setting) => setting,
            Err(err @ ChaincodeError::MissingState { .. }) => {
                state.loaded = false;
                warn!(key = %self.key, "global settings vanished, cache invalidated");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        state.status.apply_to(&mut setting);
        store.put(&self.key, setting.to_bytes()?)?;

        info!(
            key = %self.key,
            total_supply = state.status.total_supply,
            unassigned_supply = state.status.unassigned_supply,
            "global settings saved"
        );
        Ok(())
    }

    /// Apply `mutate` to the in-memory supply fields.
    ///
    /// The change is discarded if the result breaks
    /// `0 <= unassigned <= total`. Call [`save_back`](Self::save_back) to
    /// persist it.
    pub fn update_status<F>(&self, mutate: F) -> Result<SupplyStatus, ChaincodeError>
    where
        F: FnOnce(&mut SupplyStatus),
    {
        let mut state = self.state.write();
        if !state.loaded {
            return Err(ChaincodeError::InvalidCache);
        }

        let mut next = state.status;
        mutate(&mut next);
        if !next.is_consistent() {
            return Err(ChaincodeError::SupplyInvariant {
                total: next.total_supply,
                unassigned: next.unassigned_supply,
            });
        }
        state.status = next;
        Ok(next)
    }

    /// Current supply fields, or `None` before the first load.
    pub fn snapshot(&self) -> Option<SupplyStatus> {
        let state = self.state.read();
        state.loaded.then_some(state.status)
    }

    /// Security bootstrap of the loaded record.
    pub fn security(&self) -> Option<Arc<SecurityBootstrap>> {
        let state = self.state.read();
        state.loaded.then(|| Arc::clone(&state.security))
    }

    /// Whether a record has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// Force the next `ensure_loaded` to hit the store.
    pub fn invalidate(&self) {
        self.state.write().loaded = false;
    }

    fn view(state: &CacheState) -> CacheView {
        CacheView {
            status: state.status,
            security: Arc::clone(&state.security),
        }
    }

    fn read_record(&self, store: &dyn KeyValueStore) -> Result<GlobalSetting, ChaincodeError> {
        let bytes = store
            .get(&self.key)?
            .ok_or_else(|| ChaincodeError::MissingState {
                key: self.key.clone(),
            })?;
        Ok(GlobalSetting::from_bytes(&bytes)?)
    }
}
