//! # In-Memory Store
//!
//! Key/value store for tests and local runs.

use crate::domain::errors::StoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory ledger state with access counters.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a key. Returns the previous value.
    pub fn remove(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.remove(key))
    }

    /// Make every subsequent call fail with `Unavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store switched off".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.check_available()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        store.put("a", vec![1, 2]).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(vec![1, 2]));
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove("a").unwrap(), Some(vec![1, 2]));
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_counters() {
        let store = InMemoryStore::new();
        store.put("a", vec![]).unwrap();
        store.get("a").unwrap();
        store.get("a").unwrap();

        assert_eq!(store.reads(), 2);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_unavailable() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.get("a"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.put("a", vec![]), Err(StoreError::Unavailable(_))));
        assert_eq!(store.reads(), 0);

        store.set_unavailable(false);
        assert!(store.get("a").is_ok());
    }
}
