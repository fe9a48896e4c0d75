//! In-process key/value store.
//!
//! Clones share one backing map, which models two execution contexts
//! writing to the same persistent scope.

use super::{ContentStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
    save_count: usize,
}

/// Shared in-memory slot map with an optional per-payload byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any payload longer than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state.quota_bytes = Some(quota_bytes);
        }
        store
    }

    /// Writes a raw payload without going through quota checks.
    pub fn insert_raw(&self, key: impl Into<String>, payload: impl Into<String>) -> StoreResult<()> {
        self.lock()?.slots.insert(key.into(), payload.into());
        Ok(())
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().ok()?.slots.get(key).cloned()
    }

    pub fn set_quota(&self, quota_bytes: Option<usize>) -> StoreResult<()> {
        self.lock()?.quota_bytes = quota_bytes;
        Ok(())
    }

    /// Number of successful `save` calls across all clones.
    pub fn save_count(&self) -> usize {
        self.lock().map(|state| state.save_count).unwrap_or(0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.slots.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        let mut state = self.lock()?;
        if let Some(quota) = state.quota_bytes {
            if payload.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: payload.len(),
                    quota,
                });
            }
        }
        state.slots.insert(key.to_string(), payload.to_string());
        state.save_count += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{ContentStore, StoreError};

    #[test]
    fn clones_share_slots() {
        let first = MemoryStore::new();
        let second = first.clone();

        first.save("k", "v1").unwrap();
        assert_eq!(second.load("k").unwrap().as_deref(), Some("v1"));
        assert_eq!(second.save_count(), 1);
    }

    #[test]
    fn quota_rejects_oversized_payload_and_keeps_previous_value() {
        let store = MemoryStore::with_quota(4);
        store.save("k", "abcd").unwrap();

        let err = store.save("k", "abcde").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { size: 5, quota: 4, .. }));
        assert_eq!(store.load("k").unwrap().as_deref(), Some("abcd"));
    }

    #[test]
    fn remove_clears_slot() {
        let store = MemoryStore::new();
        store.save("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }
}
