use crate::HostStore;
use crate::error::StorageError;
use crate::key::StoreKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A process-local [`HostStore`] backed by a hash map.
///
/// Cloning is cheap and clones share the same entries, which lets tests keep a handle to
/// inspect raw stored strings after handing the store to a vault.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<StoreKey, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Sorted list of stored keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> =
            self.entries.read().keys().map(|k| k.as_str().to_owned()).collect();
        keys.sort_unstable();
        keys
    }
}

impl HostStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = StoreKey::try_from(key)?;
        Ok(self.entries.read().get(&key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        self.entries.write().insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        self.entries.write().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let view = store.clone();

        store.set("recovery.data", "{}").unwrap();
        assert_eq!(view.get("recovery.data").unwrap().as_deref(), Some("{}"));
        assert_eq!(view.keys(), vec!["recovery.data".to_owned()]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.len(), 0);
    }
}
