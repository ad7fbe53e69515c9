//! In-process key-value store.
//!
//! Used by tests and by UI previews that must not touch disk. A single mutex
//! guards the map, so `update_item` runs as one critical section.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Map-backed store with the same semantics as the SQLite one.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| KvError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_items(&self, items: &[(&str, &str)]) -> KvResult<()> {
        let mut map = self.lock()?;
        for (key, value) in items {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> KvResult<()> {
        let mut map = self.lock()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn update_item<E, F>(&self, key: &str, apply: F) -> Result<(), E>
    where
        E: From<KvError>,
        F: FnOnce(Option<String>) -> Result<Option<String>, E>,
    {
        let mut map = self.lock()?;
        if let Some(next) = apply(map.get(key).cloned())? {
            map.insert(key.to_string(), next);
        }
        Ok(())
    }
}
