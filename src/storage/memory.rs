//! In-memory key-value store

use std::collections::BTreeMap;

use super::KeyValueStore;
use crate::error::VaultResult;

/// A [`KeyValueStore`] held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    reloads: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `pairs`
    pub fn with_entries<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            reloads: 0,
        }
    }

    /// Snapshot of every entry, sorted by key
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// How many times `reload` has been called
    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> VaultResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> VaultResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> VaultResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn reload(&mut self) -> VaultResult<()> {
        self.reloads += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("theme").unwrap().is_none());

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        assert!(store.remove("theme").unwrap());
        assert!(!store.remove("theme").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::with_entries([("streak", "3"), ("notes", "{}")]);
        assert_eq!(store.keys().unwrap(), vec!["notes", "streak"]);
    }

    #[test]
    fn test_reload_counted() {
        let mut store = MemoryStore::new();
        store.reload().unwrap();
        store.reload().unwrap();
        assert_eq!(store.reload_count(), 2);
    }
}
