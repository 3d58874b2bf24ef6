//! File-backed key-value store
//!
//! Keeps every entry in a single `storage.json` object of string values.
//! Each mutation is written through to disk atomically, so the file always
//! reflects the last completed `set` or `remove`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::file_io::{read_json, write_json_atomic};
use super::KeyValueStore;
use crate::error::VaultResult;

/// A [`KeyValueStore`] persisted to a JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> VaultResult<Self> {
        let path = path.into();
        let entries = read_json(&path)?;
        Ok(Self { path, entries })
    }

    fn persist(&self) -> VaultResult<()> {
        write_json_atomic(&self.path, &self.entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> VaultResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> VaultResult<bool> {
        if self.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn keys(&self) -> VaultResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn reload(&mut self) -> VaultResult<()> {
        self.entries = read_json(&self.path)?;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "store reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("storage.json")).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_writes_persist_across_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("progress", r#"{"module1":true}"#).unwrap();
        store.set("theme", "dark").unwrap();
        store.remove("theme").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("progress").unwrap().as_deref(),
            Some(r#"{"module1":true}"#)
        );
        assert!(reopened.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let mut first = FileStore::open(&path).unwrap();
        let mut second = FileStore::open(&path).unwrap();

        second.set("streak", "5").unwrap();
        assert!(first.get("streak").unwrap().is_none());

        first.reload().unwrap();
        assert_eq!(first.get("streak").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn test_remove_missing_key_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        assert!(!store.remove("notes").unwrap());
        assert!(!path.exists());
    }
}
