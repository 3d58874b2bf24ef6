//! Storage layer for StudyVault
//!
//! Application state lives in a flat key-value store of strings, the same
//! shape as browser local storage. Everything above this layer talks to the
//! [`KeyValueStore`] port, so the backup manager can run against the
//! file-backed store in the binary and against [`MemoryStore`] in tests.

pub mod file_io;
pub mod file_store;
pub mod memory;

pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::error::VaultResult;

/// A string-keyed store of string values
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> VaultResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> VaultResult<()>;

    /// Remove `key`; returns whether it was present
    fn remove(&mut self, key: &str) -> VaultResult<bool>;

    /// List every key currently in the store
    fn keys(&self) -> VaultResult<Vec<String>>;

    /// Drop any in-memory view and re-read from the backing medium
    fn reload(&mut self) -> VaultResult<()> {
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> VaultResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> VaultResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> VaultResult<Vec<String>> {
        (**self).keys()
    }

    fn reload(&mut self) -> VaultResult<()> {
        (**self).reload()
    }
}
