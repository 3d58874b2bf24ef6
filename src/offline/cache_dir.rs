//! Directory-backed offline caches
//!
//! Layout under the offline directory:
//!
//! ```text
//! offline/
//!   workers.json        registered worker scopes (JSON array of strings)
//!   caches/<name>/      one directory per named cache
//! ```

use std::fs;
use std::path::PathBuf;

use super::OfflineCache;
use crate::error::{VaultError, VaultResult};
use crate::storage::{read_json, write_json_atomic};

/// Offline caches stored on disk
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn workers_file(&self) -> PathBuf {
        self.root.join("workers.json")
    }

    fn caches_dir(&self) -> PathBuf {
        self.root.join("caches")
    }

    /// Record a worker registration for `scope`
    pub fn register_worker(&self, scope: &str) -> VaultResult<()> {
        let mut scopes: Vec<String> = read_json(self.workers_file())?;
        if !scopes.iter().any(|s| s == scope) {
            scopes.push(scope.to_string());
            write_json_atomic(self.workers_file(), &scopes)?;
        }
        Ok(())
    }

    /// Registered worker scopes
    pub fn workers(&self) -> VaultResult<Vec<String>> {
        read_json(self.workers_file())
    }

    /// Create (or reuse) the directory for a named cache
    pub fn open_cache(&self, name: &str) -> VaultResult<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(VaultError::Storage(format!("Invalid cache name: {:?}", name)));
        }
        let dir = self.caches_dir().join(name);
        fs::create_dir_all(&dir)
            .map_err(|e| VaultError::Io(format!("Failed to create cache {}: {}", name, e)))?;
        Ok(dir)
    }
}

impl OfflineCache for CacheDir {
    fn unregister_workers(&mut self) -> VaultResult<usize> {
        let scopes = self.workers()?;
        if self.workers_file().exists() {
            fs::remove_file(self.workers_file())
                .map_err(|e| VaultError::Io(format!("Failed to unregister workers: {}", e)))?;
        }
        Ok(scopes.len())
    }

    fn cache_names(&self) -> VaultResult<Vec<String>> {
        let dir = self.caches_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)
            .map_err(|e| VaultError::Io(format!("Failed to read cache directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_cache(&mut self, name: &str) -> VaultResult<bool> {
        let dir = self.caches_dir().join(name);
        if !dir.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir)
            .map_err(|e| VaultError::Io(format!("Failed to delete cache {}: {}", name, e)))?;
        Ok(true)
    }
}
