//! Offline caches
//!
//! The course site registers a background worker that keeps named caches of
//! pages for offline use. Erase clears both through the [`OfflineCache`]
//! port; everything here is best-effort from the caller's point of view.

mod cache_dir;

pub use cache_dir::CacheDir;

use crate::error::VaultResult;

/// Background workers and named caches belonging to the application
pub trait OfflineCache {
    /// Unregister every background worker; returns how many were registered
    fn unregister_workers(&mut self) -> VaultResult<usize>;

    /// Names of every cache the application owns
    fn cache_names(&self) -> VaultResult<Vec<String>>;

    /// Delete one named cache; returns whether it existed
    fn delete_cache(&mut self, name: &str) -> VaultResult<bool>;
}

/// For hosts with no offline support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOfflineCache;

impl OfflineCache for NoOfflineCache {
    fn unregister_workers(&mut self) -> VaultResult<usize> {
        Ok(0)
    }

    fn cache_names(&self) -> VaultResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn delete_cache(&mut self, _name: &str) -> VaultResult<bool> {
        Ok(false)
    }
}
