//! Erasing all application state
//!
//! The only operation with no undo. It always asks twice.

use super::keys::TRACKED_KEYS;
use super::manager::BackupManager;
use crate::audit::Operation;
use crate::error::VaultResult;
use crate::prompt::Prompt;
use crate::storage::KeyValueStore;

const FIRST_WARNING: &str =
    "This permanently deletes all progress, notes, streaks and settings. It cannot be undone. Continue?";

const SECOND_WARNING: &str =
    "Are you absolutely sure? Export a backup first if you want to keep a copy. Erase everything?";

/// Result of an erase call
#[derive(Debug)]
pub enum EraseOutcome {
    /// Both confirmations were given and the state is gone
    Erased(EraseReport),
    /// One of the confirmations was declined; nothing changed
    Declined,
}

/// What an erase removed
#[derive(Debug, Default)]
pub struct EraseReport {
    /// Tracked keys that were present
    pub tracked_removed: Vec<String>,
    /// Other keys carrying the application prefix
    pub prefixed_removed: Vec<String>,
    /// Background workers unregistered
    pub workers_unregistered: usize,
    /// Offline caches deleted
    pub caches_deleted: Vec<String>,
}

impl EraseReport {
    pub fn keys_removed(&self) -> usize {
        self.tracked_removed.len() + self.prefixed_removed.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Erased {} key(s) ({} tracked, {} prefixed), {} offline cache(s), {} worker(s)",
            self.keys_removed(),
            self.tracked_removed.len(),
            self.prefixed_removed.len(),
            self.caches_deleted.len(),
            self.workers_unregistered
        )
    }
}

impl<S: KeyValueStore, P: Prompt> BackupManager<S, P> {
    /// Delete every tracked key, every prefixed key and all offline caches
    ///
    /// Requires two separate confirmations. After the tracked keys are gone a
    /// second pass removes any key starting with the configured prefix, which
    /// catches keys written by newer versions that this build doesn't track.
    /// Offline cleanup is best-effort: failures are logged, not returned.
    pub fn erase_all(&mut self) -> VaultResult<EraseOutcome> {
        if !self.prompt.confirm(FIRST_WARNING) {
            tracing::info!("erase declined at first confirmation");
            return Ok(EraseOutcome::Declined);
        }
        if !self.prompt.confirm(SECOND_WARNING) {
            tracing::info!("erase declined at second confirmation");
            return Ok(EraseOutcome::Declined);
        }

        let mut report = EraseReport::default();

        for key in TRACKED_KEYS {
            if self.store.remove(key)? {
                report.tracked_removed.push(key.to_string());
            }
        }

        let prefixed: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.key_prefix))
            .collect();
        for key in prefixed {
            if self.store.remove(&key)? {
                report.prefixed_removed.push(key);
            }
        }

        self.clear_offline(&mut report);

        tracing::info!(
            tracked = report.tracked_removed.len(),
            prefixed = report.prefixed_removed.len(),
            caches = report.caches_deleted.len(),
            "all state erased"
        );

        let mut keys = report.tracked_removed.clone();
        keys.extend(report.prefixed_removed.iter().cloned());
        self.record(Operation::Erase, keys, Some(report.summary()));

        self.store.reload()?;

        Ok(EraseOutcome::Erased(report))
    }

    fn clear_offline(&mut self, report: &mut EraseReport) {
        match self.offline.unregister_workers() {
            Ok(count) => report.workers_unregistered = count,
            Err(e) => tracing::warn!(error = %e, "failed to unregister offline workers"),
        }

        let names = match self.offline.cache_names() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list offline caches");
                return;
            }
        };

        for name in names {
            match self.offline.delete_cache(&name) {
                Ok(true) => report.caches_deleted.push(name),
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, cache = %name, "failed to delete offline cache"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::error::VaultError;
    use crate::offline::{CacheDir, OfflineCache};
    use crate::prompt::ScriptedPrompt;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn populated_store() -> MemoryStore {
        MemoryStore::with_entries([
            ("progress", r#"{"module1":true}"#),
            ("theme", "dark"),
            ("streak", "4"),
            ("studyvault-xp", "1200"),
            ("studyvault-compendium", "[]"),
            ("other-site", "keep me"),
        ])
    }

    fn manager(answers: &[bool]) -> BackupManager<MemoryStore, ScriptedPrompt> {
        BackupManager::new(
            populated_store(),
            ScriptedPrompt::new(answers.iter().copied()),
            &Settings::default(),
        )
    }

    /// Offline cache whose every call fails
    struct BrokenCache;

    impl OfflineCache for BrokenCache {
        fn unregister_workers(&mut self) -> VaultResult<usize> {
            Err(VaultError::Io("denied".into()))
        }

        fn cache_names(&self) -> VaultResult<Vec<String>> {
            Err(VaultError::Io("denied".into()))
        }

        fn delete_cache(&mut self, _name: &str) -> VaultResult<bool> {
            Err(VaultError::Io("denied".into()))
        }
    }

    #[test]
    fn test_erase_removes_tracked_and_prefixed() {
        let mut manager = manager(&[true, true]);

        let EraseOutcome::Erased(report) = manager.erase_all().unwrap() else {
            panic!("erase was declined");
        };

        assert_eq!(report.tracked_removed, vec!["progress", "theme", "streak"]);
        assert_eq!(
            report.prefixed_removed,
            vec!["studyvault-compendium", "studyvault-xp"]
        );
        assert_eq!(manager.store().keys().unwrap(), vec!["other-site"]);
        assert_eq!(manager.store().reload_count(), 1);
        assert_eq!(manager.prompt().asked().len(), 2);
    }

    #[test]
    fn test_first_decline_changes_nothing() {
        let mut manager = manager(&[false, true]);

        assert!(matches!(manager.erase_all().unwrap(), EraseOutcome::Declined));
        assert_eq!(manager.store().len(), 6);
        assert_eq!(manager.prompt().asked().len(), 1);
    }

    #[test]
    fn test_second_decline_changes_nothing() {
        let mut manager = manager(&[true, false]);

        assert!(matches!(manager.erase_all().unwrap(), EraseOutcome::Declined));
        assert_eq!(manager.store().len(), 6);
        assert_eq!(manager.store().reload_count(), 0);
        assert_eq!(manager.prompt().asked(), [FIRST_WARNING, SECOND_WARNING]);
    }

    #[test]
    fn test_custom_prefix() {
        let mut settings = Settings::default();
        settings.key_prefix = "other-".to_string();
        let mut manager = BackupManager::new(
            populated_store(),
            ScriptedPrompt::always_yes(),
            &settings,
        );

        let EraseOutcome::Erased(report) = manager.erase_all().unwrap() else {
            panic!("erase was declined");
        };

        assert_eq!(report.prefixed_removed, vec!["other-site"]);
        assert!(manager.store().get("studyvault-xp").unwrap().is_some());
    }

    #[test]
    fn test_offline_caches_cleared() {
        let temp = TempDir::new().unwrap();
        let caches = CacheDir::new(temp.path());
        caches.register_worker("/").unwrap();
        caches.open_cache("pages-v3").unwrap();
        caches.open_cache("fonts-v1").unwrap();

        let mut manager = manager(&[true, true]).with_offline_cache(caches.clone());
        let EraseOutcome::Erased(report) = manager.erase_all().unwrap() else {
            panic!("erase was declined");
        };

        assert_eq!(report.workers_unregistered, 1);
        assert_eq!(report.caches_deleted, vec!["fonts-v1", "pages-v3"]);
        assert!(caches.cache_names().unwrap().is_empty());
        assert!(caches.workers().unwrap().is_empty());
    }

    #[test]
    fn test_offline_failures_are_swallowed() {
        let mut manager = manager(&[true, true]).with_offline_cache(BrokenCache);

        let EraseOutcome::Erased(report) = manager.erase_all().unwrap() else {
            panic!("erase was declined");
        };

        assert_eq!(report.workers_unregistered, 0);
        assert!(report.caches_deleted.is_empty());
        assert_eq!(report.keys_removed(), 5);
    }

    #[test]
    fn test_erase_on_empty_store() {
        let mut manager = BackupManager::new(
            MemoryStore::new(),
            ScriptedPrompt::always_yes(),
            &Settings::default(),
        );

        let EraseOutcome::Erased(report) = manager.erase_all().unwrap() else {
            panic!("erase was declined");
        };
        assert_eq!(report.keys_removed(), 0);
        assert!(report.summary().starts_with("Erased 0 key(s)"));
    }
}
