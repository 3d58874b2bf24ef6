//! Backup manager for StudyVault
//!
//! Owns the injected store, prompt and offline cache, and implements the
//! export operation. An export is audited once its file has been saved. Import lives in `restore.rs`, erase in `erase.rs`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::snapshot::Snapshot;
use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::settings::Settings;
use crate::error::{VaultError, VaultResult};
use crate::offline::{NoOfflineCache, OfflineCache};
use crate::prompt::Prompt;
use crate::storage::{write_text_atomic, KeyValueStore};

/// A serialized snapshot ready to be saved
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// `<product>-backup-YYYY-MM-DD.json`
    pub filename: String,
    /// Indented JSON document
    pub contents: String,
    /// Keys included, in tracked order
    pub keys: Vec<String>,
}

impl ExportArtifact {
    /// Number of keys included in the snapshot
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Save the artifact into `dir` under its own filename
    ///
    /// An existing file of the same name (an earlier export the same day) is
    /// replaced.
    pub fn write_to(&self, dir: &Path) -> VaultResult<PathBuf> {
        let path = dir.join(&self.filename);
        write_text_atomic(&path, &self.contents)?;
        Ok(path)
    }
}

/// Exports, restores and erases the tracked application state
pub struct BackupManager<S, P> {
    pub(super) store: S,
    pub(super) prompt: P,
    pub(super) offline: Box<dyn OfflineCache>,
    pub(super) product_name: String,
    pub(super) key_prefix: String,
    pub(super) audit: Option<AuditLogger>,
}

impl<S: KeyValueStore, P: Prompt> BackupManager<S, P> {
    /// Create a manager over `store`, asking `prompt` before destructive writes
    pub fn new(store: S, prompt: P, settings: &Settings) -> Self {
        Self {
            store,
            prompt,
            offline: Box::new(NoOfflineCache),
            product_name: settings.product_name.clone(),
            key_prefix: settings.key_prefix.clone(),
            audit: None,
        }
    }

    /// Clear `offline` during erase
    pub fn with_offline_cache(mut self, offline: impl OfflineCache + 'static) -> Self {
        self.offline = Box::new(offline);
        self
    }

    /// Record completed operations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Snapshot every present tracked key
    ///
    /// Read-only with respect to the store. Fails with
    /// [`VaultError::EmptyState`] when no tracked key is present.
    pub fn export_all(&self) -> VaultResult<ExportArtifact> {
        self.export_at(Utc::now())
    }

    /// [`export_all`](Self::export_all) with an explicit timestamp
    pub fn export_at(&self, now: DateTime<Utc>) -> VaultResult<ExportArtifact> {
        let snapshot = Snapshot::capture(&self.store, now)?;

        if snapshot.is_empty() {
            tracing::info!("export skipped: no tracked keys present");
            return Err(VaultError::EmptyState);
        }

        let artifact = ExportArtifact {
            filename: format!("{}-backup-{}.json", self.product_name, now.format("%Y-%m-%d")),
            contents: snapshot.to_json_pretty()?,
            keys: snapshot.keys(),
        };

        tracing::info!(
            keys = artifact.key_count(),
            filename = %artifact.filename,
            "snapshot exported"
        );

        Ok(artifact)
    }

    /// Save `artifact` into `dir` and record the completed export
    pub fn save_export(&self, artifact: &ExportArtifact, dir: &Path) -> VaultResult<PathBuf> {
        let path = artifact.write_to(dir)?;
        tracing::debug!(path = %path.display(), "export saved");
        self.record(
            Operation::Export,
            artifact.keys.clone(),
            Some(artifact.filename.clone()),
        );
        Ok(path)
    }

    /// Append to the audit log; a failure here never fails the operation
    pub(super) fn record(&self, operation: Operation, keys: Vec<String>, detail: Option<String>) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&AuditEntry::new(operation, keys, detail)) {
                tracing::warn!(error = %e, %operation, "failed to write audit entry");
            }
        }
    }
}
