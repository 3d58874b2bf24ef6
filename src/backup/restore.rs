//! Backup restoration for StudyVault
//!
//! Handles restoring tracked keys from a snapshot document, and validating a
//! snapshot without restoring it.

use std::io::Read;

use chrono::{DateTime, Utc};

use super::keys::{is_tracked, TRACKED_KEYS};
use super::manager::BackupManager;
use super::snapshot::{decode_value, SnapshotDocument};
use crate::audit::Operation;
use crate::error::{VaultError, VaultResult};
use crate::prompt::Prompt;
use crate::storage::KeyValueStore;

/// Result of an import call
#[derive(Debug)]
pub enum ImportOutcome {
    /// The user confirmed and the keys were written
    Restored(RestoreResult),
    /// The user declined; nothing was written
    Declined,
}

/// What an import wrote
#[derive(Debug, Default)]
pub struct RestoreResult {
    /// Tracked keys written back, in tracked order
    pub restored: Vec<String>,
    /// Keys in the document that are not tracked and were skipped
    pub ignored: Vec<String>,
    /// Date the snapshot was taken, when its metadata is well-formed
    pub backup_date: Option<DateTime<Utc>>,
}

impl RestoreResult {
    pub fn restored_count(&self) -> usize {
        self.restored.len()
    }

    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        if self.restored.is_empty() {
            return "Restored 0 items".to_string();
        }
        format!(
            "Restored {} item(s): {}",
            self.restored.len(),
            self.restored.join(", ")
        )
    }
}

/// Result of validating a snapshot
#[derive(Debug)]
pub struct SnapshotSummary {
    /// Format version from the metadata
    pub version: Option<u32>,
    /// Date the snapshot was taken
    pub export_date: Option<DateTime<Utc>>,
    /// Key count the metadata declares
    pub declared_keys: Option<usize>,
    /// Tracked keys the document carries, in tracked order
    pub tracked: Vec<String>,
    /// Keys the document carries that import would ignore
    pub untracked: Vec<String>,
}

impl SnapshotSummary {
    /// Whether the metadata is well-formed and its key count matches the entries
    pub fn is_consistent(&self) -> bool {
        self.declared_keys == Some(self.tracked.len() + self.untracked.len())
    }

    /// Get a one-line description of the snapshot
    pub fn summary(&self) -> String {
        let version = self
            .version
            .map(|v| format!("v{}", v))
            .unwrap_or_else(|| "unknown version".to_string());

        if self.untracked.is_empty() {
            format!("Backup ({}): {} item(s)", version, self.tracked.len())
        } else {
            format!(
                "Backup ({}): {} item(s), {} unrecognized key(s) will be ignored",
                version,
                self.tracked.len(),
                self.untracked.len()
            )
        }
    }
}

fn summarize(document: &SnapshotDocument) -> SnapshotSummary {
    let meta = document.meta();
    let raw_meta = document.raw_meta();

    SnapshotSummary {
        version: meta.as_ref().map(|m| m.version).or_else(|| {
            raw_meta
                .get("version")
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
        }),
        export_date: meta.as_ref().map(|m| m.export_date),
        declared_keys: meta.as_ref().map(|m| m.keys),
        tracked: TRACKED_KEYS
            .iter()
            .filter(|key| document.get(key).is_some())
            .map(|key| key.to_string())
            .collect(),
        untracked: document
            .keys()
            .filter(|key| !is_tracked(key))
            .cloned()
            .collect(),
    }
}

fn read_document<R: Read>(mut source: R) -> VaultResult<SnapshotDocument> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|e| VaultError::Io(format!("Failed to read backup file: {}", e)))?;
    SnapshotDocument::parse(&bytes)
}

impl<S: KeyValueStore, P: Prompt> BackupManager<S, P> {
    /// Restore tracked keys from a snapshot read from `source`
    ///
    /// Nothing is written unless the document parses, carries metadata and
    /// the user confirms. Tracked keys missing from the document are left
    /// alone; untracked document keys are skipped. Once writing starts each
    /// key is written independently, with no rollback.
    pub fn import_all<R: Read>(&mut self, source: R) -> VaultResult<ImportOutcome> {
        let document = read_document(source)?;
        let summary = summarize(&document);

        let question = match summary.export_date {
            Some(date) => format!(
                "Restore {} item(s) from the backup of {}? This overwrites your current progress.",
                summary.tracked.len(),
                date.format("%Y-%m-%d %H:%M UTC")
            ),
            None => format!(
                "Restore {} item(s) from this backup? This overwrites your current progress.",
                summary.tracked.len()
            ),
        };

        if !self.prompt.confirm(&question) {
            tracing::info!("import declined");
            return Ok(ImportOutcome::Declined);
        }

        let mut result = RestoreResult {
            restored: Vec::new(),
            ignored: summary.untracked,
            backup_date: summary.export_date,
        };

        for key in TRACKED_KEYS {
            if let Some(value) = document.get(key) {
                self.store.set(key, &decode_value(value))?;
                tracing::debug!(key, "restored");
                result.restored.push(key.to_string());
            }
        }

        tracing::info!(
            restored = result.restored_count(),
            ignored = result.ignored.len(),
            "snapshot imported"
        );
        self.record(
            Operation::Import,
            result.restored.clone(),
            result
                .backup_date
                .map(|d| format!("backup of {}", d.format("%Y-%m-%d"))),
        );

        self.store.reload()?;

        Ok(ImportOutcome::Restored(result))
    }

    /// Validate a snapshot without prompting or writing
    pub fn inspect<R: Read>(&self, source: R) -> VaultResult<SnapshotSummary> {
        let document = read_document(source)?;
        Ok(summarize(&document))
    }
}
