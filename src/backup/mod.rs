//! Backup system for StudyVault
//!
//! Exports the tracked application state to a snapshot file, restores it
//! from one, and erases it.
//!
//! # Architecture
//!
//! `BackupManager` works against three injected ports:
//!
//! - a [`KeyValueStore`](crate::storage::KeyValueStore) holding the state
//! - a [`Prompt`](crate::prompt::Prompt) that confirms destructive writes
//! - an [`OfflineCache`](crate::offline::OfflineCache) cleared on erase
//!
//! # Snapshot Format
//!
//! A snapshot is one JSON object: each present tracked key mapped to its
//! value (structured JSON when the stored text parses as such, the raw
//! string otherwise), plus a `_meta` record with `exportDate`, `version`
//! and `keys`.
//!
//! # Example
//!
//! ```rust,ignore
//! use studyvault::backup::{BackupManager, ImportOutcome};
//! use studyvault::prompt::TerminalPrompt;
//! use studyvault::storage::FileStore;
//!
//! let store = FileStore::open(paths.storage_file())?;
//! let mut manager = BackupManager::new(store, TerminalPrompt::stdio(), &settings);
//!
//! let artifact = manager.export_all()?;
//! let path = artifact.write_to(&export_dir)?;
//!
//! if let ImportOutcome::Restored(result) = manager.import_all(File::open(path)?)? {
//!     println!("{}", result.summary());
//! }
//! ```

mod erase;
mod keys;
mod manager;
mod restore;
mod snapshot;

pub use erase::{EraseOutcome, EraseReport};
pub use keys::{is_tracked, TRACKED_KEYS};
pub use manager::{BackupManager, ExportArtifact};
pub use restore::{ImportOutcome, RestoreResult, SnapshotSummary};
pub use snapshot::{
    decode_value, encode_value, Snapshot, SnapshotDocument, SnapshotMeta, META_KEY,
    SNAPSHOT_VERSION,
};
