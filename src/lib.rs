//! StudyVault - local progress store and backup manager
//!
//! This library keeps the saved state of a self-paced course site (module
//! progress, spaced-repetition state, notes, streaks, theme and other UI
//! preferences) in a string key-value store, and provides the backup
//! manager that exports, restores and erases all of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: Key-value store port with file-backed and in-memory stores
//! - `prompt`: Confirmation port for destructive operations
//! - `offline`: Offline worker/cache port cleared on erase
//! - `backup`: Snapshot export, import and erase
//! - `audit`: Audit log of completed backup operations
//! - `logging`: Diagnostic logging setup
//! - `cli`: Command handlers for the `studyvault` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use studyvault::backup::BackupManager;
//! use studyvault::config::{paths::AppPaths, settings::Settings};
//! use studyvault::prompt::TerminalPrompt;
//! use studyvault::storage::FileStore;
//!
//! let paths = AppPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = FileStore::open(paths.storage_file())?;
//!
//! let manager = BackupManager::new(store, TerminalPrompt::stdio(), &settings);
//! let artifact = manager.export_all()?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod offline;
pub mod prompt;
pub mod storage;

pub use error::{VaultError, VaultResult};
