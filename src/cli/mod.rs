//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup manager.

pub mod audit;
pub mod backup;
pub mod store;

pub use audit::handle_log_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use store::{handle_store_command, StoreCommands};

use crate::audit::AuditLogger;
use crate::backup::BackupManager;
use crate::config::paths::AppPaths;
use crate::config::settings::Settings;
use crate::error::VaultResult;
use crate::offline::CacheDir;
use crate::prompt::Prompt;
use crate::storage::FileStore;

/// Build a manager over the on-disk store and offline caches
pub fn open_manager<P: Prompt>(
    paths: &AppPaths,
    settings: &Settings,
    prompt: P,
) -> VaultResult<BackupManager<FileStore, P>> {
    let store = FileStore::open(paths.storage_file())?;
    let manager = BackupManager::new(store, prompt, settings)
        .with_offline_cache(CacheDir::new(paths.offline_dir()));

    Ok(if settings.audit_enabled {
        manager.with_audit(AuditLogger::new(paths.audit_log()))
    } else {
        manager
    })
}
