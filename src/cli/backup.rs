//! Backup CLI commands
//!
//! Implements export, import, erase and inspect.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::backup::{EraseOutcome, ImportOutcome};
use crate::config::paths::AppPaths;
use crate::config::settings::Settings;
use crate::error::{VaultError, VaultResult};
use crate::prompt::{AssumeYes, Prompt, TerminalPrompt};

use super::open_manager;

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Export all saved progress to a backup file
    Export {
        /// Directory to write the backup into (default: settings, then current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore saved progress from a backup file
    Import {
        /// Path to the backup file
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Permanently erase all saved progress and offline caches
    Erase,

    /// Show what a backup file contains without restoring it
    Inspect {
        /// Path to the backup file
        file: PathBuf,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &AppPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> VaultResult<()> {
    match cmd {
        BackupCommands::Export { out } => handle_export(paths, settings, out),
        BackupCommands::Import { file, yes } => {
            if yes {
                handle_import(paths, settings, &file, AssumeYes)
            } else {
                handle_import(paths, settings, &file, TerminalPrompt::stdio())
            }
        }
        BackupCommands::Erase => handle_erase(paths, settings),
        BackupCommands::Inspect { file } => handle_inspect(paths, settings, &file),
    }
}

fn handle_export(paths: &AppPaths, settings: &Settings, out: Option<PathBuf>) -> VaultResult<()> {
    let manager = open_manager(paths, settings, AssumeYes)?;

    let artifact = match manager.export_all() {
        Ok(artifact) => artifact,
        Err(VaultError::EmptyState) => {
            println!("Nothing to export: no saved progress found.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let dir = match out.or_else(|| settings.export_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let path = manager.save_export(&artifact, &dir)?;

    println!("Exported {} item(s): {}", artifact.key_count(), artifact.keys.join(", "));
    println!("Backup saved: {}", path.display());
    Ok(())
}

fn handle_import<P: Prompt>(
    paths: &AppPaths,
    settings: &Settings,
    file: &Path,
    prompt: P,
) -> VaultResult<()> {
    let source = open_backup(file)?;
    let mut manager = open_manager(paths, settings, prompt)?;

    match manager.import_all(source)? {
        ImportOutcome::Declined => {
            println!("Import cancelled. No changes were made.");
        }
        ImportOutcome::Restored(result) => {
            println!("{}", result.summary());
            if !result.ignored.is_empty() {
                println!(
                    "Ignored {} unrecognized key(s): {}",
                    result.ignored.len(),
                    result.ignored.join(", ")
                );
            }
            println!("Application state reloaded.");
        }
    }
    Ok(())
}

fn handle_erase(paths: &AppPaths, settings: &Settings) -> VaultResult<()> {
    println!("Erase All Data");
    println!("==============");
    println!("Storage: {}", paths.storage_file().display());
    println!("Offline caches: {}", paths.offline_dir().display());
    println!();

    let mut manager = open_manager(paths, settings, TerminalPrompt::stdio())?;

    match manager.erase_all()? {
        EraseOutcome::Declined => {
            println!("Erase cancelled. No changes were made.");
        }
        EraseOutcome::Erased(report) => {
            println!("{}", report.summary());
            println!("Application state reloaded.");
        }
    }
    Ok(())
}

fn handle_inspect(paths: &AppPaths, settings: &Settings, file: &Path) -> VaultResult<()> {
    let source = open_backup(file)?;
    let manager = open_manager(paths, settings, AssumeYes)?;
    let summary = manager.inspect(source)?;

    println!("Backup Details");
    println!("==============");
    println!("File: {}", file.display());
    match summary.export_date {
        Some(date) => println!("Created: {}", date.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Created: unknown"),
    }
    match summary.version {
        Some(version) => println!("Format version: {}", version),
        None => println!("Format version: unknown"),
    }
    println!();
    println!("Contents:");
    if summary.tracked.is_empty() {
        println!("  (no recognized items)");
    }
    for key in &summary.tracked {
        println!("  {}", key);
    }
    if !summary.untracked.is_empty() {
        println!("Ignored on import: {}", summary.untracked.join(", "));
    }
    println!();
    println!("Status: {}", summary.summary());
    if !summary.is_consistent() {
        println!("Warning: metadata key count does not match the file contents.");
    }
    Ok(())
}

fn open_backup(file: &Path) -> VaultResult<File> {
    File::open(file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VaultError::NotFound {
                entity_type: "Backup file",
                identifier: file.display().to_string(),
            }
        } else {
            VaultError::Io(format!("Failed to open {}: {}", file.display(), e))
        }
    })
}
