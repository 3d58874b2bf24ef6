//! Direct access to stored keys
//!
//! Lets the user (and scripts standing in for the course site) read and write
//! the key-value store the backup commands operate on.

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use crate::backup::is_tracked;
use crate::config::paths::AppPaths;
use crate::error::{VaultError, VaultResult};
use crate::storage::{FileStore, KeyValueStore};

/// Longest value preview shown in `keys`
const PREVIEW_CHARS: usize = 40;

/// Store subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Print the raw value stored under a key
    Get {
        /// Storage key
        key: String,
    },

    /// Store a raw value under a key
    Set {
        /// Storage key
        key: String,
        /// Value, stored verbatim
        value: String,
    },

    /// Remove a key
    Remove {
        /// Storage key
        key: String,
    },

    /// List stored keys
    Keys,
}

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Tracked")]
    tracked: &'static str,
    #[tabled(rename = "Bytes")]
    bytes: usize,
    #[tabled(rename = "Value")]
    preview: String,
}

/// Handle a store command
pub fn handle_store_command(paths: &AppPaths, cmd: StoreCommands) -> VaultResult<()> {
    let mut store = FileStore::open(paths.storage_file())?;

    match cmd {
        StoreCommands::Get { key } => {
            let value = store.get(&key)?.ok_or_else(|| VaultError::key_not_found(&key))?;
            println!("{}", value);
        }
        StoreCommands::Set { key, value } => {
            store.set(&key, &value)?;
            tracing::info!(key = %key, bytes = value.len(), "key set");
        }
        StoreCommands::Remove { key } => {
            if !store.remove(&key)? {
                return Err(VaultError::key_not_found(key));
            }
            tracing::info!(key = %key, "key removed");
        }
        StoreCommands::Keys => {
            let rows = store
                .keys()?
                .into_iter()
                .map(|key| {
                    let value = store.get(&key)?.unwrap_or_default();
                    Ok::<_, VaultError>(KeyRow {
                        tracked: if is_tracked(&key) { "yes" } else { "" },
                        bytes: value.len(),
                        preview: preview(&value),
                        key,
                    })
                })
                .collect::<VaultResult<Vec<_>>>()?;

            if rows.is_empty() {
                println!("No saved keys.");
                return Ok(());
            }

            let count = rows.len();
            println!("{}", Table::new(rows).with(Style::sharp()));
            println!("Total: {} key(s)", count);
        }
    }

    Ok(())
}

fn preview(value: &str) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_value_unchanged() {
        assert_eq!(preview("dark"), "dark");
    }

    #[test]
    fn test_preview_truncates_long_value() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("line one\nline two"), "line one line two");
    }
}
