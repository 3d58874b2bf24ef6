//! User settings for StudyVault
//!
//! Manages the product name used for backup filenames, the namespace prefix
//! swept on erase, and export/audit preferences.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::VaultError;

/// User settings for StudyVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Product name used in backup filenames (`<product>-backup-YYYY-MM-DD.json`)
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Namespace prefix of application keys; erase removes every key carrying it
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Directory exports are written to when `--out` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Whether completed backup operations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_product_name() -> String {
    "studyvault".to_string()
}

fn default_key_prefix() -> String {
    "studyvault-".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            product_name: default_product_name(),
            key_prefix: default_key_prefix(),
            export_dir: None,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                VaultError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), VaultError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VaultError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            VaultError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would make erase or export misbehave
    fn validate(&self) -> Result<(), VaultError> {
        // An empty prefix would match every key in the store.
        if self.key_prefix.is_empty() {
            return Err(VaultError::Config("key_prefix must not be empty".into()));
        }
        if self.product_name.trim().is_empty() {
            return Err(VaultError::Config("product_name must not be empty".into()));
        }
        // The product name becomes part of the export filename.
        if self.product_name.contains(['/', '\\']) || self.product_name.contains("..") {
            return Err(VaultError::Config(format!(
                "product_name must not contain path separators or '..': {:?}",
                self.product_name
            )));
        }
        Ok(())
    }
}
