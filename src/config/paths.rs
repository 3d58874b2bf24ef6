//! Path management for StudyVault
//!
//! Provides XDG-compliant path resolution for configuration, stored state,
//! offline caches and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `STUDYVAULT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/studyvault` or `~/.config/studyvault`
//! 3. Windows: `%APPDATA%\studyvault`

use std::path::PathBuf;

use crate::error::VaultError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "STUDYVAULT_DATA_DIR";

/// Manages all paths used by StudyVault
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Base directory for all StudyVault data
    base_dir: PathBuf,
}

impl AppPaths {
    /// Create a new AppPaths instance
    ///
    /// Path resolution:
    /// 1. `STUDYVAULT_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/studyvault` or `~/.config/studyvault`
    /// 3. Windows: `%APPDATA%\studyvault`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AppPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/studyvault/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/studyvault/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the offline cache directory (~/.config/studyvault/offline/)
    pub fn offline_dir(&self) -> PathBuf {
        self.base_dir.join("offline")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to storage.json (the key-value store)
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir().join("storage.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            return Ok(PathBuf::from(config_home).join("studyvault"));
        }
    }

    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| VaultError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("studyvault"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| VaultError::Config("Could not determine APPDATA directory".into()))?;
    Ok(dirs.config_dir().join("studyvault"))
}
