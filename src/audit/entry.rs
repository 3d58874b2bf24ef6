//! Audit entry data structures
//!
//! Defines the backup operations that are audited and the entry format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backup operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// State was exported to a snapshot
    Export,
    /// State was restored from a snapshot
    Import,
    /// All state was erased
    Erase,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Export => write!(f, "EXPORT"),
            Operation::Import => write!(f, "IMPORT"),
            Operation::Erase => write!(f, "ERASE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation completed (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Storage keys the operation touched, in processing order
    #[serde(default)]
    pub keys: Vec<String>,

    /// Free-form detail (artifact name, source file, counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    pub fn new(operation: Operation, keys: Vec<String>, detail: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            keys,
            detail,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} key(s)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.keys.len()
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        if !self.keys.is_empty() {
            output.push_str(&format!("\n  Keys: {}", self.keys.join(", ")));
        }

        output
    }
}
