//! Audit logging system for StudyVault
//!
//! Records every completed export, import and erase in an append-only
//! line-delimited JSON log (`audit.log` in the base directory).
//!
//! # Example
//!
//! ```rust,ignore
//! use studyvault::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::new(Operation::Export, keys, Some(filename)))?;
//!
//! for entry in logger.read_recent(10)? {
//!     println!("{}", entry.format_human_readable());
//! }
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
