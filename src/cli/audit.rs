//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::paths::AppPaths;
use crate::error::VaultResult;

/// Print the most recent `limit` audit entries, oldest first
pub fn handle_log_command(paths: &AppPaths, limit: usize) -> VaultResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No backup activity recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
