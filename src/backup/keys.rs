//! The tracked key set
//!
//! Every unit of application state the backup manager exports, restores and
//! erases. Order only matters for output: export writes entries, and import
//! restores them, in this order.

/// Storage keys that make up the application state
pub const TRACKED_KEYS: [&str; 12] = [
    "progress",
    "exercise-progress",
    "srs-state",
    "notes",
    "last-module",
    "theme",
    "focus-mode",
    "timer-sound",
    "sidebar-open",
    "streak",
    "activity-calendar",
    "session",
];

/// Whether `key` belongs to the tracked set
pub fn is_tracked(key: &str) -> bool {
    TRACKED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let unique: HashSet<_> = TRACKED_KEYS.iter().collect();
        assert_eq!(unique.len(), TRACKED_KEYS.len());
    }

    #[test]
    fn test_is_tracked() {
        assert!(is_tracked("progress"));
        assert!(is_tracked("theme"));
        assert!(!is_tracked("_meta"));
        assert!(!is_tracked("Progress"));
    }
}
