//! Fixed-capacity, newest-first list of finalized error entries.
//!
//! [`BoundedLog`] holds the pure list semantics only. Persistence and the
//! serialized read-modify-write cycle live in `conflog-db`.

use uuid::Uuid;

use crate::types::FinalizedLogEntry;

/// Maximum number of entries retained.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Prefix of store-assigned entry ids.
pub const LOG_ID_PREFIX: &str = "err_";

/// Generate a fresh, never-reused entry id.
pub fn new_log_id() -> String {
    format!("{LOG_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Newest-first list capped at a fixed capacity.
///
/// Inserting into a full log discards the oldest (tail) entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedLog {
    entries: Vec<FinalizedLogEntry>,
    capacity: usize,
}

impl Default for BoundedLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundedLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Wrap entries loaded from persistence, already newest first.
    ///
    /// Anything beyond capacity is dropped from the tail.
    pub fn from_entries(mut entries: Vec<FinalizedLogEntry>) -> Self {
        entries.truncate(MAX_LOG_ENTRIES);
        Self {
            entries,
            capacity: MAX_LOG_ENTRIES,
        }
    }

    /// Insert at the front, assigning an id when the entry has none.
    ///
    /// Returns the id of the stored entry.
    pub fn append(&mut self, mut entry: FinalizedLogEntry) -> String {
        if entry.id.is_empty() {
            entry.id = new_log_id();
        }
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        id
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[FinalizedLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<FinalizedLogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(message: &str) -> FinalizedLogEntry {
        FinalizedLogEntry {
            id: String::new(),
            timestamp: Utc::now(),
            message: message.into(),
            source: "https://site/app.js".into(),
            line: 1,
            column: 2,
            stack: String::new(),
            page_url: "https://site/".into(),
            page_hook: "frontend".into(),
            is_admin: false,
            user_agent: "test".into(),
            active_components: Vec::new(),
            suspected_component: None,
        }
    }

    #[test]
    fn append_inserts_at_front_with_fresh_id() {
        let mut log = BoundedLog::new();
        let first = log.append(entry("first"));
        let second = log.append(entry("second"));

        assert!(first.starts_with(LOG_ID_PREFIX));
        assert_ne!(first, second);
        assert_eq!(log.list()[0].message, "second");
        assert_eq!(log.list()[1].message, "first");
    }

    #[test]
    fn append_keeps_existing_id() {
        let mut log = BoundedLog::new();
        let mut e = entry("x");
        e.id = "custom".into();
        assert_eq!(log.append(e), "custom");
        assert_eq!(log.list()[0].id, "custom");
    }

    #[test]
    fn overflow_discards_oldest() {
        let mut log = BoundedLog::new();
        for i in 1..=101 {
            log.append(entry(&format!("error {i}")));
        }
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        assert_eq!(log.list()[0].message, "error 101");
        assert!(log.list().iter().all(|e| e.message != "error 1"));
        assert_eq!(log.list()[MAX_LOG_ENTRIES - 1].message, "error 2");
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut log = BoundedLog::new();
        log.append(entry("kept"));
        let before = log.clone();
        assert!(!log.remove_by_id("nope"));
        assert_eq!(log, before);
    }

    #[test]
    fn remove_existing_id() {
        let mut log = BoundedLog::new();
        let id = log.append(entry("gone"));
        log.append(entry("kept"));
        assert!(log.remove_by_id(&id));
        assert_eq!(log.len(), 1);
        assert_eq!(log.list()[0].message, "kept");
    }

    #[test]
    fn clear_empty_is_noop() {
        let mut log = BoundedLog::new();
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn from_entries_truncates_to_capacity() {
        let entries: Vec<_> = (0..150).map(|i| entry(&i.to_string())).collect();
        let log = BoundedLog::from_entries(entries);
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        assert_eq!(log.list()[0].message, "0");
    }

    #[test]
    fn round_trip_preserves_fields() {
        let mut log = BoundedLog::new();
        let original = entry("round trip");
        let id = log.append(original.clone());
        let stored = &log.list()[0];
        assert_eq!(FinalizedLogEntry { id, ..original }, *stored);
    }
}
