//! Bounded FIFO of not-yet-delivered records with duplicate suppression.

use std::collections::VecDeque;

use conflog_core::types::ErrorRecord;

/// Maximum number of records waiting for delivery.
pub const MAX_QUEUE_SIZE: usize = 10;

const KEY_SEPARATOR: char = '\u{1f}';

/// Key under which equivalent records collapse.
pub fn dedup_key(record: &ErrorRecord) -> String {
    format!("{}{KEY_SEPARATOR}{}", record.message, record.source)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub dedup_key: String,
    pub record: ErrorRecord,
}

/// At most one entry per dedup key, at most `capacity` entries.
///
/// A full queue declines new records rather than evicting old ones; entries
/// only leave through [`pop_front`](DedupQueue::pop_front).
#[derive(Debug)]
pub struct DedupQueue {
    entries: VecDeque<QueueEntry>,
    capacity: usize,
}

impl Default for DedupQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupQueue {
    pub fn new() -> Self {
        Self::with_capacity(MAX_QUEUE_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `record` unless its key is already queued or the queue is
    /// full. Returns whether the record was accepted.
    pub fn enqueue(&mut self, record: ErrorRecord) -> bool {
        let key = dedup_key(&record);
        if self.entries.iter().any(|e| e.dedup_key == key) {
            tracing::trace!(message = %record.message, "Duplicate error declined");
            return false;
        }
        if self.entries.len() >= self.capacity {
            tracing::trace!(message = %record.message, "Error queue full, declined");
            return false;
        }
        self.entries.push_back(QueueEntry {
            dedup_key: key,
            record,
        });
        true
    }

    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
