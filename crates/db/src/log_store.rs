//! Persisted bounded error log with serialized mutation.
//!
//! Every mutation is a read-modify-write of the whole list. Mutations take a
//! single writer lock so two reports received at the same moment cannot
//! overwrite each other's append. Reads go straight to the backend.

use std::sync::Arc;

use conflog_core::log::BoundedLog;
use conflog_core::types::FinalizedLogEntry;
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::kv::KvStore;

/// Key under which the log list is persisted.
pub const LOG_KEY: &str = "conflog_error_logs";

pub struct ErrorLogStore {
    kv: Arc<dyn KvStore>,
    write_lock: Mutex<()>,
}

impl ErrorLogStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Insert a finalized entry at the front, evicting the oldest entry when
    /// full. Returns the stored id.
    pub async fn append(&self, entry: FinalizedLogEntry) -> Result<String, DbError> {
        let _guard = self.write_lock.lock().await;
        let mut log = self.load().await?;
        let id = log.append(entry);
        self.save(log).await?;
        tracing::debug!(log_id = %id, "Error log entry appended");
        Ok(id)
    }

    /// Delete the entry with `id`. Deleting an unknown id is not an error.
    pub async fn remove_by_id(&self, id: &str) -> Result<bool, DbError> {
        let _guard = self.write_lock.lock().await;
        let mut log = self.load().await?;
        let removed = log.remove_by_id(id);
        if removed {
            self.save(log).await?;
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), DbError> {
        let _guard = self.write_lock.lock().await;
        self.save(BoundedLog::new()).await
    }

    /// Snapshot of all entries, newest first.
    pub async fn list(&self) -> Result<Vec<FinalizedLogEntry>, DbError> {
        Ok(self.load().await?.into_entries())
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.kv.ping().await
    }

    async fn load(&self) -> Result<BoundedLog, DbError> {
        let Some(value) = self.kv.get(LOG_KEY).await? else {
            return Ok(BoundedLog::new());
        };
        let entries: Vec<FinalizedLogEntry> =
            serde_json::from_value(value).map_err(|e| DbError::Corrupt {
                key: LOG_KEY.to_string(),
                reason: e.to_string(),
            })?;
        Ok(BoundedLog::from_entries(entries))
    }

    async fn save(&self, log: BoundedLog) -> Result<(), DbError> {
        let value = serde_json::to_value(log.into_entries())?;
        self.kv.set(LOG_KEY, value).await
    }
}
