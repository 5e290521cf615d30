//! Key-value persistence collaborator.
//!
//! The error log is stored as one JSON document under a well-known key, so
//! the only contract needed from a backend is whole-value get and set.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DbError;

/// Whole-value JSON storage keyed by name.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DbError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DbError>;

    /// Cheap reachability check used by health checks.
    async fn ping(&self) -> Result<(), DbError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryKv {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DbError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DbError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let kv = MemoryKv::new();
        assert!(kv.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let kv = MemoryKv::new();
        kv.set("k", serde_json::json!([1, 2])).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), Some(serde_json::json!([1, 2])));
    }

    #[tokio::test]
    async fn set_overwrites() {
        let kv = MemoryKv::new();
        kv.set("k", serde_json::json!(1)).await.unwrap();
        kv.set("k", serde_json::json!(2)).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), Some(serde_json::json!(2)));
    }
}
