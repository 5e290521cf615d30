//! Active-component snapshot supplied by the host application.
//!
//! The host describes what it has enabled in a JSON document:
//!
//! ```json
//! {
//!   "components": [{ "path": "slider/slider.php", "name": "Slider", "version": "2.1" }],
//!   "theme": { "id": "storefront", "name": "Storefront" }
//! }
//! ```
//!
//! A snapshot is taken once per request. A missing or unreadable document
//! degrades to an empty snapshot so error receipt never fails on it.

use std::path::PathBuf;

use async_trait::async_trait;
use conflog_core::types::ComponentSnapshot;

#[async_trait]
pub trait ComponentSource: Send + Sync {
    async fn snapshot(&self) -> ComponentSnapshot;
}

/// A fixed snapshot, used when no components file is configured and in tests.
pub struct StaticComponents(pub ComponentSnapshot);

#[async_trait]
impl ComponentSource for StaticComponents {
    async fn snapshot(&self) -> ComponentSnapshot {
        self.0.clone()
    }
}

/// Reads the snapshot document from disk on every call, so host changes are
/// picked up without a restart.
pub struct FileComponents {
    path: PathBuf,
}

impl FileComponents {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ComponentSource for FileComponents {
    async fn snapshot(&self) -> ComponentSnapshot {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Components file unreadable");
                return ComponentSnapshot::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Components file malformed");
                ComponentSnapshot::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn file_snapshot_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"components":[{{"path":"a/a.php","name":"A","version":"1"}}],"theme":{{"id":"t","name":"T"}}}}"#
        )
        .unwrap();

        let snapshot = FileComponents::new(file.path()).snapshot().await;
        assert_eq!(snapshot.components.len(), 1);
        assert_eq!(snapshot.components[0].name, "A");
        assert_eq!(snapshot.theme.id, "t");
    }

    #[tokio::test]
    async fn file_changes_are_seen_on_next_snapshot() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = FileComponents::new(file.path());

        std::fs::write(file.path(), r#"{"theme":{"id":"old","name":"Old"}}"#).unwrap();
        assert_eq!(source.snapshot().await.theme.id, "old");

        std::fs::write(file.path(), r#"{"theme":{"id":"new","name":"New"}}"#).unwrap();
        assert_eq!(source.snapshot().await.theme.id, "new");
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty() {
        let snapshot = FileComponents::new("/nonexistent/components.json")
            .snapshot()
            .await;
        assert_eq!(snapshot, ComponentSnapshot::default());
    }

    #[tokio::test]
    async fn malformed_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let snapshot = FileComponents::new(file.path()).snapshot().await;
        assert!(snapshot.components.is_empty());
    }
}
