//! Integration tests for [`ErrorLogStore`] over the in-memory backend.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Utc;
use conflog_core::log::MAX_LOG_ENTRIES;
use conflog_core::types::{ActiveComponent, Confidence, FinalizedLogEntry, SuspectedComponent};
use conflog_db::{DbError, ErrorLogStore, KvStore, MemoryKv, LOG_KEY};

fn entry(message: &str) -> FinalizedLogEntry {
    FinalizedLogEntry {
        id: String::new(),
        timestamp: Utc::now(),
        message: message.into(),
        source: "https://site/ext/slider/slider.js".into(),
        line: 42,
        column: 7,
        stack: "TypeError\n    at slider.js:42:7".into(),
        page_url: "https://site/admin".into(),
        page_hook: "dashboard".into(),
        is_admin: true,
        user_agent: "Mozilla/5.0".into(),
        active_components: vec![ActiveComponent {
            path: "slider/slider.php".into(),
            name: "Slider".into(),
            version: "2.1".into(),
        }],
        suspected_component: Some(SuspectedComponent {
            path: "slider/slider.php".into(),
            name: "Slider".into(),
            confidence: Confidence::High,
        }),
    }
}

fn store() -> ErrorLogStore {
    ErrorLogStore::new(Arc::new(MemoryKv::new()))
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    assert!(store().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn appended_entry_round_trips() {
    let store = store();
    let original = entry("boom");
    let id = store.append(original.clone()).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], FinalizedLogEntry { id, ..original });
}

#[tokio::test]
async fn capacity_evicts_oldest() {
    let store = store();
    for i in 1..=MAX_LOG_ENTRIES + 1 {
        store.append(entry(&format!("error {i}"))).await.unwrap();
    }

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), MAX_LOG_ENTRIES);
    assert_eq!(listed[0].message, format!("error {}", MAX_LOG_ENTRIES + 1));
    assert!(listed.iter().all(|e| e.message != "error 1"));
}

#[tokio::test]
async fn remove_unknown_id_leaves_store_unchanged() {
    let store = store();
    store.append(entry("kept")).await.unwrap();
    let before = store.list().await.unwrap();

    assert!(!store.remove_by_id("err_missing").await.unwrap());
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
async fn remove_known_id() {
    let store = store();
    let id = store.append(entry("gone")).await.unwrap();
    store.append(entry("kept")).await.unwrap();

    assert!(store.remove_by_id(&id).await.unwrap());
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message, "kept");
}

#[tokio::test]
async fn clear_empties_and_is_idempotent() {
    let store = store();
    store.clear().await.unwrap();
    store.append(entry("a")).await.unwrap();
    store.clear().await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_are_not_lost() {
    let store = Arc::new(store());
    let handles: Vec<_> = (0..40)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.append(entry(&format!("e{i}"))).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 40);
}

#[tokio::test]
async fn corrupt_value_is_reported() {
    let kv = Arc::new(MemoryKv::new());
    kv.set(LOG_KEY, serde_json::json!({"not": "a list"}))
        .await
        .unwrap();
    let store = ErrorLogStore::new(kv);

    assert_matches!(store.list().await, Err(DbError::Corrupt { .. }));
}
