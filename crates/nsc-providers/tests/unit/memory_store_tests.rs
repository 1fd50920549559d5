//! In-memory store tests

use nsc_domain::ports::KeyValueStore;
use nsc_domain::value_objects::TransactionOp;
use nsc_providers::store::InMemoryStore;
use std::time::Duration;

#[tokio::test]
async fn test_set_get_exists_delete() {
    let store = InMemoryStore::new();
    store.set("k", "\"v\"", None).await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), Some("\"v\"".to_string()));
    assert!(store.exists("k").await.unwrap());

    let removed = store.delete(&["k".to_string(), "missing".to_string()]).await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(store.get("k").await.unwrap(), None);
    assert!(!store.exists("k").await.unwrap());
}

#[tokio::test]
async fn test_ttl_expires_entry() {
    let store = InMemoryStore::new();
    store
        .set("short", "1", Some(Duration::from_millis(20)))
        .await
        .unwrap();
    store.set("zero", "1", Some(Duration::ZERO)).await.unwrap();
    assert!(store.exists("short").await.unwrap());

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!store.exists("short").await.unwrap());
    assert!(store.exists("zero").await.unwrap(), "zero TTL means no expiry");
}

#[tokio::test]
async fn test_set_if_absent() {
    let store = InMemoryStore::new();
    assert!(store.set_if_absent("k", "1", None).await.unwrap());
    assert!(!store.set_if_absent("k", "2", None).await.unwrap());
    assert_eq!(store.get("k").await.unwrap(), Some("1".to_string()));
}

#[tokio::test]
async fn test_counters_auto_initialize() {
    let store = InMemoryStore::new();
    assert_eq!(store.increment_by("c", 5).await.unwrap(), 5);
    assert_eq!(store.decrement_by("c", 7).await.unwrap(), -2);
    assert_eq!(store.decrement_by("fresh", 1).await.unwrap(), -1);
}

#[tokio::test]
async fn test_counter_on_non_integer_fails() {
    let store = InMemoryStore::new();
    store.set("json", "\"text\"", None).await.unwrap();
    assert!(store.increment_by("json", 1).await.is_err());

    store.set("max", &i64::MAX.to_string(), None).await.unwrap();
    assert!(store.increment_by("max", 1).await.is_err());
}

#[tokio::test]
async fn test_scan_pages_until_cursor_zero() {
    let store = InMemoryStore::new();
    for i in 0..25 {
        store.set(&format!("ns:k{i:02}"), "1", None).await.unwrap();
    }
    store.set("other:k", "1", None).await.unwrap();

    let mut cursor = 0;
    let mut seen = Vec::new();
    loop {
        let page = store.scan(cursor, "ns:*", 10).await.unwrap();
        seen.extend(page.keys.iter().cloned());
        if page.is_last() {
            break;
        }
        cursor = page.cursor;
    }
    assert_eq!(seen.len(), 25);
    assert!(seen.iter().all(|k| k.starts_with("ns:")));
}

#[tokio::test]
async fn test_watch_commit_without_interference() {
    let store = InMemoryStore::new();
    store.set("k", "1", None).await.unwrap();

    let mut session = store.watch("k").await.unwrap();
    assert_eq!(session.get().await.unwrap(), Some("1".to_string()));
    assert!(session.commit(TransactionOp::Set("2".to_string())).await.unwrap());
    assert_eq!(store.get("k").await.unwrap(), Some("2".to_string()));
}

#[tokio::test]
async fn test_watch_aborts_after_concurrent_write() {
    let store = InMemoryStore::new();
    store.set("k", "1", None).await.unwrap();

    let session = store.watch("k").await.unwrap();
    store.set("k", "1", None).await.unwrap();

    assert!(!session.commit(TransactionOp::Set("2".to_string())).await.unwrap());
    assert_eq!(store.get("k").await.unwrap(), Some("1".to_string()));
}

#[tokio::test]
async fn test_watch_aborts_after_delete_and_recreate_of_absent_key() {
    let store = InMemoryStore::new();
    let session = store.watch("k").await.unwrap();
    store.set("k", "1", None).await.unwrap();
    store.delete(&["k".to_string()]).await.unwrap();

    assert!(!session.commit(TransactionOp::Delete).await.unwrap());
}

#[tokio::test]
async fn test_watch_aborts_when_key_expires() {
    let store = InMemoryStore::new();
    store
        .set("k", "1", Some(Duration::from_millis(20)))
        .await
        .unwrap();
    let session = store.watch("k").await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!session.commit(TransactionOp::Set("2".to_string())).await.unwrap());
    assert!(!store.exists("k").await.unwrap());
}

#[tokio::test]
async fn test_server_info_reports_no_version() {
    let store = InMemoryStore::new();
    let info = store.server_info().await.unwrap();
    assert_eq!(info.name, "memory");
    assert!(info.version.is_none());
    assert_eq!(store.provider_name(), "memory");
}

#[tokio::test]
async fn test_purge_keeps_live_keys() {
    let store = InMemoryStore::new();
    store.set("live", "1", None).await.unwrap();
    store.set("gone", "1", None).await.unwrap();
    store.delete(&["gone".to_string()]).await.unwrap();

    store.purge();

    assert_eq!(store.len(), 1);
    assert!(store.exists("live").await.unwrap());
}

#[tokio::test]
async fn test_tombstones_accumulate_until_purged() {
    let store = InMemoryStore::new();
    for i in 0..10 {
        let key = format!("k{i}");
        store.set(&key, "1", None).await.unwrap();
        store.delete(&[key]).await.unwrap();
    }
    store.set("short", "1", Some(Duration::from_millis(10))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(store.len(), 0);
    assert!(store.slot_count() >= 10);

    store.purge();

    assert_eq!(store.slot_count(), 0);
    assert!(store.is_empty());
}
