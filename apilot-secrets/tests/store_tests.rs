//! Key store adapter tests over both shipped implementations.

use apilot_secrets::{FileKeyStore, KeyRecord, KeyStore, MemoryKeyStore, SecretsError};
use chrono::Utc;
use pretty_assertions::assert_eq;

fn record(material: &str) -> KeyRecord {
    KeyRecord {
        id: "apilot-primary-key".to_string(),
        key_material: material.to_string(),
        created_at: Utc::now(),
    }
}

// ── MemoryKeyStore ──

#[tokio::test]
async fn memory_store_round_trip() {
    let store = MemoryKeyStore::new();
    store.put(&record("bWF0ZXJpYWw=")).await.unwrap();

    let loaded = store.get("apilot-primary-key").await.unwrap().unwrap();
    assert_eq!(loaded.key_material, "bWF0ZXJpYWw=");

    store.delete("apilot-primary-key").await.unwrap();
    assert!(store.get("apilot-primary-key").await.unwrap().is_none());
}

#[tokio::test]
async fn memory_store_missing_record_is_none() {
    let store = MemoryKeyStore::new();
    assert!(store.get("apilot-primary-key").await.unwrap().is_none());
}

#[tokio::test]
async fn memory_store_put_replaces_wholesale() {
    let store = MemoryKeyStore::new();
    store.put(&record("Zmlyc3Q=")).await.unwrap();
    store.put(&record("c2Vjb25k")).await.unwrap();

    let loaded = store.get("apilot-primary-key").await.unwrap().unwrap();
    assert_eq!(loaded.key_material, "c2Vjb25k");
}

// ── FileKeyStore ──

#[tokio::test]
async fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path());

    store.put(&record("bWF0ZXJpYWw=")).await.unwrap();
    let loaded = store.get("apilot-primary-key").await.unwrap().unwrap();
    assert_eq!(loaded.key_material, "bWF0ZXJpYWw=");

    store.delete("apilot-primary-key").await.unwrap();
    assert!(store.get("apilot-primary-key").await.unwrap().is_none());
}

#[tokio::test]
async fn file_store_missing_record_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path());
    assert!(store.get("apilot-primary-key").await.unwrap().is_none());
}

#[tokio::test]
async fn file_store_delete_missing_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path());
    store.delete("apilot-primary-key").await.unwrap();
}

#[tokio::test]
async fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    FileKeyStore::new(dir.path())
        .put(&record("cGVyc2lzdGVk"))
        .await
        .unwrap();

    let reopened = FileKeyStore::new(dir.path());
    let loaded = reopened.get("apilot-primary-key").await.unwrap().unwrap();
    assert_eq!(loaded.key_material, "cGVyc2lzdGVk");
}

#[tokio::test]
async fn file_store_overwrites_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileKeyStore::new(dir.path());

    store.put(&record("Zmlyc3Q=")).await.unwrap();
    store.put(&record("c2Vjb25k")).await.unwrap();

    let loaded = store.get("apilot-primary-key").await.unwrap().unwrap();
    assert_eq!(loaded.key_material, "c2Vjb25k");
}

#[tokio::test]
async fn file_store_surfaces_corrupt_record_as_store_error() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("apilot-primary-key.json"), b"{ not json")
        .await
        .unwrap();

    let store = FileKeyStore::new(dir.path());
    let err = store.get("apilot-primary-key").await.unwrap_err();
    assert!(matches!(err, SecretsError::Store(_)));
}
