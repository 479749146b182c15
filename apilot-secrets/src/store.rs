//! Key record persistence.
//!
//! The primary key lives in exactly one [`KeyRecord`] under a fixed
//! identifier. Records are never mutated in place — a rotation writes a whole
//! new record. The store is an injected seam; [`MemoryKeyStore`] backs tests
//! and ephemeral profiles, [`FileKeyStore`] backs the desktop app data
//! directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::error::{SecretsError, SecretsResult};

/// Identifier of the singleton primary key record.
pub const KEY_RECORD_ID: &str = "apilot-primary-key";

/// A persisted symmetric key record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyRecord {
    pub id: String,
    /// base64-encoded raw 256-bit key bytes.
    pub key_material: String,
    pub created_at: DateTime<Utc>,
}

/// Adapter over whatever holds the key record.
///
/// `put` semantics are last-write-wins on identical identifiers.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Returns the record with the given identifier, if present.
    async fn get(&self, id: &str) -> SecretsResult<Option<KeyRecord>>;

    /// Inserts or replaces a record.
    async fn put(&self, record: &KeyRecord) -> SecretsResult<()>;

    /// Deletes a record. Deleting an absent record is not an error.
    async fn delete(&self, id: &str) -> SecretsResult<()>;
}

// ── MemoryKeyStore ──────────────────────────────────────────────

/// In-memory key store.
#[derive(Default)]
pub struct MemoryKeyStore {
    records: RwLock<HashMap<String, KeyRecord>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn get(&self, id: &str) -> SecretsResult<Option<KeyRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, record: &KeyRecord) -> SecretsResult<()> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> SecretsResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

// ── FileKeyStore ────────────────────────────────────────────────

/// Key store backed by one JSON document per record in a directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write never leaves a truncated record behind.
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn get(&self, id: &str) -> SecretsResult<Option<KeyRecord>> {
        match tokio::fs::read(self.record_path(id)).await {
            Ok(bytes) => {
                let record: KeyRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| SecretsError::Store(format!("corrupt key record: {e}")))?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SecretsError::Store(e.to_string())),
        }
    }

    async fn put(&self, record: &KeyRecord) -> SecretsResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SecretsError::Store(e.to_string()))?;

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| SecretsError::Store(e.to_string()))?;

        let path = self.record_path(&record.id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| SecretsError::Store(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| SecretsError::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> SecretsResult<()> {
        match tokio::fs::remove_file(self.record_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SecretsError::Store(e.to_string())),
        }
    }
}
