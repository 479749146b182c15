//! Primary key lifecycle.
//!
//! Provisions, loads, and caches the persisted primary key. The key record
//! outlives the process; the imported handle is cached for the process
//! lifetime and invalidated by [`PrimaryKeyManager::reset`].

use std::sync::Arc;

use apilot_crypto::{generate_key_bytes, KeyOrigin, SymmetricKey};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::error::{SecretsError, SecretsResult};
use crate::store::{KeyRecord, KeyStore, KEY_RECORD_ID};

/// Owns the get-or-create protocol for the persisted primary key.
pub struct PrimaryKeyManager {
    store: Arc<dyn KeyStore>,
    cached: RwLock<Option<SymmetricKey>>,
    /// Serializes first-run provisioning so concurrent callers create
    /// exactly one record. Cross-process races remain last-write-wins at
    /// the store, which orphans a key harmlessly.
    provision: Mutex<()>,
}

impl PrimaryKeyManager {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self {
            store,
            cached: RwLock::new(None),
            provision: Mutex::new(()),
        }
    }

    /// Returns the primary key, loading or provisioning it as needed.
    pub async fn get_or_create(&self) -> SecretsResult<SymmetricKey> {
        // Fast path: already imported this process
        {
            let cached = self.cached.read().await;
            if let Some(key) = cached.as_ref() {
                return Ok(key.clone());
            }
        }

        let _guard = self.provision.lock().await;

        // Re-check under the lock: another caller may have finished while we
        // waited.
        {
            let cached = self.cached.read().await;
            if let Some(key) = cached.as_ref() {
                return Ok(key.clone());
            }
        }

        let key = match self.store.get(KEY_RECORD_ID).await? {
            Some(record) => import_record(&record)?,
            None => self.provision_new().await?,
        };

        let mut cached = self.cached.write().await;
        *cached = Some(key.clone());
        Ok(key)
    }

    /// Deletes the key record and clears the cached key.
    ///
    /// Irrecoverably invalidates all ciphertext produced under the deleted
    /// key; gating this behind user confirmation is the caller's job.
    /// Deleting an absent record is not an error.
    pub async fn reset(&self) -> SecretsResult<()> {
        self.store.delete(KEY_RECORD_ID).await?;
        let mut cached = self.cached.write().await;
        *cached = None;
        warn!("primary key record deleted; prior ciphertext is no longer decryptable");
        Ok(())
    }

    async fn provision_new(&self) -> SecretsResult<SymmetricKey> {
        let bytes = generate_key_bytes();
        let record = KeyRecord {
            id: KEY_RECORD_ID.to_string(),
            key_material: STANDARD.encode(bytes.as_slice()),
            created_at: Utc::now(),
        };
        self.store
            .put(&record)
            .await
            .map_err(|e| SecretsError::KeyProvision(e.to_string()))?;

        // The store now holds the only recoverable copy; our buffer zeroizes
        // on drop.
        let key = SymmetricKey::import(bytes.as_slice(), KeyOrigin::Primary)
            .map_err(|e| SecretsError::KeyProvision(e.to_string()))?;
        debug!("provisioned new primary key record");
        Ok(key)
    }
}

fn import_record(record: &KeyRecord) -> SecretsResult<SymmetricKey> {
    let bytes = Zeroizing::new(
        STANDARD
            .decode(&record.key_material)
            .map_err(|e| SecretsError::KeyImport(format!("not valid base64: {e}")))?,
    );
    SymmetricKey::import(&bytes, KeyOrigin::Primary)
        .map_err(|e| SecretsError::KeyImport(e.to_string()))
}
