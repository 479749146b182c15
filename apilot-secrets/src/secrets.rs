//! Migration-aware secret encryption.
//!
//! New ciphertext is always produced under the persisted primary key.
//! Decryption tries the primary key first, then the legacy fallback key; a
//! fallback hit is flagged on the result so the caller can re-encrypt and
//! persist the upgraded envelope.

use std::sync::Arc;

use apilot_crypto::{decrypt_string, encrypt_string};
use tracing::warn;

use crate::error::{SecretsError, SecretsResult};
use crate::fallback::{derive_fallback_key, EnvironmentProfile};
use crate::manager::PrimaryKeyManager;
use crate::store::KeyStore;

/// Outcome of a migration-aware decryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptedSecret {
    pub plaintext: String,
    /// True when the envelope only opened under the legacy fallback key.
    /// The caller should re-encrypt and persist the upgraded envelope.
    pub migrated_from_fallback: bool,
}

/// Facade over the primary key manager and the two-tier decrypt protocol.
pub struct SecretManager {
    keys: PrimaryKeyManager,
    env: EnvironmentProfile,
}

impl SecretManager {
    /// Creates a manager sampling the running environment for the fallback
    /// tier.
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self::with_environment(store, EnvironmentProfile::current())
    }

    /// Creates a manager with an explicit environment profile (tests, or
    /// migrating data written by another installation).
    pub fn with_environment(store: Arc<dyn KeyStore>, env: EnvironmentProfile) -> Self {
        Self {
            keys: PrimaryKeyManager::new(store),
            env,
        }
    }

    pub fn keys(&self) -> &PrimaryKeyManager {
        &self.keys
    }

    /// Encrypts a secret under the primary key, provisioning it on first use.
    pub async fn encrypt(&self, plaintext: &str) -> SecretsResult<String> {
        let key = self.keys.get_or_create().await?;
        Ok(encrypt_string(&key, plaintext)?)
    }

    /// Decrypts a primary-key envelope. No fallback tier — use
    /// [`SecretManager::decrypt_with_fallback`] for values that may predate
    /// the primary key.
    pub async fn decrypt(&self, envelope: &str) -> SecretsResult<String> {
        let key = self.keys.get_or_create().await?;
        Ok(decrypt_string(&key, envelope)?)
    }

    /// Two-tier decryption: primary key, then legacy fallback.
    ///
    /// Tier progression is a single explicit pass — no retries within a tier,
    /// since authentication failure is deterministic. Both causes travel in
    /// the terminal error.
    pub async fn decrypt_with_fallback(&self, envelope: &str) -> SecretsResult<DecryptedSecret> {
        let primary_err = match self.try_primary(envelope).await {
            Ok(plaintext) => {
                return Ok(DecryptedSecret {
                    plaintext,
                    migrated_from_fallback: false,
                });
            }
            Err(e) => e,
        };

        match self.try_fallback(envelope) {
            Ok(plaintext) => {
                warn!("secret decrypted with legacy fallback key; re-encrypt under the primary key");
                Ok(DecryptedSecret {
                    plaintext,
                    migrated_from_fallback: true,
                })
            }
            Err(fallback_err) => Err(SecretsError::DecryptionFailed {
                primary: Box::new(primary_err),
                fallback: Box::new(fallback_err),
            }),
        }
    }

    /// Re-encrypts a legacy envelope under the primary key.
    ///
    /// Returns `Some(new_envelope)` only when the input decrypted via the
    /// fallback tier; `None` means it is already primary-keyed. Nothing is
    /// persisted here — the caller stores the result.
    pub async fn upgrade_legacy(&self, envelope: &str) -> SecretsResult<Option<String>> {
        let decrypted = self.decrypt_with_fallback(envelope).await?;
        if !decrypted.migrated_from_fallback {
            return Ok(None);
        }
        Ok(Some(self.encrypt(&decrypted.plaintext).await?))
    }

    /// A failure to obtain the primary key (store failure, corrupt record)
    /// counts as a tier failure, same as an authentication failure.
    async fn try_primary(&self, envelope: &str) -> SecretsResult<String> {
        let key = self.keys.get_or_create().await?;
        Ok(decrypt_string(&key, envelope)?)
    }

    fn try_fallback(&self, envelope: &str) -> SecretsResult<String> {
        let key = derive_fallback_key(&self.env)?;
        Ok(decrypt_string(&key, envelope)?)
    }
}
