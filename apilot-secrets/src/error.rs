//! Secret lifecycle error types.

use thiserror::Error;

/// Result type for secret lifecycle operations.
pub type SecretsResult<T> = Result<T, SecretsError>;

/// Errors from key provisioning, storage, and migration-aware decryption.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Stored key material is not a valid 256-bit key (corrupt record).
    /// Equivalent to "no usable primary key" for decryption purposes.
    #[error("stored key material invalid: {0}")]
    KeyImport(String),

    /// Key generation or first-run storage failed.
    #[error("key provisioning failed: {0}")]
    KeyProvision(String),

    /// The underlying key store failed.
    #[error("key store error: {0}")]
    Store(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] apilot_crypto::CryptoError),

    /// Both the primary and the fallback tier failed. Terminal — no further
    /// fallback tiers exist.
    #[error("decryption failed under both primary ({primary}) and fallback ({fallback}) keys")]
    DecryptionFailed {
        primary: Box<SecretsError>,
        fallback: Box<SecretsError>,
    },
}
