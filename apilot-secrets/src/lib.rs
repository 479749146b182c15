//! Secret lifecycle for apilot.
//!
//! Keeps API keys and other small sensitive strings confidential across
//! restarts and platform upgrades.
//!
//! # Architecture
//!
//! Two key tiers:
//!
//! 1. **Primary key**: a random 256-bit AES-GCM key, generated on first use
//!    and persisted as a single [`KeyRecord`] behind the [`KeyStore`] seam.
//!    All new ciphertext is produced under it.
//!
//! 2. **Fallback key**: derived deterministically from environment
//!    identifiers. Retained only to read ciphertext written before the
//!    primary-key scheme existed; a successful fallback decrypt is flagged so
//!    the caller can re-encrypt under the primary key.
//!
//! The store is injected (never a hidden global) so tests substitute an
//! in-memory implementation. Resetting the primary key is the only
//! destructive operation and irrecoverably orphans existing ciphertext.

mod error;
mod fallback;
mod manager;
mod secrets;
mod store;

pub use error::{SecretsError, SecretsResult};
pub use fallback::{
    derive_fallback_key, EnvironmentProfile, FALLBACK_ITERATIONS, FALLBACK_SALT,
};
pub use manager::PrimaryKeyManager;
pub use secrets::{DecryptedSecret, SecretManager};
pub use store::{FileKeyStore, KeyRecord, KeyStore, MemoryKeyStore, KEY_RECORD_ID};
