//! Deterministic fallback key derivation for legacy ciphertext.
//!
//! Before the persisted primary key existed, apilot derived its encryption
//! key from environment-identifying strings. That scheme survives here as a
//! read path only. The constants below are frozen: changing the join
//! separator, salt, or iteration count makes legacy data permanently
//! unreadable.

use apilot_crypto::{pbkdf2_key, KeyOrigin, SymmetricKey};

use crate::error::SecretsResult;

/// PBKDF2 salt of the legacy scheme. Frozen.
pub const FALLBACK_SALT: &[u8] = b"apilot-salt";

/// PBKDF2-HMAC-SHA256 iteration count of the legacy scheme. Frozen.
pub const FALLBACK_ITERATIONS: u32 = 100_000;

/// Sentinel for environment fields that cannot be determined.
const UNKNOWN: &str = "unknown";

/// Environment identifiers the legacy scheme derived its key from.
///
/// Plain data on purpose: decrypting data written by another installation
/// requires reconstructing that installation's profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentProfile {
    pub agent: String,
    pub locale: String,
    pub platform: String,
}

impl EnvironmentProfile {
    /// Samples the running environment. Fields that cannot be determined use
    /// the `"unknown"` sentinel, matching the legacy scheme.
    pub fn current() -> Self {
        Self {
            agent: std::env::var("APILOT_AGENT").unwrap_or_else(|_| UNKNOWN.to_string()),
            locale: std::env::var("LC_ALL")
                .or_else(|_| std::env::var("LANG"))
                .unwrap_or_else(|_| UNKNOWN.to_string()),
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// The `::`-joined derivation input. Field order is part of the wire
    /// contract.
    pub fn fingerprint(&self) -> String {
        format!("{}::{}::{}", self.agent, self.locale, self.platform)
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self {
            agent: UNKNOWN.to_string(),
            locale: UNKNOWN.to_string(),
            platform: UNKNOWN.to_string(),
        }
    }
}

/// Derives the legacy fallback key for the given environment.
///
/// Purely deterministic — no persistence, no randomness. The returned key is
/// decrypt-only; new ciphertext always goes through the primary key.
pub fn derive_fallback_key(env: &EnvironmentProfile) -> SecretsResult<SymmetricKey> {
    let bytes = pbkdf2_key(&env.fingerprint(), FALLBACK_SALT, FALLBACK_ITERATIONS);
    let key = SymmetricKey::import(bytes.as_slice(), KeyOrigin::Fallback)?;
    Ok(key)
}
