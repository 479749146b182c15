//! AES-256-GCM envelope encryption for secret strings.
//!
//! Wire format: `[12 bytes: nonce][N bytes: ciphertext + tag]`, base64-encoded
//! for storage and transport. The nonce is freshly random for every call and
//! is never reused under the same key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

use crate::error::{CryptoError, CryptoResult};

/// Raw key size in bytes (256 bits).
pub const KEY_SIZE: usize = 32;
/// AES-GCM nonce size in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;
/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Where a key came from, which also fixes what it may do.
///
/// Fallback keys exist only to read ciphertext produced before the persisted
/// primary-key scheme; they never produce new ciphertext.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Randomly generated and persisted; encrypts and decrypts.
    Primary,
    /// Deterministically derived from environment identifiers; decrypt-only.
    Fallback,
}

/// An imported AES-256-GCM key.
///
/// Opaque by construction: the raw bytes are consumed at import and cannot be
/// read back out of the handle.
#[derive(Clone)]
pub struct SymmetricKey {
    cipher: Aes256Gcm,
    origin: KeyOrigin,
}

impl SymmetricKey {
    /// Imports raw 256-bit key material.
    pub fn import(bytes: &[u8], origin: KeyOrigin) -> CryptoResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let cipher = Aes256Gcm::new_from_slice(bytes).map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self { cipher, origin })
    }

    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Whether this key may produce new ciphertext.
    pub fn can_encrypt(&self) -> bool {
        self.origin == KeyOrigin::Primary
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Generates random 256-bit key material.
///
/// The returned buffer zeroizes on drop; callers keep it only long enough to
/// persist and import it.
pub fn generate_key_bytes() -> zeroize::Zeroizing<[u8; KEY_SIZE]> {
    let mut bytes = zeroize::Zeroizing::new([0u8; KEY_SIZE]);
    OsRng.fill_bytes(&mut *bytes);
    bytes
}

/// Encrypts a plaintext string into a base64 envelope.
pub fn encrypt_string(key: &SymmetricKey, plaintext: &str) -> CryptoResult<String> {
    if !key.can_encrypt() {
        return Err(CryptoError::Encryption(
            "fallback keys are decrypt-only".to_string(),
        ));
    }

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = key
        .cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(blob))
}

/// Decrypts a base64 envelope back to the plaintext string.
///
/// Fails on malformed base64, a payload shorter than the nonce, or an
/// authentication failure (wrong key or tampered data) — all reported as the
/// same opaque [`CryptoError::Decryption`].
pub fn decrypt_string(key: &SymmetricKey, envelope: &str) -> CryptoResult<String> {
    let blob = STANDARD
        .decode(envelope)
        .map_err(|_| opaque_decrypt_error())?;
    if blob.len() < NONCE_SIZE {
        return Err(opaque_decrypt_error());
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = key
        .cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| opaque_decrypt_error())?;

    String::from_utf8(plaintext).map_err(|_| opaque_decrypt_error())
}

fn opaque_decrypt_error() -> CryptoError {
    CryptoError::Decryption("wrong key or malformed envelope".to_string())
}
