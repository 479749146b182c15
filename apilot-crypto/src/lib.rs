//! Cryptographic primitives for apilot secret storage.
//!
//! Provides authenticated encryption of secret strings using:
//! - AES-256-GCM with a fresh random nonce per message
//! - PBKDF2-HMAC-SHA256 for the deterministic legacy key derivation
//! - base64 transport encoding wherever ciphertext crosses the storage
//!   boundary
//!
//! # Envelope format
//!
//! Every encrypted value is a base64 string decoding to
//! `[12 bytes: nonce][N bytes: ciphertext + 16-byte tag]`. Consumers that
//! persist or transmit envelopes must preserve this exact byte layout.
//!
//! Key handles are opaque: once imported, raw key bytes are not retrievable
//! from a [`SymmetricKey`]. Keys derived for the legacy fallback path are
//! decrypt-only and refuse to produce new ciphertext.

mod cipher;
mod derive;
mod error;
mod util;

pub use cipher::{
    decrypt_string, encrypt_string, generate_key_bytes, KeyOrigin, SymmetricKey, KEY_SIZE,
    NONCE_SIZE, TAG_SIZE,
};
pub use derive::pbkdf2_key;
pub use error::{CryptoError, CryptoResult};
pub use util::{generate_random_id, hash, looks_encrypted, mask};
