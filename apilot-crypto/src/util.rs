//! Small utility surface shared with the application layer.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

use crate::cipher::NONCE_SIZE;

/// Generates a random UUID-format identifier.
pub fn generate_random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns base64(SHA-256(text)).
///
/// For equality comparison only — not reversible, not a key derivation.
pub fn hash(text: &str) -> String {
    STANDARD.encode(Sha256::digest(text.as_bytes()))
}

/// Heuristic check for envelope-shaped input: valid base64 decoding to at
/// least a nonce's worth of bytes. Plaintext can pass this by coincidence.
pub fn looks_encrypted(text: &str) -> bool {
    match STANDARD.decode(text) {
        Ok(bytes) => bytes.len() >= NONCE_SIZE,
        Err(_) => false,
    }
}

/// Masks a secret for display, keeping `visible` characters at each end.
///
/// Inputs no longer than `visible` characters are fully masked.
pub fn mask(text: &str, visible: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= visible {
        return "****".to_string();
    }
    let prefix: String = chars[..visible].iter().collect();
    let suffix: String = chars[chars.len() - visible..].iter().collect();
    format!("{prefix}****{suffix}")
}
