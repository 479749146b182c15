//! PBKDF2-HMAC-SHA256 key derivation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::cipher::KEY_SIZE;

/// Derives 256-bit key material from a textual input.
///
/// Deterministic for fixed inputs. The salt and iteration count are part of
/// whatever wire contract the caller maintains; changing either produces a
/// different key.
pub fn pbkdf2_key(material: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut out = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(material.as_bytes(), salt, iterations, &mut *out);
    out
}
