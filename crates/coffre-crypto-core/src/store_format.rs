//! Credential store file format.
//!
//! ```text
//! Salt (16 B) | Nonce (12 B) | Ciphertext | Tag (16 B)
//! ```
//!
//! - **Salt**: PBKDF2 salt, regenerated on every [`seal`]
//! - **Nonce / Ciphertext / Tag**: AES-256-GCM over the plaintext payload
//!
//! The salt is passed as AAD so the header cannot be swapped between files
//! without failing authentication.

use crate::error::CryptoError;
use crate::kdf::{self, Pbkdf2Params, SALT_LEN};
use crate::memory::SecretBuffer;
use crate::symmetric::{self, SealedData, MIN_SEALED_LEN};

/// Smallest byte length a store file can have (empty payload).
pub const MIN_BLOB_LEN: usize = SALT_LEN + MIN_SEALED_LEN;

/// Encrypt `plaintext` under a fresh salt and key derived from `master`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidConfiguration`] for an empty master or weak
/// `params`, and [`CryptoError::Encryption`] if sealing fails.
pub fn seal(plaintext: &[u8], master: &[u8], params: &Pbkdf2Params) -> Result<Vec<u8>, CryptoError> {
    let derived = kdf::derive_key(master, None, params)?;
    let sealed = symmetric::encrypt(plaintext, derived.key.expose(), &derived.salt)?;

    let sealed_bytes = sealed.to_bytes();
    let mut out = Vec::with_capacity(SALT_LEN.saturating_add(sealed_bytes.len()));
    out.extend_from_slice(&derived.salt);
    out.extend_from_slice(&sealed_bytes);
    Ok(out)
}

/// Split the salt off `blob`, re-derive the key from `master` and decrypt.
///
/// # Errors
///
/// Returns [`CryptoError::Decryption`] when the blob is truncated, was
/// written under another master password, or has been modified.
/// Returns [`CryptoError::InvalidConfiguration`] for an empty master.
pub fn open(blob: &[u8], master: &[u8], params: &Pbkdf2Params) -> Result<SecretBuffer, CryptoError> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(CryptoError::Decryption);
    }
    let (salt_bytes, sealed_bytes) = blob.split_at(SALT_LEN);
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);

    let derived = kdf::derive_key(master, Some(salt), params)?;
    let sealed = SealedData::from_bytes(sealed_bytes)?;
    symmetric::decrypt(&sealed, derived.key.expose(), &salt)
}
