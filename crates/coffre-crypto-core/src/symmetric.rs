//! AES-256-GCM sealing of the serialized record list.
//!
//! Each call to [`encrypt`] draws its own nonce; [`decrypt`] hands the
//! plaintext back inside a [`SecretBuffer`].

use crate::error::CryptoError;
use crate::kdf::KEY_LEN;
use crate::memory::SecretBuffer;
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use zeroize::Zeroize;

/// Per-message nonce size.
pub const NONCE_LEN: usize = 12;

/// GCM tag size.
pub const TAG_LEN: usize = 16;

/// Smallest valid wire encoding: nonce + empty ciphertext + tag.
pub const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Ciphertext together with the nonce and tag needed to open it.
#[must_use = "sealed data is useless unless written somewhere"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedData {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl SealedData {
    /// Encode as `nonce || ciphertext || tag`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_SEALED_LEN.saturating_add(self.ciphertext.len()));
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Decode `nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Decryption`] if `bytes` is shorter than
    /// [`MIN_SEALED_LEN`]: a truncated blob cannot authenticate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_SEALED_LEN {
            return Err(CryptoError::Decryption);
        }
        let (nonce_bytes, rest) = bytes.split_at(NONCE_LEN);
        let ct_len = rest
            .len()
            .checked_sub(TAG_LEN)
            .ok_or(CryptoError::Decryption)?;
        let (ciphertext, tag_bytes) = rest.split_at(ct_len);

        Ok(Self {
            nonce: nonce_bytes.try_into().map_err(|_| CryptoError::Decryption)?,
            ciphertext: ciphertext.to_vec(),
            tag: tag_bytes.try_into().map_err(|_| CryptoError::Decryption)?,
        })
    }
}

fn aead_key(key: &[u8]) -> Result<aead::LessSafeKey, CryptoError> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::Encryption(format!(
            "invalid key length: got {}, need {KEY_LEN}",
            key.len()
        )));
    }
    aead::UnboundKey::new(&aead::AES_256_GCM, key)
        .map(aead::LessSafeKey::new)
        .map_err(|_| CryptoError::Encryption("key rejected by AES-256-GCM".into()))
}

/// Encrypt `plaintext` under `key` with a random nonce from `OsRng`.
///
/// `aad` is authenticated but not encrypted and must be repeated on decrypt.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] if the key is not 32 bytes or sealing fails.
pub fn encrypt(plaintext: &[u8], key: &[u8], aad: &[u8]) -> Result<SealedData, CryptoError> {
    let key = aead_key(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let sealed = key.seal_in_place_separate_tag(
        aead::Nonce::assume_unique_for_key(nonce),
        aead::Aad::from(aad),
        &mut buffer,
    );
    let tag: [u8; TAG_LEN] = match sealed.ok().and_then(|t| t.as_ref().try_into().ok()) {
        Some(tag) => tag,
        None => {
            buffer.zeroize();
            return Err(CryptoError::Encryption("seal failed".into()));
        }
    };

    Ok(SealedData {
        nonce,
        ciphertext: buffer,
        tag,
    })
}

/// Authenticate and decrypt `sealed`.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] for a malformed key and
/// [`CryptoError::Decryption`] when the tag does not verify (wrong key,
/// tampered data, or mismatched `aad`).
pub fn decrypt(sealed: &SealedData, key: &[u8], aad: &[u8]) -> Result<SecretBuffer, CryptoError> {
    let key = aead_key(key)?;
    // ring expects the tag appended to the ciphertext.
    let mut buffer = [sealed.ciphertext.as_slice(), &sealed.tag[..]].concat();
    let opened = key
        .open_in_place(
            aead::Nonce::assume_unique_for_key(sealed.nonce),
            aead::Aad::from(aad),
            &mut buffer,
        )
        .map(|plaintext| SecretBuffer::new(plaintext))
        .map_err(|_| CryptoError::Decryption);
    buffer.zeroize();
    opened
}
