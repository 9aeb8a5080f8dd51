//! PBKDF2-HMAC-SHA256 key derivation for the credential store.
//!
//! This module provides:
//! - [`derive_key`]: stretch a master password into a 256-bit key, generating
//!   a fresh salt when none is supplied
//! - [`Pbkdf2Params`]: serializable iteration count, validated against
//!   [`MIN_ITERATIONS`]
//!
//! The store re-derives on every read and write; nothing here is cached.

use crate::error::CryptoError;
use crate::memory::SecretBytes;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

/// Derived key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Salt length in bytes. Stored in clear at the head of every store file.
pub const SALT_LEN: usize = 16;

/// Lowest accepted iteration count.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Iteration count used when the caller has no preference.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// PBKDF2 parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2Params {
    /// Number of HMAC-SHA256 rounds.
    pub iterations: u32,
}

impl Pbkdf2Params {
    /// Build a parameter set, rejecting counts below [`MIN_ITERATIONS`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidConfiguration`] for too few iterations.
    pub fn new(iterations: u32) -> Result<Self, CryptoError> {
        let params = Self { iterations };
        params.validate()?;
        Ok(params)
    }

    /// Check a (possibly deserialized) parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidConfiguration`] for too few iterations.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.iterations < MIN_ITERATIONS {
            return Err(CryptoError::InvalidConfiguration(format!(
                "KDF iterations must be at least {MIN_ITERATIONS}, got {}",
                self.iterations
            )));
        }
        Ok(())
    }
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Output of [`derive_key`]: the key plus the salt it was derived with.
#[derive(Debug)]
pub struct DerivedKey {
    pub key: SecretBytes<KEY_LEN>,
    pub salt: [u8; SALT_LEN],
}

/// Derive a 256-bit key from `master` with PBKDF2-HMAC-SHA256.
///
/// When `salt` is `None` a fresh 16-byte salt is drawn from `OsRng`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidConfiguration`] if `master` is empty or
/// `params` has fewer than [`MIN_ITERATIONS`] iterations.
pub fn derive_key(
    master: &[u8],
    salt: Option<[u8; SALT_LEN]>,
    params: &Pbkdf2Params,
) -> Result<DerivedKey, CryptoError> {
    if master.is_empty() {
        return Err(CryptoError::InvalidConfiguration(
            "master password must not be empty".into(),
        ));
    }
    params.validate()?;

    let salt = salt.unwrap_or_else(|| {
        let mut fresh = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut fresh);
        fresh
    });

    let mut output = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(master, &salt, params.iterations, &mut output);
    let key = SecretBytes::new(output);
    output.zeroize();

    Ok(DerivedKey { key, salt })
}
