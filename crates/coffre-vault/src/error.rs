//! Vault error types for `coffre-vault`.

use std::path::PathBuf;

use coffre_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by credential store operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Caller error: empty master password, bad KDF parameters, etc.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Master password shorter than the configured policy allows.
    #[error("master password must be at least {min_length} characters")]
    WeakMasterPassword {
        /// Minimum length from [`crate::settings::StoreSettings`].
        min_length: usize,
    },

    /// Wrong master password, or the store file is corrupted or truncated.
    /// The store file is left untouched.
    #[error("decryption failed: wrong master password or corrupted store")]
    DecryptionFailure,

    /// Import file is not a valid export document.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Required source file does not exist (backup/restore).
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other cryptographic failure.
    #[error(transparent)]
    Crypto(CryptoError),
}

impl From<CryptoError> for VaultError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Decryption => Self::DecryptionFailure,
            CryptoError::InvalidConfiguration(msg) => Self::InvalidConfiguration(msg),
            other => Self::Crypto(other),
        }
    }
}
