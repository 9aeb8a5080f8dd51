//! Cryptographic error types for `coffre-crypto-core`.

use thiserror::Error;

/// Errors produced by generation and cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Caller supplied unusable parameters (empty charset, length below the
    /// minimum, empty master password, too few KDF iterations).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Symmetric encryption failure (AES-256-GCM).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Authentication tag verification failed: ciphertext tampered, truncated or wrong key.
    #[error("decryption failed: authentication tag mismatch")]
    Decryption,
}
