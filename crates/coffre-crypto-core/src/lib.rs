//! `coffre-crypto-core`: Password generation, strength analysis and sealing
//! primitives for Coffre.
//!
//! Zero I/O, zero global state: every function takes its parameters and
//! draws randomness from `OsRng` per call.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod kdf;
pub mod symmetric;

pub mod store_format;

pub mod password;

pub mod strength;

pub use error::CryptoError;
pub use kdf::{derive_key, DerivedKey, Pbkdf2Params, DEFAULT_ITERATIONS, MIN_ITERATIONS, SALT_LEN};
pub use memory::{SecretBuffer, SecretBytes};
pub use password::{
    build_charset, generate_multiple, generate_passphrase, generate_password, CharClass,
    GenerationRequest, PassphraseOptions, PassphraseSeparator, ResolvedCharset,
    DEFAULT_PASSWORD_LENGTH, DEFAULT_WORD_COUNT, MIN_PASSWORD_LENGTH,
};
pub use store_format::{open, seal};
pub use strength::{analyze, estimate_entropy, AnalysisResult, CrackTime, Strength};
pub use symmetric::{decrypt, encrypt, SealedData};
