//! Cryptographic password and passphrase generation.
//!
//! Provides two generation modes:
//! - [`generate_password`]: character-based, driven by a [`GenerationRequest`]
//! - [`generate_passphrase`]: word-based, drawn from [`wordlist::WORDS`]
//!
//! All randomness comes from `OsRng`. Index draws go through `gen_range`,
//! which rejection-samples, so no alphabet size introduces modulo bias.

pub mod charset;
pub mod wordlist;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

pub use charset::{build_charset, CharClass, GenerationRequest, ResolvedCharset};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Minimum allowed passphrase word count.
pub const MIN_WORD_COUNT: usize = 1;

/// Default passphrase word count.
pub const DEFAULT_WORD_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Separator between words in a passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassphraseSeparator {
    /// Hyphen: `word-word-word`
    Hyphen,
    /// Space: `word word word`
    Space,
    /// Dot: `word.word.word`
    Dot,
    /// Underscore: `word_word_word`
    Underscore,
    /// No separator: `wordwordword`
    None,
    /// Any caller-chosen string.
    Custom(String),
}

impl PassphraseSeparator {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hyphen => "-",
            Self::Space => " ",
            Self::Dot => ".",
            Self::Underscore => "_",
            Self::None => "",
            Self::Custom(s) => s,
        }
    }
}

/// Parameters for [`generate_passphrase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassphraseOptions {
    pub word_count: usize,
    pub separator: PassphraseSeparator,
    /// Upper-case the first letter of every word.
    pub capitalize: bool,
    /// Append `separator` plus a 2- or 3-digit random number.
    pub add_numbers: bool,
}

impl Default for PassphraseOptions {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            separator: PassphraseSeparator::Hyphen,
            capitalize: true,
            add_numbers: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a random password as described by `request`.
///
/// One character from each enabled class is placed first, the remaining
/// positions are drawn uniformly from the whole alphabet, then the sequence
/// is Fisher-Yates shuffled so the mandatory picks land anywhere.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidConfiguration`] if:
/// - `request.length` is below [`MIN_PASSWORD_LENGTH`]
/// - the resolved alphabet is empty
/// - `request.length` cannot hold one character per enabled class
pub fn generate_password(request: &GenerationRequest) -> Result<String, CryptoError> {
    if request.length < MIN_PASSWORD_LENGTH {
        return Err(CryptoError::InvalidConfiguration(format!(
            "length must be at least {MIN_PASSWORD_LENGTH}, got {}",
            request.length
        )));
    }

    let ResolvedCharset {
        alphabet,
        mandatory,
    } = build_charset(request)?;

    if request.length < mandatory.len() {
        return Err(CryptoError::InvalidConfiguration(format!(
            "length ({}) must be at least {} to include one character from each enabled class",
            request.length,
            mandatory.len()
        )));
    }

    let mut rng = OsRng;
    let mut chars = mandatory;
    chars.reserve(request.length.saturating_sub(chars.len()));
    while chars.len() < request.length {
        chars.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }

    chars.shuffle(&mut rng);

    Ok(chars.into_iter().collect())
}

/// Generate `count` independent passwords from the same request.
///
/// Duplicates are not filtered.
///
/// # Errors
///
/// Same conditions as [`generate_password`].
pub fn generate_multiple(
    count: usize,
    request: &GenerationRequest,
) -> Result<Vec<String>, CryptoError> {
    (0..count).map(|_| generate_password(request)).collect()
}

/// Generate a passphrase from the built-in wordlist.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidConfiguration`] if `word_count` is zero.
pub fn generate_passphrase(options: &PassphraseOptions) -> Result<String, CryptoError> {
    if options.word_count < MIN_WORD_COUNT {
        return Err(CryptoError::InvalidConfiguration(format!(
            "word count must be at least {MIN_WORD_COUNT}, got {}",
            options.word_count
        )));
    }

    let mut rng = OsRng;
    let separator = options.separator.as_str();

    let words: Vec<String> = (0..options.word_count)
        .map(|_| {
            let word = wordlist::WORDS[rng.gen_range(0..wordlist::WORDS.len())];
            if options.capitalize {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect();

    let mut result = words.join(separator);

    if options.add_numbers {
        let digits: usize = rng.gen_range(2..=3);
        result.push_str(separator);
        for _ in 0..digits {
            let digit = rng.gen_range(0..10u32);
            result.extend(char::from_digit(digit, 10));
        }
    }

    Ok(result)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
