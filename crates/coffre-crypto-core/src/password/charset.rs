//! Character-class resolution for random passwords.
//!
//! [`build_charset`] turns a [`GenerationRequest`] into the concrete alphabet
//! the generator draws from, plus one mandatory pick per enabled class.
//!
//! The alphabet is **not** deduplicated: a custom character that also belongs
//! to an enabled class appears twice and is drawn twice as often. Callers who
//! want a flat distribution should pass custom characters outside the enabled
//! classes.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters that are easy to confuse when read aloud or in some fonts.
pub const AMBIGUOUS: &str = "0O1lI";

/// One of the four built-in character classes, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Special,
}

impl CharClass {
    /// All classes in the order mandatory picks are made.
    pub const ALL: [Self; 4] = [Self::Lowercase, Self::Uppercase, Self::Digits, Self::Special];

    /// Full, unfiltered alphabet of this class.
    #[must_use]
    pub const fn alphabet(self) -> &'static str {
        match self {
            Self::Lowercase => LOWERCASE,
            Self::Uppercase => UPPERCASE,
            Self::Digits => DIGITS,
            Self::Special => SPECIAL,
        }
    }

    /// Whether `c` belongs to this class.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        self.alphabet().contains(c)
    }

    fn filtered(self, exclude_ambiguous: bool) -> Vec<char> {
        self.alphabet()
            .chars()
            .filter(|c| !(exclude_ambiguous && AMBIGUOUS.contains(*c)))
            .collect()
    }
}

/// Parameters for one random password.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    /// Number of characters to produce (at least 4).
    pub length: usize,
    pub use_lowercase: bool,
    pub use_uppercase: bool,
    pub use_digits: bool,
    pub use_special: bool,
    /// Drop `0 O 1 l I` from the built-in classes (never from `custom_chars`).
    pub exclude_ambiguous: bool,
    /// Extra characters appended to the alphabet as-is.
    pub custom_chars: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            length: super::DEFAULT_PASSWORD_LENGTH,
            use_lowercase: true,
            use_uppercase: true,
            use_digits: true,
            use_special: true,
            exclude_ambiguous: false,
            custom_chars: String::new(),
        }
    }
}

impl GenerationRequest {
    /// Built-in classes switched on, in resolution order.
    #[must_use]
    pub fn enabled_classes(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|class| match class {
                CharClass::Lowercase => self.use_lowercase,
                CharClass::Uppercase => self.use_uppercase,
                CharClass::Digits => self.use_digits,
                CharClass::Special => self.use_special,
            })
            .collect()
    }
}

/// Alphabet and mandatory picks for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCharset {
    /// Every character eligible for a random draw, duplicates included.
    pub alphabet: Vec<char>,
    /// One character per enabled class, in class order.
    pub mandatory: Vec<char>,
}

/// Resolve `request` into an alphabet and one random pick per enabled class.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidConfiguration`] when nothing is left to draw from.
pub fn build_charset(request: &GenerationRequest) -> Result<ResolvedCharset, CryptoError> {
    let mut rng = OsRng;
    let mut alphabet = Vec::new();
    let mut mandatory = Vec::new();

    for class in request.enabled_classes() {
        let chars = class.filtered(request.exclude_ambiguous);
        if let Some(pick) = chars.choose(&mut rng) {
            mandatory.push(*pick);
        }
        alphabet.extend(chars);
    }
    alphabet.extend(request.custom_chars.chars());

    if alphabet.is_empty() {
        return Err(CryptoError::InvalidConfiguration(
            "at least one character type must be selected".into(),
        ));
    }

    Ok(ResolvedCharset {
        alphabet,
        mandatory,
    })
}
