//! Passphrase wordlist.
//!
//! A short list of common, easy-to-type English words. Each word carries
//! about 5.6 bits, so the passphrase strength comes from the word count.

/// Number of words in [`WORDS`].
pub const WORDLIST_SIZE: usize = 48;

/// Words drawn (with replacement) by [`super::generate_passphrase`].
pub const WORDS: [&str; WORDLIST_SIZE] = [
    "apple", "banana", "cherry", "dragon", "eagle", "forest", "guitar", "house",
    "island", "jungle", "kitten", "lemon", "mountain", "ocean", "piano", "queen",
    "river", "sunset", "tiger", "umbrella", "violet", "wizard", "yellow", "zebra",
    "bridge", "castle", "diamond", "elephant", "flower", "garden", "harmony", "ice",
    "journey", "kingdom", "liberty", "melody", "nature", "orange", "paradise", "quiet",
    "rainbow", "silver", "thunder", "universe", "victory", "wisdom", "crystal", "dream",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn words_are_unique() {
        let unique: HashSet<&str> = WORDS.iter().copied().collect();
        assert_eq!(unique.len(), WORDLIST_SIZE);
    }

    #[test]
    fn words_are_lowercase_ascii() {
        for word in WORDS {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "'{word}' is not lowercase ASCII"
            );
        }
    }
}
