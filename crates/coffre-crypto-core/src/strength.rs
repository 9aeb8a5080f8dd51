//! Heuristic password strength analysis.
//!
//! [`analyze`] is pure and infallible. It combines four checks, in order:
//!
//! 1. length (0–40 points)
//! 2. character-class diversity (0–35 points)
//! 3. dangerous patterns (−10, first match only)
//! 4. common-password denylist (−50)
//!
//! and independently estimates entropy from the classes present in the input.

use serde::{Deserialize, Serialize};

use crate::password::charset::SPECIAL;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Passwords rejected outright, compared lowercased.
const COMMON_PASSWORDS: [&str; 14] = [
    "password",
    "123456",
    "password123",
    "admin",
    "qwerty",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
    "abc123",
    "password1",
    "123456789",
    "welcome123",
    "admin123",
];

const NUMERIC_RUNS: &[&str] = &[
    "012", "123", "234", "345", "456", "567", "678", "789", "890",
];

const ALPHABETIC_RUNS: &[&str] = &[
    "abc", "bcd", "cde", "def", "efg", "fgh", "ghi", "hij", "ijk", "jkl", "klm", "lmn", "mno",
    "nop", "opq", "pqr", "qrs", "rst", "stu", "tuv", "uvw", "vwx", "wxy", "xyz",
];

const KEYBOARD_RUNS: &[&str] = &[
    "qwe", "wer", "ert", "rty", "tyu", "yui", "uio", "iop", "asd", "sdf", "dfg", "fgh", "ghj",
    "hjk", "jkl", "zxc", "xcv", "cvb", "vbn", "bnm",
];

/// A dangerous shape, tested against the lowercased password.
enum Pattern {
    /// The same character three or more times in a row.
    Repetition,
    /// Any of the listed substrings.
    Runs(&'static [&'static str]),
}

const DANGEROUS_PATTERNS: [Pattern; 4] = [
    Pattern::Repetition,
    Pattern::Runs(NUMERIC_RUNS),
    Pattern::Runs(ALPHABETIC_RUNS),
    Pattern::Runs(KEYBOARD_RUNS),
];

/// Upper bounds (exclusive) on the score for each strength tier.
const STRENGTH_TABLE: [(i32, Strength); 4] = [
    (20, Strength::VeryWeak),
    (40, Strength::Weak),
    (60, Strength::Medium),
    (80, Strength::Strong),
];

/// Upper bounds (exclusive) on entropy bits for each crack-time bucket.
const CRACK_TIME_TABLE: [(f64, CrackTime); 6] = [
    (30.0, CrackTime::Seconds),
    (40.0, CrackTime::Minutes),
    (50.0, CrackTime::Hours),
    (60.0, CrackTime::Days),
    (70.0, CrackTime::Months),
    (80.0, CrackTime::Years),
];

/// Alphabet sizes credited to entropy when a class is present.
const LOWER_POOL: u32 = 26;
const UPPER_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
const SPECIAL_POOL: u32 = 32;

const PATTERN_PENALTY: i32 = 10;
const COMMON_PENALTY: i32 = 50;

// ---------------------------------------------------------------------------
// Feedback messages
// ---------------------------------------------------------------------------

pub const MSG_EMPTY: &str = "password must not be empty";
pub const MSG_TOO_SHORT: &str = "too short (at least 8 characters recommended)";
pub const MSG_ACCEPTABLE_LENGTH: &str = "acceptable length, but 12+ characters would be better";
pub const MSG_ONE_CLASS: &str = "use different character types";
pub const MSG_TWO_CLASSES: &str = "add more variety of characters";
pub const MSG_ADD_LOWER: &str = "add lowercase letters";
pub const MSG_ADD_UPPER: &str = "add uppercase letters";
pub const MSG_ADD_DIGITS: &str = "add digits";
pub const MSG_ADD_SPECIAL: &str = "add special characters";
pub const MSG_PATTERN: &str = "avoid sequences and repetitions";
pub const MSG_COMMON: &str = "password too common";
pub const MSG_EXCELLENT: &str = "excellent password";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Strength tier derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }

    fn from_score(score: i32) -> Self {
        STRENGTH_TABLE
            .iter()
            .find(|(bound, _)| score < *bound)
            .map_or(Self::VeryStrong, |(_, tier)| *tier)
    }
}

/// Coarse offline brute-force estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrackTime {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
    Centuries,
}

impl CrackTime {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seconds => "a few seconds",
            Self::Minutes => "a few minutes",
            Self::Hours => "a few hours",
            Self::Days => "a few days",
            Self::Months => "a few months",
            Self::Years => "a few years",
            Self::Centuries => "centuries",
        }
    }

    /// Bucket for `entropy_bits`.
    #[must_use]
    pub fn from_entropy(entropy_bits: f64) -> Self {
        CRACK_TIME_TABLE
            .iter()
            .find(|(bound, _)| entropy_bits < *bound)
            .map_or(Self::Centuries, |(_, bucket)| *bucket)
    }
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Clamped to `0..=100`.
    pub score: u8,
    pub strength: Strength,
    pub feedback: Vec<String>,
    pub entropy_bits: f64,
    pub crack_time: CrackTime,
}

/// Which of the four classes appear in a string.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
struct ClassPresence {
    lower: bool,
    upper: bool,
    digit: bool,
    special: bool,
}

impl ClassPresence {
    fn detect(password: &str) -> Self {
        let mut presence = Self::default();
        for c in password.chars() {
            presence.lower |= c.is_ascii_lowercase();
            presence.upper |= c.is_ascii_uppercase();
            presence.digit |= c.is_ascii_digit();
            presence.special |= SPECIAL.contains(c);
        }
        presence
    }

    fn count(self) -> usize {
        [self.lower, self.upper, self.digit, self.special]
            .into_iter()
            .filter(|present| *present)
            .count()
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn pool_size(self) -> u32 {
        let mut size = 0;
        if self.lower {
            size += LOWER_POOL;
        }
        if self.upper {
            size += UPPER_POOL;
        }
        if self.digit {
            size += DIGIT_POOL;
        }
        if self.special {
            size += SPECIAL_POOL;
        }
        size
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score `password` and explain the result.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn analyze(password: &str) -> AnalysisResult {
    if password.is_empty() {
        return AnalysisResult {
            score: 0,
            strength: Strength::VeryWeak,
            feedback: vec![MSG_EMPTY.to_string()],
            entropy_bits: 0.0,
            crack_time: CrackTime::Seconds,
        };
    }

    let length = password.chars().count();
    let presence = ClassPresence::detect(password);
    let mut feedback = Vec::new();

    let mut score = length_score(length, &mut feedback);
    score += complexity_score(presence, &mut feedback);
    score -= pattern_penalty(password, &mut feedback);
    score -= common_penalty(password, &mut feedback);

    let clamped = score.clamp(0, 100);
    let entropy_bits = entropy(length, presence);

    if feedback.is_empty() {
        feedback.push(MSG_EXCELLENT.to_string());
    }

    AnalysisResult {
        score: u8::try_from(clamped).unwrap_or(0),
        strength: Strength::from_score(clamped),
        feedback,
        entropy_bits,
        crack_time: CrackTime::from_entropy(entropy_bits),
    }
}

/// `length × log2(pool)` over the classes present in `password`.
#[must_use]
pub fn estimate_entropy(password: &str) -> f64 {
    entropy(password.chars().count(), ClassPresence::detect(password))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

fn length_score(length: usize, feedback: &mut Vec<String>) -> i32 {
    match length {
        0..=7 => {
            feedback.push(MSG_TOO_SHORT.to_string());
            0
        }
        8..=11 => {
            feedback.push(MSG_ACCEPTABLE_LENGTH.to_string());
            20
        }
        12..=15 => 30,
        _ => 40,
    }
}

fn complexity_score(presence: ClassPresence, feedback: &mut Vec<String>) -> i32 {
    let score = match presence.count() {
        0 => {
            feedback.push(MSG_ONE_CLASS.to_string());
            0
        }
        1 => {
            feedback.push(MSG_ONE_CLASS.to_string());
            5
        }
        2 => {
            feedback.push(MSG_TWO_CLASSES.to_string());
            15
        }
        3 => 25,
        _ => 35,
    };

    let missing = [
        (presence.lower, MSG_ADD_LOWER),
        (presence.upper, MSG_ADD_UPPER),
        (presence.digit, MSG_ADD_DIGITS),
        (presence.special, MSG_ADD_SPECIAL),
    ];
    feedback.extend(
        missing
            .into_iter()
            .filter(|(present, _)| !present)
            .map(|(_, msg)| msg.to_string()),
    );

    score
}

fn pattern_penalty(password: &str, feedback: &mut Vec<String>) -> i32 {
    let lowered = password.to_lowercase();
    let hit = DANGEROUS_PATTERNS.iter().any(|pattern| match pattern {
        Pattern::Repetition => has_triple(&lowered),
        Pattern::Runs(runs) => runs.iter().any(|run| lowered.contains(run)),
    });
    if hit {
        feedback.push(MSG_PATTERN.to_string());
        PATTERN_PENALTY
    } else {
        0
    }
}

fn has_triple(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn common_penalty(password: &str, feedback: &mut Vec<String>) -> i32 {
    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        feedback.push(MSG_COMMON.to_string());
        COMMON_PENALTY
    } else {
        0
    }
}

#[allow(clippy::cast_precision_loss)]
fn entropy(length: usize, presence: ClassPresence) -> f64 {
    let pool = presence.pool_size();
    if pool == 0 {
        return 0.0;
    }
    length as f64 * f64::from(pool).log2()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn has(result: &AnalysisResult, msg: &str) -> bool {
        result.feedback.iter().any(|f| f == msg)
    }

    #[test]
    fn empty_input() {
        let result = analyze("");
        assert_eq!(result.score, 0);
        assert_eq!(result.strength, Strength::VeryWeak);
        assert_eq!(result.feedback, vec![MSG_EMPTY.to_string()]);
        assert!(result.entropy_bits.abs() < f64::EPSILON);
        assert_eq!(result.crack_time, CrackTime::Seconds);
    }

    #[test]
    fn common_password_flagged() {
        let result = analyze("password");
        assert!(result.score < 50);
        assert_eq!(result.score, 0);
        assert!(has(&result, MSG_COMMON));
        assert!(has(&result, MSG_ACCEPTABLE_LENGTH));
    }

    #[test]
    fn common_check_is_case_insensitive() {
        assert!(has(&analyze("QWERTY"), MSG_COMMON));
    }

    #[test]
    fn strong_password() {
        let result = analyze("MyStr0ng!P@ssw0rd2023");
        assert_eq!(result.score, 75);
        assert_eq!(result.strength, Strength::Strong);
        assert_eq!(result.feedback, vec![MSG_EXCELLENT.to_string()]);
    }

    #[test]
    fn length_brackets() {
        assert_eq!(length_score(7, &mut Vec::new()), 0);
        assert_eq!(length_score(8, &mut Vec::new()), 20);
        assert_eq!(length_score(11, &mut Vec::new()), 20);
        assert_eq!(length_score(12, &mut Vec::new()), 30);
        assert_eq!(length_score(15, &mut Vec::new()), 30);
        assert_eq!(length_score(16, &mut Vec::new()), 40);
    }

    #[test]
    fn feedback_order_and_missing_classes() {
        let result = analyze("zqmvkr");
        assert_eq!(
            result.feedback,
            vec![
                MSG_TOO_SHORT.to_string(),
                MSG_ONE_CLASS.to_string(),
                MSG_ADD_UPPER.to_string(),
                MSG_ADD_DIGITS.to_string(),
                MSG_ADD_SPECIAL.to_string(),
            ]
        );
        assert_eq!(result.score, 5);
    }

    #[test]
    fn no_recognised_class_scores_nothing() {
        let result = analyze("éèêëàâäô");
        assert_eq!(result.score, 20);
        assert!(has(&result, MSG_ONE_CLASS));
        assert!(result.entropy_bits.abs() < f64::EPSILON);
    }

    #[test]
    fn pattern_penalty_applies_once() {
        // Repetition, numeric run and keyboard run all present.
        let result = analyze("Aaaa123qwe!Zx");
        let hits = result.feedback.iter().filter(|f| *f == MSG_PATTERN).count();
        assert_eq!(hits, 1);
        // 30 (length 13) + 35 (four classes) - 10
        assert_eq!(result.score, 55);
    }

    #[test]
    fn each_pattern_family_detected() {
        for sample in ["Zz!9999x", "Zz!7890x", "Zz!9XYZx", "Zz!9VBNx"] {
            assert!(has(&analyze(sample), MSG_PATTERN), "{sample}");
        }
        assert!(!has(&analyze("Zz!9aqmx"), MSG_PATTERN));
    }

    #[test]
    fn entropy_uses_present_classes() {
        let bits = estimate_entropy("aB3!");
        let expected = 4.0 * 94f64.log2();
        assert!((bits - expected).abs() < 1e-9);

        let digits = estimate_entropy("0000");
        assert!((digits - 4.0 * 10f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn crack_time_table() {
        assert_eq!(CrackTime::from_entropy(0.0), CrackTime::Seconds);
        assert_eq!(CrackTime::from_entropy(29.9), CrackTime::Seconds);
        assert_eq!(CrackTime::from_entropy(30.0), CrackTime::Minutes);
        assert_eq!(CrackTime::from_entropy(45.0), CrackTime::Hours);
        assert_eq!(CrackTime::from_entropy(55.0), CrackTime::Days);
        assert_eq!(CrackTime::from_entropy(65.0), CrackTime::Months);
        assert_eq!(CrackTime::from_entropy(79.9), CrackTime::Years);
        assert_eq!(CrackTime::from_entropy(80.0), CrackTime::Centuries);
    }

    #[test]
    fn strength_table() {
        assert_eq!(Strength::from_score(-40), Strength::VeryWeak);
        assert_eq!(Strength::from_score(19), Strength::VeryWeak);
        assert_eq!(Strength::from_score(20), Strength::Weak);
        assert_eq!(Strength::from_score(59), Strength::Medium);
        assert_eq!(Strength::from_score(60), Strength::Strong);
        assert_eq!(Strength::from_score(80), Strength::VeryStrong);
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_string(&analyze("abc")).unwrap();
        assert!(json.contains("entropyBits"));
        assert!(json.contains("crackTime"));
        assert!(json.contains("\"veryWeak\""));
    }
}
