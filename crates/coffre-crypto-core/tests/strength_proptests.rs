#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for the strength analyzer.

use coffre_crypto_core::strength::{analyze, estimate_entropy, Strength};
use proptest::prelude::*;

proptest! {
    /// Score stays within 0..=100 for any input.
    #[test]
    fn score_is_clamped(password in ".{0,64}") {
        let result = analyze(&password);
        prop_assert!(result.score <= 100);
        prop_assert!(!result.feedback.is_empty());
    }

    /// Doubling a string that uses at least one class strictly raises entropy.
    #[test]
    fn entropy_grows_with_length(s in "[a-zA-Z0-9!@#]{1,32}") {
        let doubled = format!("{s}{s}");
        prop_assert!(estimate_entropy(&s) < estimate_entropy(&doubled));
        prop_assert!(analyze(&s).entropy_bits < analyze(&doubled).entropy_bits);
    }

    /// The analyzer is deterministic.
    #[test]
    fn analysis_is_pure(password in ".{0,32}") {
        prop_assert_eq!(analyze(&password), analyze(&password));
    }
}

#[test]
fn reference_inputs() {
    let empty = analyze("");
    assert_eq!(empty.score, 0);
    assert_eq!(empty.strength, Strength::VeryWeak);

    let common = analyze("password");
    assert!(common.score < 50);
    assert!(common.feedback.iter().any(|f| f.contains("too common")));

    let strong = analyze("MyStr0ng!P@ssw0rd2023");
    assert!(strong.score >= 60);
    assert!(matches!(strong.strength, Strength::Strong | Strength::VeryStrong));
}
