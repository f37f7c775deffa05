//! Property-based tests for the repeat and substitution transforms.
//!
//! Uses proptest to check invariants that must hold for any input text.

mod common;

use proptest::prelude::*;
use textdup::transform::trim_trailing_newlines;
use textdup::{Error, ValidationError, repeat_n, substitute};

// ============================================================================
// Strategies
// ============================================================================

/// Multi-line text with at least one visible character.
fn text_with_content() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9 ]{0,12}", 1..6)
        .prop_map(|lines| lines.join("\n"))
        .prop_filter("needs visible content", |s| !s.trim().is_empty())
}

/// Optional trailing line breaks in any mix of `\n` and `\r\n`.
fn trailing_breaks() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["\n", "\r\n"]), 0..3)
        .prop_map(|parts| parts.concat())
}

fn whitespace_only() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,10}"
}

fn unicode_text() -> impl Strategy<Value = String> {
    "\\PC{0,60}"
}

// ============================================================================
// Repeat Properties
// ============================================================================

proptest! {
    /// A count of one returns the input without its trailing line breaks.
    #[test]
    fn repeat_once_is_trimmed_identity(body in text_with_content(), tail in trailing_breaks()) {
        let text = format!("{body}{tail}");
        prop_assert_eq!(repeat_n(&text, 1).unwrap(), trim_trailing_newlines(&text));
    }

    /// Splitting on `\n` yields the trimmed line sequence `n` times over.
    #[test]
    fn repeat_splits_into_copies(body in text_with_content(), tail in trailing_breaks(), n in 1u32..8) {
        let text = format!("{body}{tail}");
        let trimmed = trim_trailing_newlines(&text);
        let expected: Vec<&str> = trimmed.split('\n').collect();

        let out = repeat_n(&text, n).unwrap();
        let lines: Vec<&str> = out.split('\n').collect();

        prop_assert_eq!(lines.len(), expected.len() * n as usize);
        for chunk in lines.chunks(expected.len()) {
            prop_assert_eq!(chunk, expected.as_slice());
        }
    }

    /// Output never ends with a line break.
    #[test]
    fn repeat_has_no_trailing_separator(body in text_with_content(), tail in trailing_breaks(), n in 1u32..5) {
        let out = repeat_n(&format!("{body}{tail}"), n).unwrap();
        prop_assert!(!out.ends_with('\n'));
    }

    /// Blank input is refused for every count.
    #[test]
    fn repeat_blank_is_empty_input(text in whitespace_only(), n in 1u32..5) {
        let is_empty_input = matches!(repeat_n(&text, n), Err(Error::EmptyInput { .. }));
        prop_assert!(is_empty_input);
    }
}

// ============================================================================
// Substitution Properties
// ============================================================================

proptest! {
    /// Substitution never changes the char count.
    #[test]
    fn substitute_preserves_char_count(text in unicode_text(), from in "[a-z]{1,5}", to in "[A-Z]{5}") {
        let to: String = to.chars().take(from.chars().count()).collect();
        let result = substitute(&text, &from, &to).unwrap();
        prop_assert_eq!(result.text.chars().count(), text.chars().count());
    }

    /// `changed` counts positions holding a source character.
    #[test]
    fn substitute_counts_key_positions(text in "[a-f ]{0,40}", from in "[a-c]{1,3}") {
        let to = "x".repeat(from.chars().count());
        let result = substitute(&text, &from, &to).unwrap();
        let expected = text.chars().filter(|c| from.contains(*c)).count();
        prop_assert_eq!(result.changed, expected);
    }

    /// A map whose sources never occur leaves the text alone.
    #[test]
    fn substitute_disjoint_is_identity(text in "[a-m]{0,40}") {
        let result = substitute(&text, "xyz", "XYZ").unwrap();
        prop_assert_eq!(result.text, text);
        prop_assert_eq!(result.changed, 0);
    }

    /// Unequal char lengths always fail validation, before looking at text.
    #[test]
    fn substitute_length_mismatch(text in unicode_text(), from in "[a-z]{1,4}", extra in "[a-z]{1,3}") {
        let to = format!("{from}{extra}");
        let err = substitute(&text, &from, &to).unwrap_err();
        let is_mismatch = matches!(err, Error::Validation(ValidationError::LengthMismatch { .. }));
        prop_assert!(is_mismatch);
    }
}

// ============================================================================
// Fixed Cases
// ============================================================================

#[test]
fn substitute_known_cases() {
    common::init_logging();

    let full = substitute("abc", "abc", "xyz").unwrap();
    assert_eq!((full.text.as_str(), full.changed), ("xyz", 3));

    let partial = substitute("hello", "l", "L").unwrap();
    assert_eq!((partial.text.as_str(), partial.changed), ("heLLo", 2));

    assert!(matches!(
        substitute("text", "a", "xy"),
        Err(Error::Validation(ValidationError::LengthMismatch { from: 1, to: 2 }))
    ));
}

#[test]
fn substitute_swaps_in_one_pass() {
    let result = substitute("abab", "ab", "ba").unwrap();
    assert_eq!(result.text, "baba");
    assert_eq!(result.changed, 4);
}

#[test]
fn repeat_zero_and_empty() {
    assert!(matches!(
        repeat_n("abc", 0),
        Err(Error::Validation(ValidationError::NonPositiveCount(0)))
    ));
    assert!(matches!(repeat_n("", 3), Err(Error::EmptyInput { .. })));
}
