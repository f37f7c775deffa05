//! One-to-one character substitution.

use crate::error::{Result, ValidationError};
use std::collections::HashMap;

/// Character-to-character mapping built from two equal-length strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    map: HashMap<char, char>,
}

impl SubstitutionMap {
    /// Pair `from[i]` with `to[i]` for every char position.
    ///
    /// Lengths are compared in chars, not bytes. When `from` repeats a
    /// character, the last occurrence decides its target:
    /// `("aa", "xy")` maps `'a'` to `'y'`.
    pub fn new(from: &str, to: &str) -> Result<Self> {
        let from_len = from.chars().count();
        let to_len = to.chars().count();
        if from_len != to_len {
            return Err(ValidationError::LengthMismatch {
                from: from_len,
                to: to_len,
            }
            .into());
        }
        if from_len == 0 {
            return Err(ValidationError::EmptySource.into());
        }

        let map = from.chars().zip(to.chars()).collect();
        Ok(Self { map })
    }

    /// Target for `c`, if `c` is a key.
    #[must_use]
    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    /// Number of distinct source characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply the map in one left-to-right pass.
    ///
    /// Every position whose char is a key counts as changed, including keys
    /// that map to themselves.
    #[must_use]
    pub fn apply(&self, text: &str) -> Substitution {
        let mut out = String::with_capacity(text.len());
        let mut changed = 0;
        for c in text.chars() {
            match self.get(c) {
                Some(mapped) => {
                    out.push(mapped);
                    changed += 1;
                }
                None => out.push(c),
            }
        }
        Substitution { text: out, changed }
    }
}

/// Output of a substitution pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    /// The transformed text.
    pub text: String,
    /// Number of substituted positions.
    pub changed: usize,
}

/// Replace every `from[i]` in `text` with `to[i]`.
pub fn substitute(text: &str, from: &str, to: &str) -> Result<Substitution> {
    Ok(SubstitutionMap::new(from, to)?.apply(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_full_mapping() {
        let result = substitute("abc", "abc", "xyz").unwrap();
        assert_eq!(result.text, "xyz");
        assert_eq!(result.changed, 3);
    }

    #[test]
    fn test_repeated_target() {
        let result = substitute("hello", "l", "L").unwrap();
        assert_eq!(result.text, "heLLo");
        assert_eq!(result.changed, 2);
    }

    #[test]
    fn test_length_mismatch() {
        let err = substitute("text", "a", "xy").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::LengthMismatch { from: 1, to: 2 })
        ));
    }

    #[test]
    fn test_empty_source() {
        assert!(matches!(
            substitute("text", "", "").unwrap_err(),
            Error::Validation(ValidationError::EmptySource)
        ));
    }

    #[test]
    fn test_single_pass_no_chaining() {
        // a->b and b->a swap rather than collapse
        let result = substitute("abba", "ab", "ba").unwrap();
        assert_eq!(result.text, "baab");
        assert_eq!(result.changed, 4);
    }

    #[test]
    fn test_duplicate_source_last_wins() {
        let map = SubstitutionMap::new("aa", "xy").unwrap();
        assert_eq!(map.get('a'), Some('y'));
        assert_eq!(map.len(), 1);
        assert_eq!(map.apply("banana").text, "bynyny");
    }

    #[test]
    fn test_identity_mapping_still_counts() {
        let result = substitute("aaa", "a", "a").unwrap();
        assert_eq!(result.text, "aaa");
        assert_eq!(result.changed, 3);
    }

    #[test]
    fn test_multibyte_lengths_counted_in_chars() {
        let result = substitute("привет", "ие", "ie").unwrap();
        assert_eq!(result.text, "прiвeт");
        assert_eq!(result.changed, 2);
    }

    #[test]
    fn test_empty_text() {
        let result = substitute("", "a", "b").unwrap();
        assert_eq!(result.text, "");
        assert_eq!(result.changed, 0);
    }
}
