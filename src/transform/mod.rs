//! Pure text transforms.
//!
//! Everything here takes `&str` and returns a new value. Nothing holds state
//! between calls, so the shell can run these directly on its event loop.
//!
//! # Examples
//!
//! ```
//! use textdup::transform::{RepeatCount, repeat, substitute};
//!
//! let count = RepeatCount::parse("3").unwrap();
//! assert_eq!(repeat("ab\n", count).unwrap(), "ab\nab\nab");
//!
//! let result = substitute("hello", "l", "L").unwrap();
//! assert_eq!(result.text, "heLLo");
//! assert_eq!(result.changed, 2);
//! ```

mod preview;
mod repeat;
mod substitute;

pub use preview::{
    DEFAULT_PREVIEW_LINES, PendingTransform, Preview, PreviewLine, PreviewSummary, preview,
};
pub use repeat::{MAX_OUTPUT_BYTES, RepeatCount, repeat, repeat_n};
pub use substitute::{Substitution, SubstitutionMap, substitute};

use std::borrow::Cow;

/// Strip trailing line breaks (`\n` and `\r`).
#[must_use]
pub fn trim_trailing_newlines(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

/// Convert `\r\n` and lone `\r` line breaks to `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// True when the text has no visible content.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Number of lines as the status bar counts them: newlines plus one.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_newlines() {
        assert_eq!(trim_trailing_newlines("a\n\n"), "a");
        assert_eq!(trim_trailing_newlines("a\r\n"), "a");
        assert_eq!(trim_trailing_newlines("\na"), "\na");
        assert_eq!(trim_trailing_newlines(""), "");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_newlines("a\rb\r\n\r"), "a\nb\n\n");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed("a\nb")));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a"), 1);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\nb\n"), 3);
    }
}
