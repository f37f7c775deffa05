//! In-memory application options.
//!
//! Nothing here is persisted or read from flags; the shell builds
//! [`Options::default`] and tests override fields directly.

use crate::transform::{DEFAULT_PREVIEW_LINES, RepeatCount};

/// Options for the application and its terminal session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Initial value of the repeat count field.
    pub default_repeat_count: RepeatCount,
    /// Lines shown in the preview panel.
    pub preview_lines: usize,
    /// Draw on the alternate screen and restore the previous contents on exit.
    pub use_alt_screen: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_repeat_count: RepeatCount::DEFAULT,
            preview_lines: DEFAULT_PREVIEW_LINES,
            use_alt_screen: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.default_repeat_count.get(), 2);
        assert_eq!(options.preview_lines, 5);
        assert!(options.use_alt_screen);
    }
}
