//! Rope-backed text storage.

use ropey::{Rope, RopeSlice};
use std::fmt;

/// The text being edited.
///
/// Backed by [`ropey::Rope`] so edits in large files stay cheap.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replace the entire contents.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines, counting the (possibly empty) line after a final `\n`.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line `idx` without its line break.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<String> {
        self.line_slice(idx).map(|line| {
            let mut s = line.to_string();
            while s.ends_with(['\n', '\r']) {
                s.pop();
            }
            s
        })
    }

    /// Line `idx` including its line break.
    fn line_slice(&self, idx: usize) -> Option<RopeSlice<'_>> {
        (idx < self.rope.len_lines()).then(|| self.rope.line(idx))
    }

    /// Number of chars in line `idx`, excluding its line break.
    #[must_use]
    pub fn line_len_chars(&self, idx: usize) -> usize {
        let Some(line) = self.line_slice(idx) else {
            return 0;
        };
        let mut len = line.len_chars();
        while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
            len -= 1;
        }
        len
    }

    /// Insert text at a char offset. Offsets past the end are ignored.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() && !text.is_empty() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove chars in `start..end`, clamped to the buffer.
    pub fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Text of chars in `start..end`, clamped to the buffer.
    #[must_use]
    pub fn slice_string(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Char offset of the start of a line; the end of the buffer past the last line.
    #[must_use]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
