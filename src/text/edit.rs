//! Editable text buffer with cursor and undo/redo.
//!
//! [`EditBuffer`] wraps a [`TextBuffer`] with cursor movement, insertion,
//! deletion and grouped undo history. Transforms replace the whole text
//! through [`EditBuffer::replace_text`], which records a single undo group.

use crate::text::TextBuffer;

/// Cursor position in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Character offset in the buffer.
    pub offset: usize,
    /// Line number (0-indexed).
    pub row: usize,
    /// Column in chars (0-indexed).
    pub col: usize,
}

#[derive(Clone, Debug)]
enum EditOp {
    Insert { offset: usize, text: String },
    Delete { offset: usize, text: String },
}

impl EditOp {
    fn invert(&self) -> Self {
        match self {
            Self::Insert { offset, text } => Self::Delete {
                offset: *offset,
                text: text.clone(),
            },
            Self::Delete { offset, text } => Self::Insert {
                offset: *offset,
                text: text.clone(),
            },
        }
    }
}

/// Undo groups kept before the oldest are dropped.
const DEFAULT_MAX_HISTORY_DEPTH: usize = 200;

#[derive(Clone, Debug)]
struct History {
    undo_stack: Vec<Vec<EditOp>>,
    redo_stack: Vec<Vec<EditOp>>,
    current_group: Vec<EditOp>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current_group: Vec::new(),
            max_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl History {
    fn push(&mut self, op: EditOp) {
        self.current_group.push(op);
        self.redo_stack.clear();
    }

    fn commit(&mut self) {
        if self.current_group.is_empty() {
            return;
        }
        self.undo_stack
            .push(std::mem::take(&mut self.current_group));
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }

    fn pop_undo(&mut self) -> Option<Vec<EditOp>> {
        self.commit();
        self.undo_stack.pop()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_group.clear();
    }
}

/// Text buffer with cursor, editing operations and undo/redo.
///
/// Typing is grouped until [`commit`](Self::commit) is called; the shell
/// commits on every non-typing key so a word typed in one go undoes as one
/// step.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    buffer: TextBuffer,
    cursor: Cursor,
    history: History,
}

impl EditBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Load fresh content: cursor to start, history cleared.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.cursor = Cursor::default();
        self.history.clear();
    }

    /// Replace the whole text as one undoable step.
    pub fn replace_text(&mut self, text: &str) {
        self.history.commit();
        let old = self.buffer.to_string();
        if old == text {
            return;
        }
        if !old.is_empty() {
            self.history.push(EditOp::Delete {
                offset: 0,
                text: old,
            });
        }
        if !text.is_empty() {
            self.history.push(EditOp::Insert {
                offset: 0,
                text: text.to_string(),
            });
        }
        self.history.commit();
        self.buffer.set_text(text);
        self.cursor = Cursor::default();
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn move_left(&mut self) {
        if self.cursor.offset > 0 {
            self.cursor.offset -= 1;
            self.update_cursor_position();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor.offset < self.buffer.len_chars() {
            self.cursor.offset += 1;
            self.update_cursor_position();
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.update_cursor_from_row_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.buffer.len_lines() {
            self.cursor.row += 1;
            self.update_cursor_from_row_col();
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
        self.update_cursor_from_row_col();
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.buffer.line_len_chars(self.cursor.row);
        self.update_cursor_from_row_col();
    }

    /// Move up by `lines`, keeping the column where possible.
    pub fn page_up(&mut self, lines: usize) {
        self.cursor.row = self.cursor.row.saturating_sub(lines);
        self.update_cursor_from_row_col();
    }

    /// Move down by `lines`, stopping on the last line.
    pub fn page_down(&mut self, lines: usize) {
        let last = self.buffer.len_lines().saturating_sub(1);
        self.cursor.row = self.cursor.row.saturating_add(lines).min(last);
        self.update_cursor_from_row_col();
    }

    /// Insert text at the cursor.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = self.cursor.offset;
        self.buffer.insert(offset, text);
        self.history.push(EditOp::Insert {
            offset,
            text: text.to_string(),
        });
        self.cursor.offset += text.chars().count();
        self.update_cursor_position();
    }

    /// Delete the character before the cursor. A `\r\n` pair goes as one.
    pub fn delete_backward(&mut self) {
        let end = self.cursor.offset;
        if end == 0 {
            return;
        }
        let start = if end >= 2 && self.buffer.slice_string(end - 2, end) == "\r\n" {
            end - 2
        } else {
            end - 1
        };
        self.delete_range(start, end);
    }

    /// Delete the character after the cursor. A `\r\n` pair goes as one.
    pub fn delete_forward(&mut self) {
        let start = self.cursor.offset;
        if start >= self.buffer.len_chars() {
            return;
        }
        let end = if self.buffer.slice_string(start, start + 2) == "\r\n" {
            start + 2
        } else {
            start + 1
        };
        self.delete_range(start, end);
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        let deleted = self.buffer.slice_string(start, end);
        self.buffer.remove(start, end);
        self.history.push(EditOp::Delete {
            offset: start,
            text: deleted,
        });
        self.cursor.offset = start;
        self.update_cursor_position();
    }

    /// Undo the last edit group. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(ops) = self.history.pop_undo() else {
            return false;
        };
        for op in ops.iter().rev() {
            self.apply_op(&op.invert());
        }
        self.history.redo_stack.push(ops);
        true
    }

    /// Redo the last undone group. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(ops) = self.history.redo_stack.pop() else {
            return false;
        };
        for op in &ops {
            self.apply_op(op);
        }
        self.history.undo_stack.push(ops);
        true
    }

    /// Close the current undo group.
    pub fn commit(&mut self) {
        self.history.commit();
    }

    fn apply_op(&mut self, op: &EditOp) {
        match op {
            EditOp::Insert { offset, text } => {
                self.buffer.insert(*offset, text);
                self.cursor.offset = offset + text.chars().count();
            }
            EditOp::Delete { offset, text } => {
                self.buffer.remove(*offset, offset + text.chars().count());
                self.cursor.offset = *offset;
            }
        }
        self.update_cursor_position();
    }

    fn update_cursor_position(&mut self) {
        self.cursor.offset = self.cursor.offset.min(self.buffer.len_chars());
        self.cursor.row = self.buffer.char_to_line(self.cursor.offset);
        let line_start = self.buffer.line_to_char(self.cursor.row);
        self.cursor.col = self.cursor.offset.saturating_sub(line_start);
    }

    fn update_cursor_from_row_col(&mut self) {
        let line_start = self.buffer.line_to_char(self.cursor.row);
        self.cursor.col = self.cursor.col.min(self.buffer.line_len_chars(self.cursor.row));
        self.cursor.offset = line_start + self.cursor.col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = EditBuffer::new();
        buf.insert("ab\ncd");
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor { offset: 5, row: 1, col: 2 });
    }

    #[test]
    fn test_delete_backward_and_forward() {
        let mut buf = EditBuffer::with_text("abc");
        buf.move_to_line_end();
        buf.delete_backward();
        assert_eq!(buf.text(), "ab");
        buf.move_to_line_start();
        buf.delete_forward();
        assert_eq!(buf.text(), "b");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut buf = EditBuffer::with_text("long line\nab\nthird");
        buf.move_to_line_end();
        buf.move_down();
        assert_eq!(buf.cursor().row, 1);
        assert_eq!(buf.cursor().col, 2);
        buf.page_down(10);
        assert_eq!(buf.cursor().row, 2);
        buf.page_up(10);
        assert_eq!(buf.cursor().row, 0);
    }

    #[test]
    fn test_typing_undoes_as_group() {
        let mut buf = EditBuffer::new();
        buf.insert("a");
        buf.insert("b");
        buf.commit();
        buf.insert("c");
        assert!(buf.undo());
        assert_eq!(buf.text(), "ab");
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert!(!buf.undo());
        assert!(buf.redo());
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_replace_text_is_one_step() {
        let mut buf = EditBuffer::with_text("abc");
        buf.replace_text("abc\nabc");
        assert_eq!(buf.text(), "abc\nabc");
        assert!(buf.undo());
        assert_eq!(buf.text(), "abc");
        assert!(buf.redo());
        assert_eq!(buf.text(), "abc\nabc");
    }

    #[test]
    fn test_set_text_clears_history() {
        let mut buf = EditBuffer::new();
        buf.insert("x");
        buf.set_text("fresh");
        assert_eq!(buf.cursor(), Cursor::default());
        assert!(!buf.undo());
        assert_eq!(buf.text(), "fresh");
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = EditBuffer::with_text("a");
        buf.replace_text("b");
        assert!(buf.undo());
        buf.insert("z");
        assert!(!buf.redo());
        assert_eq!(buf.text(), "za");
    }

    #[test]
    fn test_crlf_pair_deleted_together() {
        let mut buf = EditBuffer::with_text("a\r\nb");
        buf.move_down();
        buf.delete_backward();
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor().offset, 1);

        let mut buf = EditBuffer::with_text("a\r\nb");
        buf.move_to_line_end();
        buf.delete_forward();
        assert_eq!(buf.text(), "ab");

        assert!(buf.undo());
        assert_eq!(buf.text(), "a\r\nb");
    }
}
