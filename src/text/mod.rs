//! Text storage and editing.
//!
//! - [`TextBuffer`]: rope-backed text with line access
//! - [`EditBuffer`]: cursor, editing operations and grouped undo/redo
//!
//! # Examples
//!
//! ```
//! use textdup::EditBuffer;
//!
//! let mut editor = EditBuffer::with_text("abc");
//! editor.replace_text("abc\nabc");
//! assert_eq!(editor.text(), "abc\nabc");
//!
//! // A whole-buffer replacement is one undo step
//! editor.undo();
//! assert_eq!(editor.text(), "abc");
//! ```

mod buffer;
mod edit;

pub use buffer::TextBuffer;
pub use edit::{Cursor, EditBuffer};
