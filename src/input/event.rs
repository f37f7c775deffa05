//! Terminal event types.

use crate::input::keyboard::KeyEvent;

/// A terminal input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Text delivered through bracketed paste.
    Paste(String),
    /// Terminal resized (XTWINOPS report), as `(cols, rows)`.
    Resize(u16, u16),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}
