//! Input parsing for terminal events.
//!
//! Turns the raw byte stream from a terminal in raw mode into keys (with
//! modifiers), bracketed pastes and resize reports.

mod event;
mod keyboard;
mod parser;

pub use event::Event;
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult};
