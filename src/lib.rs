//! `textdup` - repeat and character-substitute text in the terminal
//!
//! The transforms ([`repeat`], [`substitute`], [`preview`]) and file I/O
//! ([`io::load`], [`io::save`]) are plain functions usable on their own.
//! [`App`] holds the editing session and [`ui`] draws it as a full-screen
//! terminal application.
//!
//! # Example
//!
//! ```
//! use textdup::{RepeatCount, repeat, substitute};
//!
//! let twice = repeat("line\n", RepeatCount::DEFAULT).unwrap();
//! assert_eq!(twice, "line\nline");
//!
//! let swapped = substitute("hello", "l", "L").unwrap();
//! assert_eq!(swapped.text, "heLLo");
//! assert_eq!(swapped.changed, 2);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional timeval casts
#![allow(clippy::cast_possible_wrap)] // Intentional timeval casts
#![allow(clippy::module_name_repetitions)] // Allow KeyEvent in input etc
#![allow(clippy::missing_errors_doc)] // Errors are described on the Error type
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod io;
pub mod style;
pub mod terminal;
pub mod text;
pub mod transform;
pub mod ui;
pub mod unicode;

// Re-export core types at crate root
pub use app::{App, Notice};
pub use config::Options;
pub use error::{Error, Result, Severity, ValidationError};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use style::{Color, Style, TextAttributes};

// Re-export transforms
pub use transform::{
    PendingTransform, Preview, PreviewLine, PreviewSummary, RepeatCount, Substitution,
    SubstitutionMap, preview, repeat, repeat_n, substitute,
};

// Re-export input and terminal types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers};
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
pub use text::{Cursor, EditBuffer, TextBuffer};
pub use ui::{Flow, Frame, Ui};
