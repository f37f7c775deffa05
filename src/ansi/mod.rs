//! ANSI escape sequence generation.

pub mod sequences;

pub use sequences::*;

use crate::style::{Style, TextAttributes};
use std::io::{self, Write};

/// Write a cursor move to a 0-indexed `(row, col)`.
pub fn write_cursor_to<W: Write>(w: &mut W, row: usize, col: usize) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", row + 1, col + 1)
}

/// Write a full SGR sequence for `style`, starting from a reset.
///
/// Always resetting first keeps consecutive spans independent of each other.
pub fn write_style<W: Write>(w: &mut W, style: Style) -> io::Result<()> {
    w.write_all(b"\x1b[0")?;
    let attrs = style.attributes;
    if attrs.contains(TextAttributes::BOLD) {
        w.write_all(b";1")?;
    }
    if attrs.contains(TextAttributes::DIM) {
        w.write_all(b";2")?;
    }
    if attrs.contains(TextAttributes::UNDERLINE) {
        w.write_all(b";4")?;
    }
    if attrs.contains(TextAttributes::INVERSE) {
        w.write_all(b";7")?;
    }
    if let Some(fg) = style.fg {
        write!(w, ";{}", fg.fg_code())?;
    }
    if let Some(bg) = style.bg {
        write!(w, ";{}", bg.bg_code())?;
    }
    w.write_all(b"m")
}

/// Write a window title sequence. Control characters are dropped.
pub fn write_title<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    w.write_all(TITLE_PREFIX.as_bytes())?;
    let clean: String = title.chars().filter(|c| !c.is_control()).collect();
    w.write_all(clean.as_bytes())?;
    w.write_all(TITLE_SUFFIX.as_bytes())
}
