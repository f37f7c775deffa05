//! Terminal session management.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, read_with_timeout, terminal_size};

use crate::ansi::{self, sequences};
use std::io::{self, Write};

/// A full-screen terminal session.
///
/// Everything enabled through the session is undone when it is dropped, in
/// reverse order, so an early return or error in the event loop still
/// leaves the user's terminal usable.
pub struct Terminal<W: Write> {
    writer: W,
    alt_screen: bool,
    cursor_hidden: bool,
    bracketed_paste: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    /// Wrap a writer. Nothing is sent until a mode is enabled.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            alt_screen: false,
            cursor_hidden: false,
            bracketed_paste: false,
            raw_mode_guard: None,
        }
    }

    /// Put stdin into raw mode.
    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_ON.as_bytes())?;
            self.alt_screen = true;
        }
        Ok(())
    }

    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_OFF.as_bytes())?;
            self.alt_screen = false;
        }
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if !self.cursor_hidden {
            self.writer.write_all(sequences::CURSOR_HIDE.as_bytes())?;
            self.cursor_hidden = true;
        }
        Ok(())
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        if self.cursor_hidden {
            self.writer.write_all(sequences::CURSOR_SHOW.as_bytes())?;
            self.cursor_hidden = false;
        }
        Ok(())
    }

    /// Ask the terminal to wrap pasted text in markers, so a paste arrives
    /// as one event instead of a stream of keystrokes.
    pub fn enable_bracketed_paste(&mut self) -> io::Result<()> {
        if !self.bracketed_paste {
            self.writer
                .write_all(sequences::BRACKETED_PASTE_ON.as_bytes())?;
            self.bracketed_paste = true;
        }
        Ok(())
    }

    pub fn disable_bracketed_paste(&mut self) -> io::Result<()> {
        if self.bracketed_paste {
            self.writer
                .write_all(sequences::BRACKETED_PASTE_OFF.as_bytes())?;
            self.bracketed_paste = false;
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        ansi::write_title(&mut self.writer, title)
    }

    /// Write a pre-rendered frame inside a synchronized update and flush.
    pub fn present(&mut self, frame: &[u8]) -> io::Result<()> {
        self.writer.write_all(sequences::sync::BEGIN.as_bytes())?;
        self.writer.write_all(frame)?;
        self.writer.write_all(sequences::sync::END.as_bytes())?;
        self.writer.flush()
    }

    /// Undo every mode this session enabled.
    pub fn restore(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.disable_bracketed_paste()?;
        self.show_cursor()?;
        self.leave_alt_screen()?;
        self.writer.flush()?;
        self.raw_mode_guard = None;
        Ok(())
    }

    /// Access the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(term: &Terminal<Vec<u8>>) -> String {
        String::from_utf8_lossy(term.writer()).into_owned()
    }

    #[test]
    fn test_modes_are_idempotent() {
        let mut term = Terminal::new(Vec::new());
        term.enter_alt_screen().unwrap();
        term.enter_alt_screen().unwrap();
        assert_eq!(output(&term).matches(sequences::ALT_SCREEN_ON).count(), 1);
    }

    #[test]
    fn test_restore_undoes_enabled_modes() {
        let mut term = Terminal::new(Vec::new());
        term.enter_alt_screen().unwrap();
        term.hide_cursor().unwrap();
        term.enable_bracketed_paste().unwrap();
        term.restore().unwrap();
        let out = output(&term);
        assert!(out.contains(sequences::ALT_SCREEN_OFF));
        assert!(out.contains(sequences::CURSOR_SHOW));
        assert!(out.contains(sequences::BRACKETED_PASTE_OFF));
    }

    #[test]
    fn test_restore_without_modes_only_resets() {
        let mut term = Terminal::new(Vec::new());
        term.restore().unwrap();
        assert_eq!(output(&term), sequences::RESET);
    }

    #[test]
    fn test_present_wraps_in_sync() {
        let mut term = Terminal::new(Vec::new());
        term.present(b"frame").unwrap();
        let out = output(&term);
        assert!(out.starts_with(sequences::sync::BEGIN));
        assert!(out.ends_with(sequences::sync::END));
    }
}
