//! ANSI sequence parser for terminal input.
//!
//! Parses raw bytes from the terminal into structured events. Supports:
//! - Control characters and Ctrl+letter chords
//! - CSI and SS3 sequences for navigation and function keys, with modifiers
//! - Bracketed paste
//! - XTWINOPS resize reports
//! - UTF-8 text

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_self)]

use crate::input::event::Event;
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence; its bytes should be skipped.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input.
    InvalidUtf8,
    /// Paste exceeded [`MAX_PASTE_BUFFER_SIZE`] and was dropped through its
    /// end marker; skip `consumed` bytes of this input.
    PasteBufferOverflow { consumed: usize },
}

/// Event and number of bytes consumed.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Maximum size for a single paste (10 MB).
pub const MAX_PASTE_BUFFER_SIZE: usize = 10 * 1024 * 1024;

const PASTE_END: &[u8] = b"\x1b[201~";

/// Parser state for multi-read sequences.
#[derive(Clone, Debug, Default)]
pub struct InputParser {
    in_paste: bool,
    /// Overflowed paste: bytes are skipped until the end marker.
    discarding: bool,
    paste_buffer: Vec<u8>,
}

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one event from the front of `input`.
    ///
    /// Call repeatedly, advancing by the consumed count, until
    /// `Err(ParseError::Empty)` or `Err(ParseError::Incomplete)`.
    pub fn parse(&mut self, input: &[u8]) -> ParseResult {
        if input.is_empty() {
            return Err(ParseError::Empty);
        }
        if self.in_paste {
            return self.parse_paste(input);
        }

        let first = input[0];
        match first {
            0x1b => self.parse_escape(input),
            b'\r' | b'\n' => Ok((KeyEvent::key(KeyCode::Enter).into(), 1)),
            b'\t' => Ok((KeyEvent::key(KeyCode::Tab).into(), 1)),
            0x08 | 0x7f => Ok((KeyEvent::key(KeyCode::Backspace).into(), 1)),
            0x00 => Ok((KeyEvent::ctrl(' ').into(), 1)),
            0x01..=0x1a => {
                let c = (first - 1 + b'a') as char;
                Ok((KeyEvent::ctrl(c).into(), 1))
            }
            0x1c..=0x1f => Err(ParseError::UnrecognizedSequence(vec![first])),
            0x20..=0x7e => Ok((KeyEvent::char(first as char).into(), 1)),
            0x80..=0xff => self.parse_utf8(input),
        }
    }

    /// Resolve bytes left over after a read with no follow-up input.
    ///
    /// A lone ESC is ambiguous until the terminal goes quiet; once it does,
    /// it is the Escape key.
    pub fn flush(&mut self, pending: &[u8]) -> Option<Event> {
        (!self.in_paste && pending == [0x1b]).then(|| KeyEvent::key(KeyCode::Esc).into())
    }

    /// True while a bracketed paste is being collected.
    ///
    /// After `Incomplete` in this state the input has been absorbed and must
    /// not be fed to the parser again.
    #[must_use]
    pub fn is_pasting(&self) -> bool {
        self.in_paste
    }

    fn reset_paste(&mut self) {
        self.in_paste = false;
        self.discarding = false;
        self.paste_buffer.clear();
    }

    fn parse_escape(&mut self, input: &[u8]) -> ParseResult {
        if input.len() == 1 {
            return Err(ParseError::Incomplete);
        }
        match input[1] {
            b'[' => self.parse_csi(input),
            b'O' => self.parse_ss3(input),
            0x1b => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
            0x20..=0x7e => {
                let c = input[1] as char;
                Ok((KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT).into(), 2))
            }
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    fn parse_csi(&mut self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        let Some(end) = input[2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map(|pos| pos + 2)
        else {
            return Err(ParseError::Incomplete);
        };

        let params = &input[2..end];
        let consumed = end + 1;

        match input[end] {
            b'A' => self.modified_key(params, KeyCode::Up, consumed),
            b'B' => self.modified_key(params, KeyCode::Down, consumed),
            b'C' => self.modified_key(params, KeyCode::Right, consumed),
            b'D' => self.modified_key(params, KeyCode::Left, consumed),
            b'H' => self.modified_key(params, KeyCode::Home, consumed),
            b'F' => self.modified_key(params, KeyCode::End, consumed),
            b'Z' => Ok((KeyEvent::key(KeyCode::BackTab).into(), consumed)),
            b'~' => self.parse_tilde_key(input, params, consumed),
            b't' => self.parse_resize(&input[..consumed], params),
            _ => Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        }
    }

    fn modified_key(&self, params: &[u8], code: KeyCode, consumed: usize) -> ParseResult {
        let modifiers = parse_modifiers(params)?;
        Ok((KeyEvent::new(code, modifiers).into(), consumed))
    }

    /// `ESC [ <n> [; <mods>] ~`: Insert, Delete, paging, F5+ and paste start.
    fn parse_tilde_key(&mut self, input: &[u8], params: &[u8], consumed: usize) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let num: u16 = s
            .split(';')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            200 => {
                self.in_paste = true;
                self.discarding = false;
                self.paste_buffer.clear();
                return self
                    .parse_paste(&input[consumed..])
                    .map(|(event, used)| (event, used + consumed))
                    .map_err(|e| match e {
                        ParseError::PasteBufferOverflow { consumed: used } => {
                            ParseError::PasteBufferOverflow {
                                consumed: used + consumed,
                            }
                        }
                        other => other,
                    });
            }
            _ => return Err(ParseError::UnrecognizedSequence(input[..consumed].to_vec())),
        };

        let modifiers = parse_modifiers(params)?;
        Ok((KeyEvent::new(code, modifiers).into(), consumed))
    }

    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }
        let code = match input[2] {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::UnrecognizedSequence(input[..3].to_vec())),
        };
        Ok((KeyEvent::key(code).into(), 3))
    }

    /// `CSI 8 ; rows ; cols t`.
    fn parse_resize(&self, sequence: &[u8], params: &[u8]) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        if let ["8", rows, cols] = parts.as_slice() {
            if let (Ok(rows), Ok(cols)) = (rows.parse(), cols.parse()) {
                return Ok((Event::Resize(cols, rows), sequence.len()));
            }
        }
        Err(ParseError::UnrecognizedSequence(sequence.to_vec()))
    }

    /// Accumulate paste content until the end marker.
    ///
    /// Bytes given to this function are absorbed even when it returns
    /// `Incomplete`; see [`InputParser::is_pasting`]. The end marker may be
    /// split across reads.
    fn parse_paste(&mut self, input: &[u8]) -> ParseResult {
        if self.discarding {
            return self.discard_paste(input);
        }
        if self.paste_buffer.len() + input.len() > MAX_PASTE_BUFFER_SIZE + PASTE_END.len() {
            self.discarding = true;
            self.keep_marker_tail();
            return self.discard_paste(input);
        }

        let search_from = self.paste_buffer.len().saturating_sub(PASTE_END.len() - 1);
        self.paste_buffer.extend_from_slice(input);

        let Some(pos) = find_subsequence(&self.paste_buffer[search_from..], PASTE_END) else {
            return Err(ParseError::Incomplete);
        };
        let end = search_from + pos;
        let trailing = self.paste_buffer.len() - (end + PASTE_END.len());
        let content = String::from_utf8_lossy(&self.paste_buffer[..end]).into_owned();
        self.reset_paste();
        Ok((Event::Paste(content), input.len() - trailing))
    }

    /// Skip an overflowed paste. Until the end marker shows up this returns
    /// `Incomplete` with the input absorbed, like a paste in progress.
    fn discard_paste(&mut self, input: &[u8]) -> ParseResult {
        let tail = self.paste_buffer.len();
        self.paste_buffer.extend_from_slice(input);
        if let Some(pos) = find_subsequence(&self.paste_buffer, PASTE_END) {
            let consumed = pos + PASTE_END.len() - tail;
            self.reset_paste();
            return Err(ParseError::PasteBufferOverflow { consumed });
        }
        self.keep_marker_tail();
        Err(ParseError::Incomplete)
    }

    /// Keep only the bytes that could start an end marker split across reads.
    fn keep_marker_tail(&mut self) {
        let cut = self.paste_buffer.len().saturating_sub(PASTE_END.len() - 1);
        self.paste_buffer.drain(..cut);
    }

    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];
        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
        Ok((KeyEvent::char(c).into(), expected_len))
    }
}

/// Modifiers from CSI params `1;N`, where `N - 1` is a shift/alt/ctrl bitmask.
fn parse_modifiers(params: &[u8]) -> Result<KeyModifiers, ParseError> {
    let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
    let Some(n) = s.split(';').nth(1).and_then(|p| p.parse::<u8>().ok()) else {
        return Ok(KeyModifiers::empty());
    };
    let n = n.saturating_sub(1);
    let mut mods = KeyModifiers::empty();
    if n & 1 != 0 {
        mods |= KeyModifiers::SHIFT;
    }
    if n & 2 != 0 {
        mods |= KeyModifiers::ALT;
    }
    if n & 4 != 0 {
        mods |= KeyModifiers::CTRL;
    }
    Ok(mods)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
