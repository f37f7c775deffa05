//! A screen's worth of styled text and its ANSI serialisation.

use crate::ansi::{self, sequences};
use crate::style::Style;
use crate::unicode::{display_width, expand_tabs, truncate_to_width};
use std::io::{self, Write};

/// A run of text with one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    #[must_use]
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }
}

/// One screen row: spans plus a fill style for the rest of the row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub spans: Vec<Span>,
    pub fill: Style,
}

/// Rendered screen content. Rows past `height` and text past `width` are
/// clipped when added, so serialisation never writes outside the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    rows: Vec<Row>,
    cursor: Option<(usize, usize)>,
}

impl Frame {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![Row::default(); height],
            cursor: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace row `y` with `spans`, clipped to the frame width.
    pub fn set_row(&mut self, y: usize, spans: Vec<Span>, fill: Style) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let mut remaining = self.width;
        let mut clipped = Vec::with_capacity(spans.len());
        for span in spans {
            if remaining == 0 {
                break;
            }
            let text = expand_tabs(&span.text);
            let (fit, used) = truncate_to_width(&text, remaining);
            if !fit.is_empty() {
                clipped.push(Span::new(fit, span.style));
            }
            remaining -= used;
        }
        *row = Row {
            spans: clipped,
            fill,
        };
    }

    /// Show the terminal cursor at `(row, col)`; `None` hides it.
    pub fn set_cursor(&mut self, cursor: Option<(usize, usize)>) {
        self.cursor = cursor.filter(|&(row, col)| row < self.height && col < self.width);
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    /// Plain text of row `y`, padded to nothing. For tests and logs.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.spans.iter().map(|s| s.text.as_str()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    /// Serialise the whole frame as ANSI.
    ///
    /// Each row is drawn from column 0 and its tail painted with the row's
    /// fill style, so no previous content survives a redraw.
    pub fn write_ansi<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(sequences::CURSOR_HIDE.as_bytes())?;
        for (y, row) in self.rows.iter().enumerate() {
            ansi::write_cursor_to(w, y, 0)?;
            let mut used = 0;
            for span in &row.spans {
                ansi::write_style(w, span.style)?;
                w.write_all(span.text.as_bytes())?;
                used += display_width(&span.text);
            }
            ansi::write_style(w, row.fill)?;
            if used < self.width {
                if row.fill.bg.is_some() || !row.fill.attributes.is_empty() {
                    w.write_all(" ".repeat(self.width - used).as_bytes())?;
                } else {
                    w.write_all(sequences::CLEAR_LINE_RIGHT.as_bytes())?;
                }
            }
        }
        w.write_all(sequences::RESET.as_bytes())?;
        if let Some((row, col)) = self.cursor {
            ansi::write_cursor_to(w, row, col)?;
            w.write_all(sequences::CURSOR_SHOW.as_bytes())?;
        }
        Ok(())
    }

    /// [`write_ansi`](Self::write_ansi) into a fresh byte vector.
    #[must_use]
    pub fn to_ansi(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_ansi(&mut out);
        out
    }
}
