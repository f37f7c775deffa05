//! Display width and grapheme-aware clipping for terminal cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns a tab advances to (multiples of this width).
pub const TAB_WIDTH: usize = 4;

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}


/// Replace tabs with spaces up to the next tab stop and drop other control
/// characters, so every remaining grapheme has a stable width.
#[must_use]
pub fn expand_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut col = 0;
    for g in s.graphemes(true) {
        if g == "\t" {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else if g.chars().all(char::is_control) {
            continue;
        } else {
            out.push_str(g);
            col += display_width(g);
        }
    }
    out
}

/// Clip `s` to at most `width` columns without splitting a grapheme.
///
/// Returns the clipped text and its width. A wide grapheme that would
/// straddle the edge is dropped.
#[must_use]
pub fn truncate_to_width(s: &str, width: usize) -> (&str, usize) {
    let mut used = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = display_width(g);
        if used + w > width {
            return (&s[..idx], used);
        }
        used += w;
    }
    (s, used)
}

/// Skip the first `cols` columns of `s`, for horizontal scrolling.
///
/// A wide grapheme cut by the left edge is dropped entirely.
#[must_use]
pub fn skip_columns(s: &str, cols: usize) -> &str {
    if cols == 0 {
        return s;
    }
    let mut used = 0;
    for (idx, g) in s.grapheme_indices(true) {
        if used >= cols {
            return &s[idx..];
        }
        used += display_width(g);
    }
    ""
}
