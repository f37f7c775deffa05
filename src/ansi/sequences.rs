//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Enable alternative screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Disable alternative screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Enable bracketed paste mode.
pub const BRACKETED_PASTE_ON: &str = "\x1b[?2004h";

/// Disable bracketed paste mode.
pub const BRACKETED_PASTE_OFF: &str = "\x1b[?2004l";

/// Set window title prefix.
pub const TITLE_PREFIX: &str = "\x1b]0;";

/// Set window title suffix.
pub const TITLE_SUFFIX: &str = "\x1b\\";

/// Synchronous update sequences (for flicker-free redraws).
pub mod sync {
    /// Begin synchronized update.
    pub const BEGIN: &str = "\x1b[?2026h";
    /// End synchronized update.
    pub const END: &str = "\x1b[?2026l";
}
