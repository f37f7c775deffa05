//! Error types for textdup.
//!
//! Every error is recoverable at the user action that raised it. The shell
//! turns them into notices via [`Error::severity`].

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for textdup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How loudly an error (or any notice) should be surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Input rejected before a transform runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Repeat count input is not an integer.
    NotANumber(String),
    /// Repeat count parsed but is below 1.
    NonPositiveCount(i64),
    /// Substitution `from` and `to` differ in length (in chars).
    LengthMismatch { from: usize, to: usize },
    /// Substitution `from` is empty.
    EmptySource,
    /// Preview asked for zero lines.
    ZeroPreviewLimit,
    /// Result would not fit in memory addressing.
    TooLarge,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(input) => write!(f, "repeat count is not a number: {input:?}"),
            Self::NonPositiveCount(n) => write!(f, "repeat count must be positive, got {n}"),
            Self::LengthMismatch { from, to } => write!(
                f,
                "substitution lengths differ: {from} source characters, {to} target characters"
            ),
            Self::EmptySource => write!(f, "substitution source is empty"),
            Self::ZeroPreviewLimit => write!(f, "preview needs at least one line"),
            Self::TooLarge => write!(f, "result is too large"),
        }
    }
}

/// Error type for textdup operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid user input (count, substitution strings, preview limit).
    Validation(ValidationError),
    /// The buffer is empty or whitespace-only.
    EmptyInput { operation: &'static str },
    /// File open/read/write failure.
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Severity used when this error is shown to the user.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyInput { .. } => Severity::Warning,
            Self::Validation(_) | Self::Io { .. } => Severity::Error,
        }
    }

    /// Short title for a notice box.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid input",
            Self::EmptyInput { .. } => "Empty text",
            Self::Io { .. } => "File error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::EmptyInput { operation } => write!(f, "nothing to {operation}: text is empty"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
