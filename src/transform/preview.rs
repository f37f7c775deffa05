//! Read-only projection of the first lines under a pending transform.

use crate::error::{Error, Result, ValidationError};
use crate::transform::{RepeatCount, SubstitutionMap, is_blank, trim_trailing_newlines};
use std::fmt;

/// Lines shown by the preview panel unless configured otherwise.
pub const DEFAULT_PREVIEW_LINES: usize = 5;

/// The transform a preview projects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingTransform {
    Repeat(RepeatCount),
    Substitute(SubstitutionMap),
}

/// One previewed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewLine {
    /// 1-based line number.
    pub number: usize,
    pub original: String,
    /// The line after substitution, when the map changes it.
    pub transformed: Option<String>,
}

/// Result of [`preview`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub lines: Vec<PreviewLine>,
    /// Line limit the preview was taken with.
    pub limit: usize,
    /// Line count of the whole (trimmed) text.
    pub total_lines: usize,
    /// What will happen to the whole text.
    pub summary: PreviewSummary,
}

/// Effect of the pending transform on the whole text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSummary {
    Repeat(RepeatCount),
    Substitute { changed: usize },
}

impl Preview {
    /// True when the text is shorter than the limit, so nothing can be cut.
    ///
    /// Text of exactly `limit` lines still reads as "first N lines".
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lines.len() < self.limit
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            writeln!(f, "Preview (all lines):")?;
        } else {
            writeln!(f, "Preview (first {} lines):", self.lines.len())?;
        }
        for line in &self.lines {
            write!(f, "Line {}: {}", line.number, line.original)?;
            if let Some(transformed) = &line.transformed {
                write!(f, " -> {transformed}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        match self.summary {
            PreviewSummary::Repeat(count) => write!(f, "Will be duplicated {count} times"),
            PreviewSummary::Substitute { changed } => {
                write!(f, "Will replace {changed} characters")
            }
        }
    }
}

/// Project the first `limit` lines of `text` under `transform`.
pub fn preview(text: &str, limit: usize, transform: &PendingTransform) -> Result<Preview> {
    if limit == 0 {
        return Err(ValidationError::ZeroPreviewLimit.into());
    }
    let body = trim_trailing_newlines(text);
    if is_blank(body) {
        return Err(Error::EmptyInput {
            operation: "preview",
        });
    }

    let total_lines = body.split('\n').count();
    let lines = body
        .split('\n')
        .take(limit)
        .enumerate()
        .map(|(i, original)| {
            let original = original.strip_suffix('\r').unwrap_or(original);
            let transformed = match transform {
                PendingTransform::Repeat(_) => None,
                PendingTransform::Substitute(map) => {
                    let mapped = map.apply(original);
                    (mapped.changed > 0 && mapped.text != original).then_some(mapped.text)
                }
            };
            PreviewLine {
                number: i + 1,
                original: original.to_string(),
                transformed,
            }
        })
        .collect();

    let summary = match transform {
        PendingTransform::Repeat(count) => PreviewSummary::Repeat(*count),
        PendingTransform::Substitute(map) => PreviewSummary::Substitute {
            changed: map.apply(body).changed,
        },
    };

    Ok(Preview {
        lines,
        limit,
        total_lines,
        summary,
    })
}
