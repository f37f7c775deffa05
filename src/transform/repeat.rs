//! Repeat a text body N times.

use crate::error::{Error, Result, ValidationError};
use crate::transform::{is_blank, trim_trailing_newlines};
use std::fmt;
use std::num::NonZeroU32;

/// How many copies the repeater produces. Always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RepeatCount(NonZeroU32);

impl RepeatCount {
    /// Two copies, the initial value of the count field.
    pub const DEFAULT: Self = Self(NonZeroU32::MIN.saturating_add(1));

    /// Build a count, rejecting zero.
    pub fn new(count: u32) -> Result<Self> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or(Error::Validation(ValidationError::NonPositiveCount(0)))
    }

    /// Parse user input. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
        if value < 1 {
            return Err(ValidationError::NonPositiveCount(value).into());
        }
        let value = u32::try_from(value).map_err(|_| ValidationError::TooLarge)?;
        Self::new(value)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest output [`repeat`] will build.
pub const MAX_OUTPUT_BYTES: usize = 1 << 30;

/// Concatenate `count` copies of `text`, separated by `\n`.
///
/// Trailing line breaks of the input are dropped first, and the result has
/// no trailing separator. A count of 1 returns the trimmed input.
///
/// Output over [`MAX_OUTPUT_BYTES`], or that cannot be allocated, is
/// refused with [`ValidationError::TooLarge`].
pub fn repeat(text: &str, count: RepeatCount) -> Result<String> {
    let body = trim_trailing_newlines(text);
    if is_blank(body) {
        return Err(Error::EmptyInput {
            operation: "duplicate",
        });
    }

    let copies = count.get() as usize;
    let capacity = body
        .len()
        .checked_add(1)
        .and_then(|n| n.checked_mul(copies))
        .filter(|&n| n <= MAX_OUTPUT_BYTES)
        .ok_or(ValidationError::TooLarge)?;

    let mut out = String::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| ValidationError::TooLarge)?;
    for _ in 0..copies {
        out.push_str(body);
        out.push('\n');
    }
    out.pop();
    Ok(out)
}

/// [`repeat`] taking a raw integer count.
pub fn repeat_n(text: &str, count: u32) -> Result<String> {
    repeat(text, RepeatCount::new(count)?)
}
