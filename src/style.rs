//! Text styling: attributes and a small named palette.
//!
//! The shell only needs a handful of looks (toolbar, status bar, notices,
//! cursor), so colors are the 16 standard terminal colors rather than RGB.

use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD      = 0x01;
        /// Dim/decreased intensity.
        const DIM       = 0x02;
        /// Underlined text.
        const UNDERLINE = 0x04;
        /// Swapped foreground/background.
        const INVERSE   = 0x08;
    }
}

/// Standard terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightWhite,
}

impl Color {
    /// SGR parameter for this color as a foreground.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightWhite => 97,
        }
    }

    /// SGR parameter for this color as a background.
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }
}

/// Complete style for a run of text. `None` colors use the terminal default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attributes: TextAttributes,
}

impl Style {
    /// Terminal default look.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            attributes: TextAttributes::empty(),
        }
    }

    #[must_use]
    pub const fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn with_attributes(mut self, attributes: TextAttributes) -> Self {
        self.attributes = self.attributes.union(attributes);
        self
    }

    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    #[must_use]
    pub const fn with_inverse(self) -> Self {
        self.with_attributes(TextAttributes::INVERSE)
    }

    #[must_use]
    pub const fn with_dim(self) -> Self {
        self.with_attributes(TextAttributes::DIM)
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}
