#![forbid(unsafe_code)]

//! The fixed colour tokens a colour property may hold.
//!
//! The set is closed and frozen: white, black, clear, always in that order.
//! Each token carries a stable machine name (used as the select option
//! value) and a label (the visible option text).

use std::str::FromStr;

/// One of the three colour tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
    Clear,
}

impl Colour {
    /// Every token, in control order.
    pub const ALL: [Colour; 3] = [Colour::White, Colour::Black, Colour::Clear];

    /// Stable machine name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Clear => "clear",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Clear => "Clear",
        }
    }

    /// Paint colour as `[r, g, b, a]`.
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        match self {
            Self::White => [0xff, 0xff, 0xff, 0xff],
            Self::Black => [0x00, 0x00, 0x00, 0xff],
            Self::Clear => [0x00, 0x00, 0x00, 0x00],
        }
    }

    /// Resolve a machine name back to its token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown machine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColour(pub String);

impl std::fmt::Display for UnknownColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown colour '{}'", self.0)
    }
}

impl std::error::Error for UnknownColour {}

impl FromStr for Colour {
    type Err = UnknownColour;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownColour(s.to_string()))
    }
}
