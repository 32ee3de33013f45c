//! Intersection contents.

use serde::{Deserialize, Serialize};

/// Contents of a board intersection.
///
/// `Offboard` is only ever returned by queries outside the board. It is never
/// stored, staged, or recorded in a diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
    Empty = 2,
    Offboard = 3,
}

impl Color {
    /// Both stone colors, black first.
    pub const STONES: [Color; 2] = [Color::Black, Color::White];

    /// Is this a stone (black or white)?
    #[must_use]
    pub const fn is_stone(self) -> bool {
        matches!(self, Color::Black | Color::White)
    }

    /// The other stone color.
    ///
    /// Non-stone values map to themselves.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => other,
        }
    }

    /// Raw discriminant.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Parse a raw discriminant.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Color::Black),
            1 => Some(Color::White),
            2 => Some(Color::Empty),
            3 => Some(Color::Offboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Empty => "empty",
            Color::Offboard => "offboard",
        };
        f.write_str(name)
    }
}
