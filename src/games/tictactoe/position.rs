//! The nine cells of the board.

use serde::{Deserialize, Serialize};

/// A cell on the board, numbered 0-8 row by row.
///
/// Parses from its label, ignoring case (`"center"`, `"Top-right"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Position {
    /// Cell 0.
    #[strum(serialize = "Top-left")]
    TopLeft,
    /// Cell 1.
    #[strum(serialize = "Top-center")]
    TopCenter,
    /// Cell 2.
    #[strum(serialize = "Top-right")]
    TopRight,
    /// Cell 3.
    #[strum(serialize = "Middle-left")]
    MiddleLeft,
    /// Cell 4.
    #[strum(serialize = "Center")]
    Center,
    /// Cell 5.
    #[strum(serialize = "Middle-right")]
    MiddleRight,
    /// Cell 6.
    #[strum(serialize = "Bottom-left")]
    BottomLeft,
    /// Cell 7.
    #[strum(serialize = "Bottom-center")]
    BottomCenter,
    /// Cell 8.
    #[strum(serialize = "Bottom-right")]
    BottomRight,
}

impl Position {
    /// Human-readable name of the cell.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Board index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell at a board index, `None` past 8.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Parses user input: a 1-based cell number as printed on the board,
    /// or a label.
    pub fn from_label_or_number(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(number) => number.checked_sub(1).and_then(Self::from_index),
            Err(_) => input.parse().ok(),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
