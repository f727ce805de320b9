//! Value types shared by the buffer, the action log and the caret helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row terminator kept at the end of every row that was split from a longer line.
pub const SENTINEL: char = '\r';

/// A (column, row) position in the document.
///
/// `column` is a char offset into the row's stored string and may equal the
/// row length, meaning "end of row".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub column: usize,
    pub row: usize,
}

impl Coordinate {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    pub const fn origin() -> Self {
        Self { column: 0, row: 0 }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Direction the caret moved when a character was added or removed.
///
/// For deletes, `Forward` removes the character before the caret (backspace);
/// every other direction removes the character at the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionDirection {
    #[default]
    Forward,
    Backward,
    Upward,
    Downward,
}

impl ActionDirection {
    /// Whether a delete in this direction targets the character before the caret.
    pub fn deletes_before_caret(self) -> bool {
        matches!(self, Self::Forward)
    }
}

impl fmt::Display for ActionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
            Self::Upward => write!(f, "upward"),
            Self::Downward => write!(f, "downward"),
        }
    }
}
