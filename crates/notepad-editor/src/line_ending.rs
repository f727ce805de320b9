//! On-disk row terminators.
//!
//! In memory every split row ends with [`SENTINEL`]. On disk the sentinel is
//! written as the buffer's [`LineEnding`], and all three conventions are
//! accepted when reading.

use crate::coordinate::SENTINEL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row terminator written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Bare carriage return, byte-identical to the in-memory sentinel
    #[default]
    Cr,
    /// Line feed
    Lf,
    /// Carriage return followed by line feed
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cr => "\r",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cr => write!(f, "cr"),
            Self::Lf => write!(f, "lf"),
            Self::CrLf => write!(f, "crlf"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cr" => Ok(Self::Cr),
            "lf" => Ok(Self::Lf),
            "crlf" => Ok(Self::CrLf),
            other => Err(format!("unknown line ending '{}'", other)),
        }
    }
}

/// Split text into rows, storing every terminator as the sentinel.
///
/// Returns the rows and the first terminator seen, if any. The text after the
/// last terminator (possibly empty) becomes the final row; empty text yields
/// no rows at all.
pub fn split_rows(text: &str) -> (Vec<String>, Option<LineEnding>) {
    let mut rows = Vec::new();
    let mut detected = None;

    if text.is_empty() {
        return (rows, detected);
    }

    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let ending = match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                Some(LineEnding::CrLf)
            }
            '\r' => Some(LineEnding::Cr),
            '\n' => Some(LineEnding::Lf),
            _ => None,
        };

        match ending {
            Some(ending) => {
                detected.get_or_insert(ending);
                current.push(SENTINEL);
                rows.push(std::mem::take(&mut current));
            }
            None => current.push(c),
        }
    }
    rows.push(current);

    (rows, detected)
}
