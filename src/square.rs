//! Board squares.
//!
//! A [`Square`] is a (file, rank) pair with both coordinates in `0..8`. The
//! derived ordering is file-major, so iterating squares in order visits
//! a1, a2, .., a8, b1, .. h8. The diff engine relies on that order for its
//! tie-breaking.

#[cfg(test)]
#[path = "square_test.rs"]
mod square_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Column letters in file order.
pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// One of the 64 board squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank indices.
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Zero-based file index (`a` = 0).
    #[must_use]
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank `1` = 0).
    #[must_use]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// King-move (Chebyshev) distance between two squares.
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        let df = self.file.abs_diff(other.file);
        let dr = self.rank.abs_diff(other.rank);
        df.max(dr)
    }

    /// All 64 squares in file-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Self { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILES[usize::from(self.file)], self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BoardError::InvalidSquare(s.to_owned()));
        };
        let file = FILES.iter().zip(0u8..).find(|(c, _)| **c == f).map(|(_, i)| i);
        let rank = ('1'..='8').zip(0u8..).find(|(c, _)| *c == r).map(|(_, i)| i);
        match (file, rank) {
            (Some(file), Some(rank)) => Ok(Self { file, rank }),
            _ => Err(BoardError::InvalidSquare(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}
