//! Piece colors, kinds and codes.
//!
//! A [`PieceCode`] has two textual forms: the two-letter code used in
//! position maps and image templates (`"wP"`, `"bK"`), and the single FEN
//! letter used in board diagrams (`'P'`, `'k'`).

#[cfg(test)]
#[path = "piece_test.rs"]
mod piece_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    fn prefix(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Kinds in the order supply piles lay them out.
    pub const ALL: [Self; 6] = [Self::King, Self::Queen, Self::Rook, Self::Bishop, Self::Knight, Self::Pawn];

    /// Uppercase FEN letter for this kind.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Pawn => 'P',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.letter() == c.to_ascii_uppercase())
    }
}

/// A colored piece, independent of any square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceCode {
    pub color: Color,
    pub kind: PieceKind,
}

impl PieceCode {
    #[must_use]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parse a FEN letter: uppercase is white, lowercase is black.
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }

    /// The FEN letter for this piece.
    #[must_use]
    pub fn fen_char(self) -> char {
        let upper = self.kind.letter();
        match self.color {
            Color::White => upper,
            Color::Black => upper.to_ascii_lowercase(),
        }
    }

    /// The six codes of one color, in supply-pile order.
    pub fn set(color: Color) -> impl Iterator<Item = Self> {
        PieceKind::ALL.into_iter().map(move |kind| Self { color, kind })
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.prefix(), self.kind.letter())
    }
}

impl FromStr for PieceCode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(c), Some(k), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BoardError::InvalidPieceCode(s.to_owned()));
        };
        let color = match c {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return Err(BoardError::InvalidPieceCode(s.to_owned())),
        };
        // Codes use uppercase kind letters only ("wP", never "wp").
        if !k.is_ascii_uppercase() {
            return Err(BoardError::InvalidPieceCode(s.to_owned()));
        }
        let kind = PieceKind::from_letter(k).ok_or_else(|| BoardError::InvalidPieceCode(s.to_owned()))?;
        Ok(Self { color, kind })
    }
}

impl TryFrom<String> for PieceCode {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PieceCode> for String {
    fn from(piece: PieceCode) -> Self {
        piece.to_string()
    }
}
