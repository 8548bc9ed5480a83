//! Sparse piece placement.
//!
//! A [`Position`] maps occupied squares to piece codes. Empty squares are
//! absent keys. Positions are plain values: the board hands out clones and
//! replaces its own copy wholesale on every update.

#[cfg(test)]
#[path = "position_test.rs"]
mod position_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::consts::START_DIAGRAM;
use crate::error::BoardError;
use crate::piece::PieceCode;
use crate::square::Square;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position {
    pieces: BTreeMap<Square, PieceCode>,
}

impl Position {
    /// The empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    #[must_use]
    pub fn start() -> Self {
        codec::decode(START_DIAGRAM).unwrap_or_default()
    }

    /// Build a position from untyped `(square, piece-code)` string pairs.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidPosition`] naming the first bad entry.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pieces = BTreeMap::new();
        for (k, v) in pairs {
            let (k, v) = (k.as_ref(), v.as_ref());
            let square = Square::from_str(k).map_err(|_| BoardError::InvalidPosition(format!("bad square key {k:?}")))?;
            let piece =
                PieceCode::from_str(v).map_err(|_| BoardError::InvalidPosition(format!("bad piece code {v:?} on {k}")))?;
            pieces.insert(square, piece);
        }
        Ok(Self { pieces })
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Option<PieceCode> {
        self.pieces.get(&square).copied()
    }

    /// Place `piece` on `square`, returning whatever was there.
    pub fn insert(&mut self, square: Square, piece: PieceCode) -> Option<PieceCode> {
        self.pieces.insert(square, piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<PieceCode> {
        self.pieces.remove(&square)
    }

    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    /// Occupied squares in square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.pieces.iter().map(|(s, p)| (*s, *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Apply moves in order to a copy of this position.
    ///
    /// No legality is checked: the piece on `from` replaces anything on `to`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IllegalEmptySource`] for the first move whose
    /// source is empty at the time it is applied. `self` is never modified.
    pub fn with_moves(&self, moves: &[Move]) -> Result<Self, BoardError> {
        let mut next = self.clone();
        for mv in moves {
            let piece = next.remove(mv.from).ok_or(BoardError::IllegalEmptySource(mv.from))?;
            next.insert(mv.to, piece);
        }
        Ok(next)
    }
}

impl FromIterator<(Square, PieceCode)> for Position {
    fn from_iter<T: IntoIterator<Item = (Square, PieceCode)>>(iter: T) -> Self {
        Self { pieces: iter.into_iter().collect() }
    }
}

/// Text diagram, rank 8 at the top, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', PieceCode::fen_char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

/// A source/destination pair, written `"e2-e4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[must_use]
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl FromStr for Move {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s.split_once('-').ok_or_else(|| BoardError::InvalidMove(s.to_owned()))?;
        let from = from.parse().map_err(|_| BoardError::InvalidMove(s.to_owned()))?;
        let to = to.parse().map_err(|_| BoardError::InvalidMove(s.to_owned()))?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
