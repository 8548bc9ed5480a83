//! Error taxonomy for board operations.
//!
//! Malformed external input (diagrams, position maps, configuration values,
//! move strings) is reported through the board's invalid-input channel and
//! also returned to the caller. Nothing in this crate panics on bad input.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board diagram: {0}")]
    InvalidFormat(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),
    #[error("invalid piece code: {0:?}")]
    InvalidPieceCode(String),
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("no piece on source square {0}")]
    IllegalEmptySource(Square),
    #[error("invalid move: {0:?}")]
    InvalidMove(String),
    #[error("board has been destroyed")]
    Destroyed,
}

impl BoardError {
    /// Stable numeric code shown in user-facing reports.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidFormat(_) => 6482,
            Self::InvalidPosition(_) => 6483,
            Self::InvalidSquare(_) => 5482,
            Self::InvalidPieceCode(_) => 8272,
            Self::InvalidConfiguration { .. } => 7263,
            Self::IllegalEmptySource(_) => 5826,
            Self::InvalidMove(_) => 2826,
            Self::Destroyed => 1001,
        }
    }

    /// Text used for alert-style reports.
    #[must_use]
    pub fn report_text(&self) -> String {
        format!("Chessboard Error {}: {self}", self.code())
    }
}
