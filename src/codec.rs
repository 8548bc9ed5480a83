//! Board-diagram codec.
//!
//! A diagram is eight `/`-separated rank segments, rank 8 first. Each
//! segment mixes FEN piece letters with digits `1`-`8` counting empty
//! squares, and must cover exactly eight columns. Anything after the first
//! space (side to move, castling rights, clocks) is ignored, so full FEN
//! strings decode to their piece placement.
//!
//! [`encode`] always emits the canonical form: adjacent empty squares are
//! collapsed into a single digit.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use crate::error::BoardError;
use crate::piece::PieceCode;
use crate::position::Position;
use crate::square::Square;

/// Decode a diagram into a position.
///
/// # Errors
///
/// Returns [`BoardError::InvalidFormat`] when the diagram does not have
/// exactly eight ranks, a rank is empty, a rank covers more or fewer than
/// eight columns, or a character is outside the piece/digit alphabet.
pub fn decode(diagram: &str) -> Result<Position, BoardError> {
    let placement = diagram.split(' ').next().unwrap_or_default();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(diagram, format!("expected 8 ranks, found {}", ranks.len())));
    }

    let mut position = Position::empty();
    for (row, segment) in (0..8u8).rev().zip(ranks) {
        if segment.is_empty() {
            return Err(invalid(diagram, format!("rank {} is empty", row + 1)));
        }
        let mut file = 0u8;
        for c in segment.chars() {
            if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file = file.saturating_add(u8::try_from(run).unwrap_or(8));
            } else if let Some(piece) = PieceCode::from_fen_char(c) {
                if let Some(square) = Square::new(file, row) {
                    position.insert(square, piece);
                }
                file = file.saturating_add(1);
            } else {
                return Err(invalid(diagram, format!("unexpected character {c:?} in rank {}", row + 1)));
            }
            if file > 8 {
                return Err(invalid(diagram, format!("rank {} exceeds 8 columns", row + 1)));
            }
        }
        if file != 8 {
            return Err(invalid(diagram, format!("rank {} covers {file} columns, expected 8", row + 1)));
        }
    }
    Ok(position)
}

/// Encode a position as a canonical diagram.
#[must_use]
pub fn encode(position: &Position) -> String {
    let mut out = String::with_capacity(71);
    for row in (0..8u8).rev() {
        let mut empty = 0u8;
        for file in 0..8u8 {
            match Square::new(file, row).and_then(|sq| position.get(sq)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if row > 0 {
            out.push('/');
        }
    }
    out
}

/// Validate untyped `(square, piece-code)` pairs and encode them.
///
/// # Errors
///
/// Returns [`BoardError::InvalidPosition`] when any key is not a square or
/// any value is not a piece code.
pub fn encode_pairs<I, K, V>(pairs: I) -> Result<String, BoardError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Position::from_pairs(pairs).map(|p| encode(&p))
}

/// Re-encode a diagram in canonical form.
///
/// # Errors
///
/// Returns [`BoardError::InvalidFormat`] if `diagram` does not decode.
pub fn normalize(diagram: &str) -> Result<String, BoardError> {
    decode(diagram).map(|p| encode(&p))
}

/// Whether `diagram` decodes.
#[must_use]
pub fn is_valid(diagram: &str) -> bool {
    decode(diagram).is_ok()
}

fn invalid(diagram: &str, reason: String) -> BoardError {
    BoardError::InvalidFormat(format!("{diagram:?}: {reason}"))
}
