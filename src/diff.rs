//! Placement diff.
//!
//! [`diff`] turns a (before, after) pair of positions into primitive
//! animations. A piece that appears on a square is matched with the nearest
//! identical piece that disappeared, so it slides instead of vanishing and
//! reappearing. The result is purely structural: no chess rules apply.
//!
//! The animations of one diff describe a simultaneous transition: all
//! sources and cleared squares are vacated first, then all destinations and
//! added squares are filled. [`apply`] implements exactly that.

#[cfg(test)]
#[path = "diff_test.rs"]
mod diff_test;

use serde::{Deserialize, Serialize};

use crate::piece::PieceCode;
use crate::position::Position;
use crate::square::Square;

/// One primitive step of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Animation {
    Move { source: Square, destination: Square, piece: PieceCode },
    Add { square: Square, piece: PieceCode },
    Clear { square: Square, piece: PieceCode },
}

impl Animation {
    #[must_use]
    pub fn piece(&self) -> PieceCode {
        match self {
            Self::Move { piece, .. } | Self::Add { piece, .. } | Self::Clear { piece, .. } => *piece,
        }
    }
}

/// Compute the animations that turn `before` into `after`.
///
/// Output order: all moves, then clears, then adds. Within each group the
/// entries follow square order, and a move's source is the closest
/// (Chebyshev) remaining identical piece, the first in square order on ties.
#[must_use]
pub fn diff(before: &Position, after: &Position) -> Vec<Animation> {
    let mut removed: Vec<(Square, PieceCode)> = before.iter().filter(|(sq, p)| after.get(*sq) != Some(*p)).collect();
    let added: Vec<(Square, PieceCode)> = after.iter().filter(|(sq, p)| before.get(*sq) != Some(*p)).collect();

    let mut animations = Vec::with_capacity(removed.len() + added.len());
    let mut unmatched = Vec::new();

    for (destination, piece) in added {
        match closest(&removed, piece, destination) {
            Some(idx) => {
                let (source, _) = removed.remove(idx);
                animations.push(Animation::Move { source, destination, piece });
            }
            None => unmatched.push((destination, piece)),
        }
    }

    animations.extend(removed.into_iter().map(|(square, piece)| Animation::Clear { square, piece }));
    animations.extend(unmatched.into_iter().map(|(square, piece)| Animation::Add { square, piece }));
    animations
}

/// Index of the nearest `piece` in `candidates`; ties go to the earliest.
fn closest(candidates: &[(Square, PieceCode)], piece: PieceCode, target: Square) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, (_, p))| *p == piece)
        .min_by_key(|(_, (sq, _))| sq.distance(target))
        .map(|(idx, _)| idx)
}

/// Apply a transition to `position`: vacate every source and cleared
/// square, then fill every destination and added square.
#[must_use]
pub fn apply(position: &Position, animations: &[Animation]) -> Position {
    let mut next = position.clone();
    for anim in animations {
        match *anim {
            Animation::Move { source, .. } => {
                next.remove(source);
            }
            Animation::Clear { square, .. } => {
                next.remove(square);
            }
            Animation::Add { .. } => {}
        }
    }
    for anim in animations {
        match *anim {
            Animation::Move { destination, piece, .. } => {
                next.insert(destination, piece);
            }
            Animation::Add { square, piece } => {
                next.insert(square, piece);
            }
            Animation::Clear { .. } => {}
        }
    }
    next
}
