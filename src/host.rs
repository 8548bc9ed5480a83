//! Host callback contracts.
//!
//! Every method has a default, so a host implements only what it cares
//! about. Positions are passed by reference; clone them to keep them.

use crate::drag::{DragSource, DropDecision};
use crate::error::BoardError;
use crate::geometry::{Location, Orientation};
use crate::piece::PieceCode;
use crate::position::Position;

/// Everything the host gets to see when a piece is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DropContext {
    pub source: DragSource,
    pub target: Location,
    pub piece: PieceCode,
    /// The position if the drop were accepted as-is.
    pub proposed: Position,
    pub previous: Position,
    pub orientation: Orientation,
}

pub trait BoardHost {
    /// A drag is about to start. Return `false` to veto it.
    fn on_drag_start(
        &mut self,
        _source: DragSource,
        _piece: PieceCode,
        _position: &Position,
        _orientation: Orientation,
    ) -> bool {
        true
    }

    /// The hovered location of a live drag changed.
    fn on_drag_move(
        &mut self,
        _new_location: Location,
        _old_location: Location,
        _source: DragSource,
        _piece: PieceCode,
        _position: &Position,
        _orientation: Orientation,
    ) {
    }

    /// Decide what a drop does.
    fn on_drop(&mut self, _drop: &DropContext) -> DropDecision {
        DropDecision::Accept
    }

    /// The committed position changed.
    fn on_change(&mut self, _old: &Position, _new: &Position) {}

    /// A position transition finished animating.
    fn on_move_end(&mut self, _old: &Position, _new: &Position) {}

    /// Invalid input, when the board reports through the callback channel.
    fn on_invalid_input(&mut self, _error: &BoardError) {}

    /// Invalid input, when the board reports through the alert channel.
    fn show_alert(&mut self, _message: &str) {}
}

/// A host that accepts every default.
impl BoardHost for () {}
