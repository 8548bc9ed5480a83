//! Drag session state machine and drop resolution.
//!
//! The machine is either `Idle` or `Dragging` one [`DragSession`]. A session
//! carries its own geometry snapshot, so hit-testing during the gesture is
//! unaffected by layout changes that happen meanwhile. `hover` and `end`
//! are no-ops while idle, which absorbs duplicate and out-of-order pointer
//! events.
//!
//! Resolution is split from the machine: [`resolve`] turns the host's
//! [`DropDecision`] into a [`DropAction`], and [`resulting_position`] says
//! what the board looks like afterwards. Both are pure.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryCache, Location, Point};
use crate::piece::PieceCode;
use crate::position::Position;
use crate::square::Square;

/// Where a dragged piece came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragSource {
    Square(Square),
    /// An off-board supply pile.
    Spare,
}

impl DragSource {
    #[must_use]
    pub fn square(self) -> Option<Square> {
        match self {
            Self::Square(sq) => Some(sq),
            Self::Spare => None,
        }
    }
}

impl fmt::Display for DragSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square(sq) => sq.fmt(f),
            Self::Spare => f.write_str("spare"),
        }
    }
}

/// The host's answer to a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropDecision {
    #[default]
    Accept,
    Snapback,
    Trash,
}

/// `"snapback"` and `"trash"` are recognised; any other answer accepts.
impl From<&str> for DropDecision {
    fn from(s: &str) -> Self {
        match s {
            "snapback" => Self::Snapback,
            "trash" => Self::Trash,
            _ => Self::Accept,
        }
    }
}

/// What happens to a piece dropped off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffBoardPolicy {
    #[default]
    Snapback,
    Trash,
}

/// Terminal outcome of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropAction {
    Drop(Square),
    Snapback,
    Trash,
}

/// One in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: DragSource,
    pub piece: PieceCode,
    /// Hovered location as of the last handled move.
    pub location: Location,
    /// Layout captured when the drag began.
    pub snapshot: GeometryCache,
}

/// A hover change worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub from: Location,
    pub to: Location,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Start a session. Returns `false`, leaving the machine untouched, if a
    /// session is already live.
    pub fn begin(&mut self, source: DragSource, piece: PieceCode, snapshot: GeometryCache) -> bool {
        if self.is_live() {
            return false;
        }
        let location = match source {
            DragSource::Square(sq) => Location::Square(sq),
            DragSource::Spare => Location::Offboard,
        };
        self.state = DragState::Dragging(DragSession { source, piece, location, snapshot });
        true
    }

    /// Hit-test `p` against the session snapshot. Returns the change when
    /// the hovered location differs from the previous one.
    pub fn hover(&mut self, p: Point) -> Option<HoverChange> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let to = session.snapshot.locate(p);
        if to == session.location {
            return None;
        }
        let from = std::mem::replace(&mut session.location, to);
        Some(HoverChange { from, to })
    }

    /// Finish the session at `p`, returning it with its final location.
    pub fn end(&mut self, p: Point) -> Option<DragSession> {
        let DragState::Dragging(mut session) = std::mem::take(&mut self.state) else {
            return None;
        };
        session.location = session.snapshot.locate(p);
        Some(session)
    }

    /// Drop the session without resolving it.
    pub fn abort(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

/// The position the host is asked to approve: the source is vacated unless
/// it is a supply pile, and the piece lands on the target square if any.
#[must_use]
pub fn proposed_position(current: &Position, source: DragSource, target: Location, piece: PieceCode) -> Position {
    let mut next = current.clone();
    if let DragSource::Square(sq) = source {
        next.remove(sq);
    }
    if let Location::Square(sq) = target {
        next.insert(sq, piece);
    }
    next
}

/// Turn the host's decision into the action to perform.
#[must_use]
pub fn resolve(decision: DropDecision, target: Location, off_board: OffBoardPolicy) -> DropAction {
    match (decision, target) {
        (DropDecision::Snapback, _) => DropAction::Snapback,
        (DropDecision::Trash, _) => DropAction::Trash,
        (DropDecision::Accept, Location::Square(sq)) => DropAction::Drop(sq),
        (DropDecision::Accept, Location::Offboard) => match off_board {
            OffBoardPolicy::Snapback => DropAction::Snapback,
            OffBoardPolicy::Trash => DropAction::Trash,
        },
    }
}

/// The committed position after `action`.
///
/// A snapback leaves the board as it was; a spare piece snapped back is
/// simply discarded.
#[must_use]
pub fn resulting_position(current: &Position, source: DragSource, piece: PieceCode, action: DropAction) -> Position {
    match action {
        DropAction::Snapback => current.clone(),
        DropAction::Trash => proposed_position(current, source, Location::Offboard, piece),
        DropAction::Drop(sq) => proposed_position(current, source, Location::Square(sq), piece),
    }
}
