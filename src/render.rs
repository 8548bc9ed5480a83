//! Rendering capability.
//!
//! The board never draws anything itself. It describes what should be on
//! screen through [`Renderer`] calls, and the host implements them for its
//! back end (DOM, canvas, native toolkit). Animated effects carry an
//! [`AnimationTicket`] that the host returns to the board once the effect
//! has finished.
//!
//! [`RecordingRenderer`] keeps every call in memory. It backs the tests and
//! the command-line tool.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::animation::AnimationTicket;
use crate::geometry::{GeometryCache, Point, Rect};
use crate::piece::PieceCode;
use crate::square::Square;

/// A piece together with the resource that draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Glyph {
    pub piece: PieceCode,
    pub src: String,
}

/// A glyph resting on a square.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedGlyph {
    pub square: Square,
    pub rect: Rect,
    pub glyph: Glyph,
}

/// An animated effect. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum Effect {
    /// Slide a glyph between two rectangles (board moves, spare-pile adds).
    Slide { glyph: Glyph, from: Rect, to: Rect, duration_ms: u32 },
    /// Fade a glyph in on a square.
    Appear { glyph: Glyph, at: Rect, duration_ms: u32 },
    /// Fade a glyph out on a square.
    Fade { glyph: Glyph, at: Rect, duration_ms: u32 },
    /// Send the dragged glyph back to where it came from.
    Snapback { glyph: Glyph, to: Rect, duration_ms: u32 },
    /// Settle the dragged glyph onto its drop square.
    Snap { glyph: Glyph, to: Rect, duration_ms: u32 },
    /// Fade the dragged glyph out wherever it is.
    Trash { glyph: Glyph, duration_ms: u32 },
}

impl Effect {
    /// Whether this effect returns a dragged piece to its origin.
    #[must_use]
    pub fn is_snapback(&self) -> bool {
        matches!(self, Self::Snapback { .. })
    }
}

pub trait Renderer {
    /// Width of the element hosting the board, in CSS pixels.
    fn container_width(&self) -> f64;

    /// Page coordinates of the board's top-left corner.
    fn board_origin(&self) -> Point;

    /// Draw the empty grid, notation, and supply piles for `layout`.
    fn draw_board(&mut self, layout: &GeometryCache, show_notation: bool, spares: &[(Glyph, Rect)]);

    /// Replace every resting glyph with `pieces`.
    fn draw_pieces(&mut self, pieces: &[PlacedGlyph]);

    /// Hide the resting glyph on `square` while it is being dragged.
    fn hide_piece(&mut self, square: Square);

    fn set_highlight(&mut self, square: Square, on: bool);

    fn clear_highlights(&mut self);

    /// Show the floating drag glyph at `at`.
    fn show_drag_glyph(&mut self, glyph: &Glyph, at: Rect);

    fn move_drag_glyph(&mut self, at: Rect);

    /// Start an effect; report `ticket` back to the board when it ends.
    fn animate(&mut self, ticket: AnimationTicket, effect: Effect);

    /// Remove everything this renderer has drawn.
    fn teardown(&mut self);
}

// =============================================================
// Recording renderer
// =============================================================

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    DrawBoard { square_size: f64, show_notation: bool, spares: usize },
    DrawPieces { pieces: Vec<PlacedGlyph> },
    HidePiece { square: Square },
    SetHighlight { square: Square, on: bool },
    ClearHighlights,
    ShowDragGlyph { glyph: Glyph, at: Rect },
    MoveDragGlyph { at: Rect },
    Animate { ticket: AnimationTicket, effect: Effect },
    Teardown,
}

/// Renderer that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub width: f64,
    pub origin: Point,
    pub ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new(width: f64, origin: Point) -> Self {
        Self { width, origin, ops: Vec::new() }
    }

    /// Tickets of every effect started so far, in order.
    #[must_use]
    pub fn tickets(&self) -> Vec<AnimationTicket> {
        self.effects().into_iter().map(|(t, _)| t).collect()
    }

    #[must_use]
    pub fn effects(&self) -> Vec<(AnimationTicket, &Effect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RenderOp::Animate { ticket, effect } => Some((*ticket, effect)),
                _ => None,
            })
            .collect()
    }

    /// Resting glyphs from the most recent full redraw.
    #[must_use]
    pub fn last_pieces(&self) -> Option<&[PlacedGlyph]> {
        self.ops.iter().rev().find_map(|op| match op {
            RenderOp::DrawPieces { pieces } => Some(pieces.as_slice()),
            _ => None,
        })
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn container_width(&self) -> f64 {
        self.width
    }

    fn board_origin(&self) -> Point {
        self.origin
    }

    fn draw_board(&mut self, layout: &GeometryCache, show_notation: bool, spares: &[(Glyph, Rect)]) {
        self.ops.push(RenderOp::DrawBoard { square_size: layout.square_size(), show_notation, spares: spares.len() });
    }

    fn draw_pieces(&mut self, pieces: &[PlacedGlyph]) {
        self.ops.push(RenderOp::DrawPieces { pieces: pieces.to_vec() });
    }

    fn hide_piece(&mut self, square: Square) {
        self.ops.push(RenderOp::HidePiece { square });
    }

    fn set_highlight(&mut self, square: Square, on: bool) {
        self.ops.push(RenderOp::SetHighlight { square, on });
    }

    fn clear_highlights(&mut self) {
        self.ops.push(RenderOp::ClearHighlights);
    }

    fn show_drag_glyph(&mut self, glyph: &Glyph, at: Rect) {
        self.ops.push(RenderOp::ShowDragGlyph { glyph: glyph.clone(), at });
    }

    fn move_drag_glyph(&mut self, at: Rect) {
        self.ops.push(RenderOp::MoveDragGlyph { at });
    }

    fn animate(&mut self, ticket: AnimationTicket, effect: Effect) {
        self.ops.push(RenderOp::Animate { ticket, effect });
    }

    fn teardown(&mut self) {
        self.ops.push(RenderOp::Teardown);
    }
}
