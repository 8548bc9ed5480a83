//! Pointer input model and the mouse/touch adapters.
//!
//! The drag state machine only ever sees [`PointerEvent`]s. The two thin
//! adapters below turn modality-specific events into that single shape, so
//! nothing past this module branches on mouse versus touch.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A modality-agnostic pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub phase: PointerPhase,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// =============================================================
// Mouse
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
}

/// A mouse event as reported by the host, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseKind,
    pub page_x: f64,
    pub page_y: f64,
}

impl From<MouseInput> for PointerEvent {
    fn from(ev: MouseInput) -> Self {
        let phase = match ev.kind {
            MouseKind::Down => PointerPhase::Down,
            MouseKind::Move => PointerPhase::Move,
            MouseKind::Up => PointerPhase::Up,
        };
        Self::new(ev.page_x, ev.page_y, phase)
    }
}

// =============================================================
// Touch
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch event as reported by the host. Only the first changed touch
/// point is tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub kind: TouchKind,
    pub changed_touches: Vec<Point>,
}

impl TouchInput {
    /// Convert to a pointer event; `None` when no touch point changed.
    ///
    /// A cancelled touch ends the gesture where the finger was last seen.
    #[must_use]
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        let p = self.changed_touches.first()?;
        let phase = match self.kind {
            TouchKind::Start => PointerPhase::Down,
            TouchKind::Move => PointerPhase::Move,
            TouchKind::End | TouchKind::Cancel => PointerPhase::Up,
        };
        Some(PointerEvent::new(p.x, p.y, phase))
    }
}
