//! Shared defaults for the chessboard crate.

// ── Position ────────────────────────────────────────────────────

/// Piece placement of the standard starting position.
pub const START_DIAGRAM: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

// ── Animation speeds (milliseconds) ─────────────────────────────

pub const DEFAULT_APPEAR_SPEED_MS: u32 = 200;
pub const DEFAULT_MOVE_SPEED_MS: u32 = 200;
pub const DEFAULT_SNAPBACK_SPEED_MS: u32 = 60;
pub const DEFAULT_SNAP_SPEED_MS: u32 = 30;
pub const DEFAULT_TRASH_SPEED_MS: u32 = 100;

/// Duration of the `fast` speed keyword.
pub const FAST_SPEED_MS: u32 = 200;
/// Duration of the `slow` speed keyword.
pub const SLOW_SPEED_MS: u32 = 600;

// ── Interaction ─────────────────────────────────────────────────

/// Minimum interval between handled pointer moves during a drag.
pub const DEFAULT_DRAG_THROTTLE_RATE_MS: u64 = 20;

// ── Rendering ───────────────────────────────────────────────────

/// Default piece image template; `{piece}` is replaced by the piece code.
pub const DEFAULT_PIECE_THEME: &str = "img/chesspieces/wikipedia/{piece}.png";
