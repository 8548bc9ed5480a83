//! Screen-space layout of the board and hit-testing.
//!
//! [`GeometryCache`] maps every square, and every supply-pile slot when
//! spare pieces are enabled, to a rectangle in page coordinates. It is
//! rebuilt wholesale on resize or orientation change; a drag session keeps
//! its own clone for the lifetime of the gesture.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::piece::{Color, PieceCode};
use crate::square::Square;

/// A point in page coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; contains its top/left edges but not its
/// bottom/right edges, so adjacent squares never both claim a point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` centered on `center`.
    #[must_use]
    pub fn centered(center: Point, size: f64) -> Self {
        Self { x: center.x - size / 2.0, y: center.y - size / 2.0, width: size, height: size }
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Which color sits at the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The color drawn along the bottom edge.
    #[must_use]
    pub fn bottom_color(self) -> Color {
        match self {
            Self::White => Color::White,
            Self::Black => Color::Black,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

impl FromStr for Orientation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            _ => Err(BoardError::InvalidConfiguration {
                field: "orientation",
                reason: format!("expected \"white\" or \"black\", got {s:?}"),
            }),
        }
    }
}

/// Where a pointer is, relative to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Square(Square),
    Offboard,
}

impl Location {
    #[must_use]
    pub fn square(self) -> Option<Square> {
        match self {
            Self::Square(sq) => Some(sq),
            Self::Offboard => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square(sq) => sq.fmt(f),
            Self::Offboard => f.write_str("offboard"),
        }
    }
}

/// Side length of one square for a container `width` pixels wide: the
/// largest multiple of 8 strictly below the width, divided by 8. Returns
/// zero for containers too narrow to hold a board.
#[must_use]
pub fn square_size_for_width(width: f64) -> f64 {
    if !width.is_finite() || width < 1.0 {
        return 0.0;
    }
    let board = ((width.floor() - 1.0) / 8.0).floor() * 8.0;
    (board / 8.0).max(0.0)
}

/// Cached rectangles for the squares and supply-pile slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCache {
    origin: Point,
    square_size: f64,
    orientation: Orientation,
    squares: HashMap<Square, Rect>,
    spares: Vec<(PieceCode, Rect)>,
}

impl GeometryCache {
    /// Lay out the board with its top-left corner at `origin`.
    ///
    /// With `spare_pieces`, the top pile (the color not at the bottom) sits
    /// one row above the board and the bottom pile one row below it, each
    /// indented by one square.
    #[must_use]
    pub fn build(origin: Point, square_size: f64, orientation: Orientation, spare_pieces: bool) -> Self {
        let mut squares = HashMap::with_capacity(64);
        for sq in Square::all() {
            let (col, row) = match orientation {
                Orientation::White => (sq.file(), 7 - sq.rank()),
                Orientation::Black => (7 - sq.file(), sq.rank()),
            };
            let rect = Rect::new(
                origin.x + f64::from(col) * square_size,
                origin.y + f64::from(row) * square_size,
                square_size,
                square_size,
            );
            squares.insert(sq, rect);
        }

        let mut spares = Vec::new();
        if spare_pieces {
            let bottom = orientation.bottom_color();
            let rows = [(bottom.opposite(), origin.y - square_size), (bottom, origin.y + 8.0 * square_size)];
            for (color, y) in rows {
                for (i, piece) in (1u8..).zip(PieceCode::set(color)) {
                    let x = origin.x + f64::from(i) * square_size;
                    spares.push((piece, Rect::new(x, y, square_size, square_size)));
                }
            }
        }

        Self { origin, square_size, orientation, squares, spares }
    }

    #[must_use]
    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Bounds of the 8×8 grid.
    #[must_use]
    pub fn board_rect(&self) -> Rect {
        let side = self.square_size * 8.0;
        Rect::new(self.origin.x, self.origin.y, side, side)
    }

    #[must_use]
    pub fn square_rect(&self, square: Square) -> Option<Rect> {
        self.squares.get(&square).copied()
    }

    #[must_use]
    pub fn spare_rect(&self, piece: PieceCode) -> Option<Rect> {
        self.spares.iter().find(|(p, _)| *p == piece).map(|(_, r)| *r)
    }

    /// Supply-pile slots in layout order (top pile first).
    #[must_use]
    pub fn spares(&self) -> &[(PieceCode, Rect)] {
        &self.spares
    }

    /// The square under `p`, or [`Location::Offboard`].
    #[must_use]
    pub fn locate(&self, p: Point) -> Location {
        if self.square_size <= 0.0 {
            return Location::Offboard;
        }
        Square::all()
            .find(|sq| self.squares.get(sq).is_some_and(|r| r.contains(p)))
            .map_or(Location::Offboard, Location::Square)
    }

    /// The supply-pile piece under `p`, if any.
    #[must_use]
    pub fn spare_at(&self, p: Point) -> Option<PieceCode> {
        self.spares.iter().find(|(_, r)| r.contains(p)).map(|(piece, _)| *piece)
    }
}
