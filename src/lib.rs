//! Drag-and-drop chessboard core.
//!
//! This crate keeps a rendered board surface consistent with a declaratively
//! set piece placement. It owns the position model, the diagram codec, the
//! diff and animation pipeline that moves glyphs between placements, and the
//! pointer drag state machine. Drawing is delegated to a [`render::Renderer`]
//! supplied by the host, and every decision the host wants a say in goes
//! through [`host::BoardHost`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | The [`board::Board`] controller façade |
//! | [`square`] | Board squares and square distance |
//! | [`piece`] | Piece colors, kinds and codes |
//! | [`position`] | Sparse piece placement and move application |
//! | [`codec`] | Board-diagram decode/encode |
//! | [`diff`] | Placement diff into primitive animations |
//! | [`animation`] | Animation batches and completion tracking |
//! | [`geometry`] | Square rectangles and hit-testing |
//! | [`input`] | Pointer events and mouse/touch adapters |
//! | [`throttle`] | Trailing-edge throttle for pointer moves |
//! | [`drag`] | Drag session state machine and drop resolution |
//! | [`render`] | Renderer capability and a recording renderer |
//! | [`host`] | Host callback contracts |
//! | [`config`] | Typed configuration and validation |
//! | [`consts`] | Shared defaults |
//! | [`error`] | Error taxonomy |

pub mod animation;
pub mod board;
pub mod codec;
pub mod config;
pub mod consts;
pub mod diff;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod piece;
pub mod position;
pub mod render;
pub mod square;
pub mod throttle;

pub use board::Board;
pub use error::BoardError;
pub use piece::{Color, PieceCode, PieceKind};
pub use position::Position;
pub use square::Square;
