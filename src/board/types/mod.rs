//! Core chess types.
//!
//! - `Piece`, `PieceKind` and `Color`
//! - `Position` - board coordinates with algebraic names
//! - `Move`, `Capture`, `RookShift` - authoritative move representation
//! - `SquareMeta` - en passant and castling flags stored per square

mod meta;
mod moves;
mod piece;
mod position;

pub use meta::SquareMeta;
pub use moves::{Capture, Move, RookShift};
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
