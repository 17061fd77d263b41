//! Chess rules and move selection over three board representations.
//!
//! - [`board`]: the immutable authoritative position and the full rules
//! - [`fast`]: a packed 64-byte board with play/unplay, used by search
//! - [`bitboard`]: one 64-bit mask per piece, for raw move counting
//! - [`tier`]: the interface the three share, with generic perft
//! - [`search`]: alpha-beta and rollout engines plus `select_move`
//! - [`book`]: opening-book lookup

pub mod bitboard;
pub mod board;
pub mod book;
pub mod fast;
pub mod search;
pub mod tier;
mod zobrist;

pub use bitboard::{BitBoard, BitMove};
pub use board::{Board, Color, Move, MoveError, Piece, PieceKind, Position};
pub use book::{BookMove, MemoryBook, OpeningBook};
pub use fast::{FastBoard, FastMove, Promotions};
pub use search::{select_move, AlphaBeta, Rollout, SearchError, Strategy};
pub use tier::{Line, Tier};
