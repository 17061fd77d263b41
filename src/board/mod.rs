//! Authoritative board: the immutable position and the rules of chess.
//!
//! This is the single source of truth for legality. The faster mutable
//! tiers in [`crate::fast`] and [`crate::bitboard`] are derived from a
//! `Board` and are checked against it by perft in the test suite.
//!
//! # Example
//! ```
//! use chess_tiers::board::Board;
//!
//! let board = Board::new();
//! assert_eq!(board.moves().len(), 20);
//!
//! let next = board.play("e2e4").unwrap();
//! assert!(board.play("e2e5").is_err());
//! assert_eq!(next.moves().len(), 20);
//! ```

mod apply;
mod attacks;
mod error;
mod fen;
mod movegen;
mod rules;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{BoardError, FenError, MoveError, PositionError};
pub use state::{Board, MAX_DIMENSION};
pub use types::{Capture, Color, Move, Piece, PieceKind, Position, RookShift, SquareMeta};

impl Board {
    /// The same position seen from the other side: ranks mirrored and
    /// colors swapped, including the side to move and all flags.
    #[must_use]
    pub fn color_flipped(&self) -> Board {
        let mut flipped = Board::blank(self.width, self.height, self.turn.opponent());
        for (pos, piece) in self.pieces() {
            let mirrored = Position::new(pos.x, self.height - 1 - pos.y);
            flipped.set(mirrored, Some(Piece::new(piece.color.opponent(), piece.kind)));
            flipped.set_meta(mirrored, self.meta(pos));
        }
        flipped.halfmove_clock = self.halfmove_clock;
        flipped.fullmove_number = self.fullmove_number;
        flipped
    }
}
