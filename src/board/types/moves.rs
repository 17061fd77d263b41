//! Move types for the authoritative board.

use std::fmt;

use super::piece::{Piece, PieceKind};
use super::position::Position;

/// A piece removed by a move. For en passant `at` differs from the move's
/// destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capture {
    pub at: Position,
    pub piece: Piece,
}

/// Rook relocation that accompanies castling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RookShift {
    pub from: Position,
    pub to: Position,
}

/// A legal move, as produced by [`Board::moves`](crate::board::Board::moves).
///
/// Moves are plain values; applying one goes through the board that produced
/// it (`Board::apply`), which refuses moves it did not generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Capture>,
    pub promotion: Option<Piece>,
    pub castle: Option<RookShift>,
}

impl Move {
    #[must_use]
    pub(crate) const fn new(from: Position, to: Position, piece: Piece) -> Self {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            castle: None,
        }
    }

    #[must_use]
    pub(crate) const fn capturing(mut self, at: Position, piece: Piece) -> Self {
        self.captured = Some(Capture { at, piece });
        self
    }

    #[must_use]
    pub(crate) const fn promoting(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(Piece::new(self.piece.color, kind));
        self
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(&self) -> bool {
        self.castle.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.captured, Some(c) if c.at != self.to)
    }

    #[inline]
    #[must_use]
    pub fn is_double_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.from.y.abs_diff(self.to.y) == 2
    }

    /// Long algebraic name (`e2e4`, `e7e8q`, `e1g1` for castling).
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.kind.to_char())?;
        }
        Ok(())
    }
}
