//! Packed-byte mutable board for search.
//!
//! A `FastBoard` mirrors an 8x8 [`Board`] as 64 bytes, one per square, each
//! holding `kind | color`. It is built once per search root and then updated
//! in place: [`FastBoard::play`] records the overwritten cells, king squares,
//! castling bits and en passant target on an undo stack, and
//! [`FastBoard::unplay`] pops exactly one entry. Because the undo log is a
//! stack, play/unplay pairs must nest.
//!
//! Move generation defaults to queen-only promotion (what search needs);
//! pass [`Promotions::All`] for full legality, e.g. perft.

mod movegen;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::board::{Board, BoardError, Color, Move, Piece, PieceKind, Position, SquareMeta};

pub(crate) const EMPTY: u8 = 0;
pub(crate) const BLACK: u8 = 0b1000;
pub(crate) const KIND_MASK: u8 = 0b0111;

pub(crate) const PAWN: u8 = 1;
pub(crate) const KNIGHT: u8 = 2;
pub(crate) const BISHOP: u8 = 3;
pub(crate) const ROOK: u8 = 4;
pub(crate) const QUEEN: u8 = 5;
pub(crate) const KING: u8 = 6;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

const FLAG_CAPTURE: u8 = 1 << 0;
const FLAG_EN_PASSANT: u8 = 1 << 1;
const FLAG_CASTLE: u8 = 1 << 2;
const FLAG_DOUBLE: u8 = 1 << 3;

#[inline]
pub(crate) const fn kind_code(kind: PieceKind) -> u8 {
    kind.index() as u8 + 1
}

#[inline]
pub(crate) const fn color_bit(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => BLACK,
    }
}

#[inline]
pub(crate) fn encode(piece: Piece) -> u8 {
    kind_code(piece.kind) | color_bit(piece.color)
}

#[inline]
pub(crate) fn decode(cell: u8) -> Option<Piece> {
    if cell == EMPTY {
        return None;
    }
    let kind = PieceKind::from_index(usize::from(cell & KIND_MASK) - 1)?;
    let color = if cell & BLACK != 0 {
        Color::Black
    } else {
        Color::White
    };
    Some(Piece::new(color, kind))
}

/// Which promotions the generator emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotions {
    /// Only promote to a queen (search)
    QueenOnly,
    /// All four promotion pieces (full legality)
    All,
}

/// A move on the packed board. Squares are indices `y * 8 + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FastMove {
    pub from: u8,
    pub to: u8,
    pub promotion: Option<PieceKind>,
    flags: u8,
}

impl FastMove {
    #[inline]
    const fn new(from: u8, to: u8, flags: u8) -> Self {
        FastMove {
            from,
            to,
            promotion: None,
            flags,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.flags & FLAG_CASTLE != 0
    }

    /// Long algebraic name, identical to the authoritative move's name.
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }

    /// The authoritative move with the same name on `board`.
    #[must_use]
    pub fn to_board_move(self, board: &Board) -> Option<Move> {
        board.find_move(&self.name()).ok()
    }
}

impl fmt::Display for FastMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Position::from_index(usize::from(self.from), 8),
            Position::from_index(usize::from(self.to), 8)
        )?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// One undo-log entry: the cells a move overwrote plus the scalar state.
#[derive(Clone, Copy, Debug)]
struct Undo {
    cells: [(u8, u8); 4],
    len: u8,
    kings: [u8; 2],
    castling: u8,
    en_passant: Option<u8>,
}

/// Packed 64-byte board with an undo stack.
#[derive(Clone, Debug)]
pub struct FastBoard {
    cells: [u8; 64],
    kings: [u8; 2],
    black_to_move: bool,
    castling: u8,
    en_passant: Option<u8>,
    undo: Vec<Undo>,
}

impl FastBoard {
    /// Build the packed mirror of an 8x8 authoritative board.
    pub fn from_board(board: &Board) -> Result<Self, BoardError> {
        if board.width() != 8 || board.height() != 8 {
            return Err(BoardError::UnsupportedGeometry {
                width: board.width(),
                height: board.height(),
            });
        }

        let mut cells = [EMPTY; 64];
        let mut en_passant = None;
        for (pos, piece) in board.pieces() {
            let sq = pos.index(8);
            cells[sq] = encode(piece);
            if board.meta(pos).contains(SquareMeta::DOUBLE_STEP) {
                let behind = sq as i32 - 8 * piece.color.pawn_direction();
                en_passant = Some(behind as u8);
            }
        }

        let mut kings = [0u8; 2];
        let mut castling = 0;
        for color in Color::BOTH {
            let king = board.king(color).ok_or(BoardError::MissingKing { color })?;
            kings[color.index()] = king.index(8) as u8;

            let meta = board.meta(king);
            let (kingside, queenside) = match color {
                Color::White => (CASTLE_WHITE_K, CASTLE_WHITE_Q),
                Color::Black => (CASTLE_BLACK_K, CASTLE_BLACK_Q),
            };
            let home = if color == Color::White { 0 } else { 7 };
            let flagged = meta.contains(SquareMeta::CASTLE_KINGSIDE)
                || meta.contains(SquareMeta::CASTLE_QUEENSIDE);
            if flagged && king != Position::new(4, home) {
                return Err(BoardError::UnsupportedCastling { color });
            }
            if meta.contains(SquareMeta::CASTLE_KINGSIDE) {
                castling |= kingside;
            }
            if meta.contains(SquareMeta::CASTLE_QUEENSIDE) {
                castling |= queenside;
            }
        }

        Ok(FastBoard {
            cells,
            kings,
            black_to_move: board.turn() == Color::Black,
            castling,
            en_passant,
            undo: Vec::with_capacity(64),
        })
    }

    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        if self.black_to_move {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Raw packed cells, `kind | color` per square.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8; 64] {
        &self.cells
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        decode(self.cells[usize::from(sq)])
    }

    /// Cached king square.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> u8 {
        self.kings[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn castling_bits(&self) -> u8 {
        self.castling
    }

    /// Square a pawn may capture onto en passant this ply.
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    /// Number of moves currently on the undo stack.
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Material balance in pawns, positive for White, negated for Black.
    #[must_use]
    pub fn score(&self, color: Color) -> i32 {
        let white: i32 = self
            .cells
            .iter()
            .filter_map(|&c| decode(c))
            .map(Piece::signed_value)
            .sum();
        white * color.sign()
    }

    /// Apply `mv` in place and push its undo entry.
    pub fn play(&mut self, mv: FastMove) {
        let mut undo = Undo {
            cells: [(0, 0); 4],
            len: 0,
            kings: self.kings,
            castling: self.castling,
            en_passant: self.en_passant,
        };
        let from = usize::from(mv.from);
        let to = usize::from(mv.to);
        let piece = self.cells[from];
        let side = piece & BLACK;

        if mv.is_en_passant() {
            let victim = if side == BLACK { to + 8 } else { to - 8 };
            self.write(&mut undo, victim, EMPTY);
        }

        self.write(&mut undo, from, EMPTY);
        let placed = match mv.promotion {
            Some(kind) => kind_code(kind) | side,
            None => piece,
        };
        self.write(&mut undo, to, placed);

        if mv.is_castling() {
            let (rook_from, rook_to) = if to > from {
                (from + 3, from + 1)
            } else {
                (from - 4, from - 1)
            };
            let rook = self.cells[rook_from];
            self.write(&mut undo, rook_from, EMPTY);
            self.write(&mut undo, rook_to, rook);
        }

        if piece & KIND_MASK == KING {
            let idx = if side == BLACK { 1 } else { 0 };
            self.kings[idx] = mv.to;
        }

        self.castling &= castle_mask(from) & castle_mask(to);
        self.en_passant = if mv.flags & FLAG_DOUBLE != 0 {
            Some(((from + to) / 2) as u8)
        } else {
            None
        };
        self.black_to_move = !self.black_to_move;
        self.undo.push(undo);
    }

    /// Revert the most recent `play`.
    ///
    /// # Panics
    /// Panics if there is no move to revert.
    pub fn unplay(&mut self) {
        let undo = self
            .undo
            .pop()
            .expect("unplay without a matching play");
        for &(sq, old) in undo.cells[..usize::from(undo.len)].iter().rev() {
            self.cells[usize::from(sq)] = old;
        }
        self.kings = undo.kings;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.black_to_move = !self.black_to_move;
    }

    #[inline]
    fn write(&mut self, undo: &mut Undo, sq: usize, value: u8) {
        undo.cells[usize::from(undo.len)] = (sq as u8, self.cells[sq]);
        undo.len += 1;
        self.cells[sq] = value;
    }
}

/// Castling bits that survive a move touching `sq`.
#[inline]
const fn castle_mask(sq: usize) -> u8 {
    match sq {
        0 => !CASTLE_WHITE_Q,
        4 => !(CASTLE_WHITE_K | CASTLE_WHITE_Q),
        7 => !CASTLE_WHITE_K,
        56 => !CASTLE_BLACK_Q,
        60 => !(CASTLE_BLACK_K | CASTLE_BLACK_Q),
        63 => !CASTLE_BLACK_K,
        _ => !0,
    }
}
