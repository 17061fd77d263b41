//! Word-packed board: one single-bit mask per piece.
//!
//! Every piece on the board owns an entry in a shared `Vec<u64>`; the entries
//! are grouped into twelve slices, one per colour and kind. A captured piece
//! keeps its entry with the mask zeroed, so indices stay stable across
//! play/unplay. Promotion moves the piece into the slice of its new kind,
//! which is sized at construction with room for every pawn of that colour.

mod movegen;
mod shifts;


use std::fmt;

use crate::board::{Board, BoardError, Color, Move, Piece, PieceKind, Position, SquareMeta};

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

const FLAG_CAPTURE: u8 = 1 << 0;
const FLAG_EN_PASSANT: u8 = 1 << 1;
const FLAG_CASTLE: u8 = 1 << 2;
const FLAG_DOUBLE: u8 = 1 << 3;

/// Slice number for a colour and kind: `color * 6 + kind`.
#[inline]
const fn slot(color: Color, kind: PieceKind) -> usize {
    color.index() * 6 + kind.index()
}

#[inline]
fn square_of(mask: u64) -> Position {
    Position::from_index(mask.trailing_zeros() as usize, 8)
}

/// A window into the shared mask buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slice {
    start: u8,
    len: u8,
    cap: u8,
}

impl Slice {
    #[inline]
    fn range(self) -> std::ops::Range<usize> {
        usize::from(self.start)..usize::from(self.start) + usize::from(self.len)
    }

    #[must_use]
    pub fn len(self) -> usize {
        usize::from(self.len)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn capacity(self) -> usize {
        usize::from(self.cap)
    }
}

/// A move on the bitboard: which buffer entry moves and where it ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitMove {
    pub index: u8,
    pub from: u64,
    pub to: u64,
    pub promotion: Option<PieceKind>,
    flags: u8,
}

impl BitMove {
    #[inline]
    const fn new(index: usize, from: u64, to: u64, flags: u8) -> Self {
        BitMove {
            index: index as u8,
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

impl fmt::Display for BitMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_of(self.from), square_of(self.to))?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Undo {
    mv: BitMove,
    captured: Option<(u8, u64)>,
    rook: Option<(u8, u64)>,
    promoted: Option<u8>,
    castling: u8,
    en_passant: u64,
    occupied: [u64; 2],
}

/// Bitboard position with an undo stack.
#[derive(Clone, Debug)]
pub struct BitBoard {
    pieces: Vec<u64>,
    slices: [Slice; 12],
    /// Aggregate masks, indexed by colour
    occupied: [u64; 2],
    turn: Color,
    castling: u8,
    en_passant: u64,
    undo: Vec<Undo>,
}

impl BitBoard {
    /// Build the bitboard mirror of an 8x8 authoritative board.
    ///
    /// Knight, bishop, rook and queen slices get one spare entry per pawn of
    /// their colour so any sequence of promotions fits.
    pub fn from_board(board: &Board) -> Result<Self, BoardError> {
        if board.width() != 8 || board.height() != 8 {
            return Err(BoardError::UnsupportedGeometry {
                width: board.width(),
                height: board.height(),
            });
        }

        let mut counts = [0usize; 12];
        for (_, piece) in board.pieces() {
            counts[slot(piece.color, piece.kind)] += 1;
        }

        let mut slices = [Slice::default(); 12];
        let mut total = 0usize;
        for color in Color::BOTH {
            let pawns = counts[slot(color, PieceKind::Pawn)];
            for kind in PieceKind::ALL {
                let idx = slot(color, kind);
                let spare = if PieceKind::PROMOTIONS.contains(&kind) {
                    pawns
                } else {
                    0
                };
                let cap = counts[idx] + spare;
                if total + cap > usize::from(u8::MAX) {
                    return Err(BoardError::CapacityExceeded {
                        pieces: board.pieces().count(),
                        capacity: usize::from(u8::MAX),
                    });
                }
                slices[idx] = Slice {
                    start: total as u8,
                    len: 0,
                    cap: cap as u8,
                };
                total += cap;
            }
        }

        let mut pieces = vec![0u64; total];
        let mut occupied = [0u64; 2];
        let mut en_passant = 0;
        for (pos, piece) in board.pieces() {
            let slice = &mut slices[slot(piece.color, piece.kind)];
            let mask = 1u64 << pos.index(8);
            occupied[piece.color.index()] |= mask;
            pieces[usize::from(slice.start + slice.len)] = mask;
            slice.len += 1;
            if board.meta(pos).contains(SquareMeta::DOUBLE_STEP) {
                en_passant = if piece.color == Color::White {
                    mask >> 8
                } else {
                    mask << 8
                };
            }
        }

        let mut castling = 0;
        for color in Color::BOTH {
            let king = board.king(color).ok_or(BoardError::MissingKing { color })?;
            let meta = board.meta(king);
            if meta.is_empty() {
                continue;
            }
            let home = if color == Color::White { 0 } else { 7 };
            if king != Position::new(4, home) {
                return Err(BoardError::UnsupportedCastling { color });
            }
            let (kingside, queenside) = match color {
                Color::White => (CASTLE_WHITE_K, CASTLE_WHITE_Q),
                Color::Black => (CASTLE_BLACK_K, CASTLE_BLACK_Q),
            };
            if meta.contains(SquareMeta::CASTLE_KINGSIDE) {
                castling |= kingside;
            }
            if meta.contains(SquareMeta::CASTLE_QUEENSIDE) {
                castling |= queenside;
            }
        }

        log::trace!(
            "bitboard built with {} entries for {} pieces",
            total,
            board.pieces().count()
        );

        Ok(BitBoard {
            pieces,
            slices,
            occupied,
            turn: board.turn(),
            castling,
            en_passant,
            undo: Vec::with_capacity(64),
        })
    }

    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The slice holding `color`'s pieces of `kind`.
    #[must_use]
    pub fn slice(&self, color: Color, kind: PieceKind) -> Slice {
        self.slices[slot(color, kind)]
    }

    /// Union of `color`'s pieces of `kind`.
    #[must_use]
    pub fn mask(&self, color: Color, kind: PieceKind) -> u64 {
        self.entries(slot(color, kind)).fold(0, |acc, (_, m)| acc | m)
    }

    /// Every square occupied by `color`.
    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn castling_bits(&self) -> u8 {
        self.castling
    }

    /// En passant target square as a mask, zero when none.
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> u64 {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Material balance in pawns from `color`'s point of view.
    #[must_use]
    pub fn score(&self, color: Color) -> i32 {
        let mut total = 0;
        for side in Color::BOTH {
            for kind in PieceKind::ALL {
                let count = self.mask(side, kind).count_ones() as i32;
                total += count * kind.value() * side.sign();
            }
        }
        total * color.sign()
    }

    /// Live entries of one slice, with their buffer index.
    fn entries(&self, slot: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.slices[slot]
            .range()
            .map(move |i| (i, self.pieces[i]))
            .filter(|&(_, m)| m != 0)
    }

    /// Find the buffer entry of `color` standing on `mask`.
    fn find(&self, color: Color, mask: u64) -> Option<usize> {
        PieceKind::ALL.iter().find_map(|&kind| {
            self.entries(slot(color, kind))
                .find(|&(_, m)| m == mask)
                .map(|(i, _)| i)
        })
    }

    /// Apply `mv` in place and push its undo entry.
    ///
    /// # Panics
    /// Panics if a promotion finds its target slice full, which the
    /// capacity derived in `from_board` rules out.
    pub fn play(&mut self, mv: BitMove) {
        let mover = self.turn;
        let enemy = mover.opponent();
        let mut undo = Undo {
            mv,
            captured: None,
            rook: None,
            promoted: None,
            castling: self.castling,
            en_passant: self.en_passant,
            occupied: self.occupied,
        };

        if mv.is_capture() {
            let victim = if !mv.is_en_passant() {
                mv.to
            } else if mover == Color::White {
                mv.to >> 8
            } else {
                mv.to << 8
            };
            if let Some(i) = self.find(enemy, victim) {
                undo.captured = Some((i as u8, self.pieces[i]));
                self.pieces[i] = 0;
                self.occupied[enemy.index()] &= !victim;
            }
        }
        self.occupied[mover.index()] ^= mv.from | mv.to;

        let index = usize::from(mv.index);
        match mv.promotion {
            Some(kind) => {
                self.pieces[index] = 0;
                let target = slot(mover, kind);
                let slice = &mut self.slices[target];
                assert!(slice.len < slice.cap, "promotion slice is full");
                self.pieces[usize::from(slice.start + slice.len)] = mv.to;
                slice.len += 1;
                undo.promoted = Some(target as u8);
            }
            None => self.pieces[index] = mv.to,
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = if mv.to > mv.from {
                (mv.from << 3, mv.from << 1)
            } else {
                (mv.from >> 4, mv.from >> 1)
            };
            if let Some(i) = self.find(mover, rook_from) {
                undo.rook = Some((i as u8, rook_from));
                self.pieces[i] = rook_to;
                self.occupied[mover.index()] ^= rook_from | rook_to;
            }
        }

        self.castling &= castle_mask(mv.from) & castle_mask(mv.to);
        self.en_passant = if mv.flags & FLAG_DOUBLE != 0 {
            if mover == Color::White {
                mv.from << 8
            } else {
                mv.from >> 8
            }
        } else {
            0
        };
        self.turn = enemy;
        self.undo.push(undo);
    }

    /// Revert the most recent `play`, restoring slice boundaries exactly.
    ///
    /// # Panics
    /// Panics if there is no move to revert.
    pub fn unplay(&mut self) {
        let undo = self
            .undo
            .pop()
            .expect("unplay without a matching play");
        if let Some(target) = undo.promoted {
            let slice = &mut self.slices[usize::from(target)];
            slice.len -= 1;
            self.pieces[usize::from(slice.start + slice.len)] = 0;
        }
        self.pieces[usize::from(undo.mv.index)] = undo.mv.from;
        if let Some((i, mask)) = undo.rook {
            self.pieces[usize::from(i)] = mask;
        }
        if let Some((i, mask)) = undo.captured {
            self.pieces[usize::from(i)] = mask;
        }
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.occupied = undo.occupied;
        self.turn = self.turn.opponent();
    }
}

/// Castling bits that survive a move touching `mask`.
#[inline]
fn castle_mask(mask: u64) -> u8 {
    match mask.trailing_zeros() {
        0 => !CASTLE_WHITE_Q,
        4 => !(CASTLE_WHITE_K | CASTLE_WHITE_Q),
        7 => !CASTLE_WHITE_K,
        56 => !CASTLE_BLACK_Q,
        60 => !(CASTLE_BLACK_K | CASTLE_BLACK_Q),
        63 => !CASTLE_BLACK_K,
        _ => !0,
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8).rev() {
            for x in 0..8 {
                let bit = 1u64 << (y * 8 + x);
                let mut c = '.';
                for color in Color::BOTH {
                    for kind in PieceKind::ALL {
                        if self.mask(color, kind) & bit != 0 {
                            c = Piece::new(color, kind).to_fen_char();
                        }
                    }
                }
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
