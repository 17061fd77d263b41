//! Pseudo-legal move generation for the authoritative board.
//!
//! Moves are produced square by square from a1 upwards, so the order is
//! deterministic for a given position. King safety is handled by the
//! callers in `rules.rs`, except for castling whose transit checks live here.

use super::attacks::{BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use super::{Board, Move, Piece, PieceKind, Position, RookShift, SquareMeta};

const QUEEN_DIRS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Board {
    pub(crate) fn pseudo_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.pieces() {
            if piece.color != self.turn {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(from, piece, &mut moves),
                PieceKind::Knight => self.step_moves(from, piece, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => self.slider_moves(from, piece, &BISHOP_DIRS, &mut moves),
                PieceKind::Rook => self.slider_moves(from, piece, &ROOK_DIRS, &mut moves),
                PieceKind::Queen => self.slider_moves(from, piece, &QUEEN_DIRS, &mut moves),
                PieceKind::King => {
                    self.step_moves(from, piece, &KING_OFFSETS, &mut moves);
                    self.castling_moves(from, piece, &mut moves);
                }
            }
        }
        // Only reachable from a hand-built position with the idle side in check.
        moves.retain(|mv| !mv.captured.is_some_and(|c| c.piece.kind == PieceKind::King));
        moves
    }

    fn pawn_moves(&self, from: Position, pawn: Piece, moves: &mut Vec<Move>) {
        let dir = pawn.color.pawn_direction();

        if let Some(one) = self.step(from, 0, dir) {
            if self.at(one).is_none() {
                self.push_pawn_move(Move::new(from, one, pawn), moves);
                if from.y == self.pawn_home_rank(pawn.color) {
                    if let Some(two) = self.step(from, 0, 2 * dir) {
                        if self.at(two).is_none() {
                            self.push_pawn_move(Move::new(from, two, pawn), moves);
                        }
                    }
                }
            }
        }

        for dx in [-1, 1] {
            let Some(to) = self.step(from, dx, dir) else {
                continue;
            };
            match self.at(to) {
                Some(target) if target.color != pawn.color => {
                    self.push_pawn_move(Move::new(from, to, pawn).capturing(to, target), moves);
                }
                Some(_) => {}
                None => {
                    // En passant: the pawn beside us advanced two ranks last ply.
                    let Some(beside) = self.step(from, dx, 0) else {
                        continue;
                    };
                    if let Some(victim) = self.at(beside) {
                        if victim.color != pawn.color
                            && victim.kind == PieceKind::Pawn
                            && self.meta(beside).contains(SquareMeta::DOUBLE_STEP)
                        {
                            moves.push(Move::new(from, to, pawn).capturing(beside, victim));
                        }
                    }
                }
            }
        }
    }

    /// Push a pawn move, expanding it into the four promotions on the last rank.
    fn push_pawn_move(&self, mv: Move, moves: &mut Vec<Move>) {
        if mv.to.y == self.promotion_rank(mv.piece.color) {
            for kind in PieceKind::PROMOTIONS {
                moves.push(mv.promoting(kind));
            }
        } else {
            moves.push(mv);
        }
    }

    fn slider_moves(&self, from: Position, piece: Piece, dirs: &[(i32, i32)], moves: &mut Vec<Move>) {
        for &(dx, dy) in dirs {
            let mut cur = from;
            while let Some(to) = self.step(cur, dx, dy) {
                cur = to;
                match self.at(to) {
                    None => moves.push(Move::new(from, to, piece)),
                    Some(target) => {
                        if target.color != piece.color {
                            moves.push(Move::new(from, to, piece).capturing(to, target));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn step_moves(&self, from: Position, piece: Piece, offsets: &[(i32, i32)], moves: &mut Vec<Move>) {
        for &(dx, dy) in offsets {
            let Some(to) = self.step(from, dx, dy) else {
                continue;
            };
            match self.at(to) {
                None => moves.push(Move::new(from, to, piece)),
                Some(target) if target.color != piece.color => {
                    moves.push(Move::new(from, to, piece).capturing(to, target));
                }
                Some(_) => {}
            }
        }
    }

    fn castling_moves(&self, from: Position, king: Piece, moves: &mut Vec<Move>) {
        let meta = self.meta(from);
        for kingside in [true, false] {
            if !meta.contains(SquareMeta::castle(kingside)) {
                continue;
            }
            if let Some(mv) = self.castle(from, king, kingside) {
                moves.push(mv);
            }
        }
    }

    fn castle(&self, from: Position, king: Piece, kingside: bool) -> Option<Move> {
        let (rook_x, king_to_x, rook_to_x) = if kingside {
            let last = self.width.checked_sub(1)?;
            (last, last.checked_sub(1)?, last.checked_sub(2)?)
        } else {
            (0, 2, 3)
        };
        if king_to_x >= self.width || rook_to_x >= self.width {
            return None;
        }
        let rook_from = Position::new(rook_x, from.y);
        let king_to = Position::new(king_to_x, from.y);
        let rook_to = Position::new(rook_to_x, from.y);
        if self.at(rook_from) != Some(Piece::new(king.color, PieceKind::Rook)) {
            return None;
        }

        let (lo, hi) = (from.x.min(rook_x), from.x.max(rook_x));
        if (lo + 1..hi).any(|x| self.at(Position::new(x, from.y)).is_some()) {
            return None;
        }
        for dest in [king_to, rook_to] {
            if dest != from && dest != rook_from && self.at(dest).is_some() {
                return None;
            }
        }

        // Attacks are computed with the king lifted off the board, so a
        // slider behind it still covers the squares it would pass.
        let mut lifted = self.fresh();
        lifted.set(from, None);
        let enemy = king.color.opponent();
        let (a, b) = (from.x.min(king_to_x), from.x.max(king_to_x));
        if (a..=b).any(|x| lifted.is_attacked(Position::new(x, from.y), enemy)) {
            return None;
        }

        let mut mv = Move::new(from, king_to, king);
        mv.castle = Some(RookShift {
            from: rook_from,
            to: rook_to,
        });
        Some(mv)
    }
}
