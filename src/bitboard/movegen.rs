use super::shifts::{
    bishop_attacks, king_attacks, knight_attacks, north, pawn_attacks, rook_attacks, south, Bits,
    RANK_1, RANK_2, RANK_7, RANK_8,
};
use super::{
    slot, BitBoard, BitMove, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
    FLAG_CAPTURE, FLAG_CASTLE, FLAG_DOUBLE, FLAG_EN_PASSANT,
};
use crate::board::{Color, PieceKind};

impl BitBoard {
    /// Pseudo-legal moves: every move the pieces can make, ignoring whether
    /// the mover's king is left attacked. Promotions emit all four pieces.
    #[must_use]
    pub fn pseudo_moves(&self) -> Vec<BitMove> {
        let mover = self.turn;
        let own = self.occupancy(mover);
        let enemy = self.occupancy(mover.opponent());
        let occupied = own | enemy;
        let mut moves = Vec::with_capacity(48);

        for kind in PieceKind::ALL {
            for (index, from) in self.entries(slot(mover, kind)) {
                match kind {
                    PieceKind::Pawn => self.pawn_moves(index, from, occupied, enemy, &mut moves),
                    PieceKind::King => {
                        push_targets(index, from, king_attacks(from) & !own, enemy, &mut moves);
                        self.castling_moves(index, from, occupied, &mut moves);
                    }
                    _ => {
                        let targets = piece_attacks(kind, from, occupied) & !own;
                        push_targets(index, from, targets, enemy, &mut moves);
                    }
                }
            }
        }
        moves
    }

    /// Pseudo-legal moves that do not leave the mover's king attacked.
    pub fn legal_moves(&mut self) -> Vec<BitMove> {
        let mover = self.turn;
        let mut moves = self.pseudo_moves();
        moves.retain(|&mv| {
            self.play(mv);
            let safe = self.attacks(mover.opponent()) & self.mask(mover, PieceKind::King) == 0;
            self.unplay();
            safe
        });
        moves
    }

    /// Every square attacked by `color`.
    #[must_use]
    pub fn attacks(&self, color: Color) -> u64 {
        let occupied = self.occupancy(Color::White) | self.occupancy(Color::Black);
        let mut out = pawn_attacks(self.mask(color, PieceKind::Pawn), color == Color::White);
        for kind in &PieceKind::ALL[1..] {
            for (_, from) in self.entries(slot(color, *kind)) {
                out |= piece_attacks(*kind, from, occupied);
            }
        }
        out
    }

    /// The side to move's king is attacked.
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.attacks(self.turn.opponent()) & self.mask(self.turn, PieceKind::King) != 0
    }

    fn pawn_moves(&self, index: usize, from: u64, occupied: u64, enemy: u64, moves: &mut Vec<BitMove>) {
        let white = self.turn == Color::White;
        let (advance, home, last): (fn(u64) -> u64, u64, u64) = if white {
            (north, RANK_2, RANK_8)
        } else {
            (south, RANK_7, RANK_1)
        };

        let one = advance(from) & !occupied;
        if one != 0 {
            push_pawn(BitMove::new(index, from, one, 0), last, moves);
            let two = advance(one) & !occupied;
            if from & home != 0 && two != 0 {
                moves.push(BitMove::new(index, from, two, FLAG_DOUBLE));
            }
        }

        let hits = pawn_attacks(from, white);
        for to in Bits(hits & enemy) {
            push_pawn(BitMove::new(index, from, to, FLAG_CAPTURE), last, moves);
        }
        if hits & self.en_passant != 0 {
            moves.push(BitMove::new(
                index,
                from,
                self.en_passant,
                FLAG_CAPTURE | FLAG_EN_PASSANT,
            ));
        }
    }

    fn castling_moves(&self, index: usize, from: u64, occupied: u64, moves: &mut Vec<BitMove>) {
        let mover = self.turn;
        let (base, kingside, queenside) = match mover {
            Color::White => (0, CASTLE_WHITE_K, CASTLE_WHITE_Q),
            Color::Black => (56, CASTLE_BLACK_K, CASTLE_BLACK_Q),
        };
        if from != 1u64 << (base + 4) || self.castling & (kingside | queenside) == 0 {
            return;
        }
        let rooks = self.mask(mover, PieceKind::Rook);
        let attacked = self.attacks(mover.opponent());
        let at = |file: u32| 1u64 << (base + file);

        if self.castling & kingside != 0
            && rooks & at(7) != 0
            && occupied & (at(5) | at(6)) == 0
            && attacked & (at(4) | at(5) | at(6)) == 0
        {
            moves.push(BitMove::new(index, from, at(6), FLAG_CASTLE));
        }
        if self.castling & queenside != 0
            && rooks & at(0) != 0
            && occupied & (at(1) | at(2) | at(3)) == 0
            && attacked & (at(2) | at(3) | at(4)) == 0
        {
            moves.push(BitMove::new(index, from, at(2), FLAG_CASTLE));
        }
    }
}

fn piece_attacks(kind: PieceKind, from: u64, occupied: u64) -> u64 {
    match kind {
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupied),
        PieceKind::Rook => rook_attacks(from, occupied),
        PieceKind::Queen => bishop_attacks(from, occupied) | rook_attacks(from, occupied),
        PieceKind::King => king_attacks(from),
        PieceKind::Pawn => 0,
    }
}

fn push_targets(index: usize, from: u64, targets: u64, enemy: u64, moves: &mut Vec<BitMove>) {
    for to in Bits(targets) {
        let flags = if to & enemy != 0 { FLAG_CAPTURE } else { 0 };
        moves.push(BitMove::new(index, from, to, flags));
    }
}

fn push_pawn(mv: BitMove, last: u64, moves: &mut Vec<BitMove>) {
    if mv.to & last == 0 {
        moves.push(mv);
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        moves.push(BitMove {
            promotion: Some(kind),
            ..mv
        });
    }
}
