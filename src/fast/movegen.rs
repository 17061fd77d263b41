use once_cell::sync::Lazy;

use super::{
    FastBoard, FastMove, Promotions, BISHOP, BLACK, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q, EMPTY, FLAG_CAPTURE, FLAG_CASTLE, FLAG_DOUBLE,
    FLAG_EN_PASSANT, KING, KIND_MASK, KNIGHT, PAWN, QUEEN, ROOK,
};
use crate::board::{Color, PieceKind};

// Ray directions: the first four are orthogonal, the last four diagonal.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

fn offset(sq: usize, dx: i32, dy: i32) -> Option<usize> {
    let x = (sq % 8) as i32 + dx;
    let y = (sq / 8) as i32 + dy;
    if (0..8).contains(&x) && (0..8).contains(&y) {
        Some((y * 8 + x) as usize)
    } else {
        None
    }
}

fn offset_table(offsets: &[(i32, i32)]) -> Vec<Vec<u8>> {
    (0..64)
        .map(|sq| {
            offsets
                .iter()
                .filter_map(|&(dx, dy)| offset(sq, dx, dy))
                .map(|t| t as u8)
                .collect()
        })
        .collect()
}

static KNIGHT_TARGETS: Lazy<Vec<Vec<u8>>> = Lazy::new(|| offset_table(&KNIGHT_OFFSETS));
static KING_TARGETS: Lazy<Vec<Vec<u8>>> = Lazy::new(|| offset_table(&DIRECTIONS));

/// RAYS[sq][dir]: squares walked from `sq` towards the board edge.
static RAYS: Lazy<Vec<Vec<Vec<u8>>>> = Lazy::new(|| {
    (0..64)
        .map(|sq| {
            DIRECTIONS
                .iter()
                .map(|&(dx, dy)| {
                    let mut ray = Vec::with_capacity(7);
                    let mut cur = sq;
                    while let Some(next) = offset(cur, dx, dy) {
                        ray.push(next as u8);
                        cur = next;
                    }
                    ray
                })
                .collect()
        })
        .collect()
});

impl FastBoard {
    /// Legal moves for the side to move. Promotions are queen-only.
    pub fn moves(&mut self) -> Vec<FastMove> {
        self.legal_moves(Promotions::QueenOnly)
    }

    /// Legal captures (including en passant) for quiescence search.
    pub fn captures(&mut self) -> Vec<FastMove> {
        let mut moves = self.legal_moves(Promotions::QueenOnly);
        moves.retain(|mv| mv.is_capture());
        moves
    }

    /// Legal moves with the requested promotion set.
    pub fn legal_moves(&mut self, promotions: Promotions) -> Vec<FastMove> {
        let mut moves = Vec::with_capacity(48);
        self.pseudo_moves(promotions, &mut moves);
        let mover = self.turn();
        moves.retain(|&mv| {
            self.play(mv);
            let safe = !self.is_attacked(self.king_square(mover), mover.opponent());
            self.unplay();
            safe
        });
        moves
    }

    /// The side to move's king is attacked.
    #[must_use]
    pub fn is_check(&self) -> bool {
        let mover = self.turn();
        self.is_attacked(self.king_square(mover), mover.opponent())
    }

    /// True if any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_attacked(&self, sq: u8, by: Color) -> bool {
        let sq = usize::from(sq);
        let side = super::color_bit(by);
        let cells = &self.cells;

        if KNIGHT_TARGETS[sq]
            .iter()
            .any(|&t| cells[usize::from(t)] == KNIGHT | side)
        {
            return true;
        }
        if KING_TARGETS[sq]
            .iter()
            .any(|&t| cells[usize::from(t)] == KING | side)
        {
            return true;
        }
        for dx in [-1, 1] {
            if let Some(t) = offset(sq, dx, -by.pawn_direction()) {
                if cells[t] == PAWN | side {
                    return true;
                }
            }
        }

        for (dir, ray) in RAYS[sq].iter().enumerate() {
            for &t in ray {
                let cell = cells[usize::from(t)];
                if cell == EMPTY {
                    continue;
                }
                if cell & BLACK == side {
                    let kind = cell & KIND_MASK;
                    let slides = if dir < 4 {
                        kind == ROOK || kind == QUEEN
                    } else {
                        kind == BISHOP || kind == QUEEN
                    };
                    if slides {
                        return true;
                    }
                }
                break;
            }
        }
        false
    }

    fn pseudo_moves(&self, promotions: Promotions, moves: &mut Vec<FastMove>) {
        let side = if self.black_to_move { BLACK } else { 0 };
        for sq in 0..64usize {
            let cell = self.cells[sq];
            if cell == EMPTY || cell & BLACK != side {
                continue;
            }
            match cell & KIND_MASK {
                PAWN => self.pawn_moves(sq, side, promotions, moves),
                KNIGHT => self.table_moves(sq, side, &KNIGHT_TARGETS[sq], moves),
                BISHOP => self.ray_moves(sq, side, 4..8, moves),
                ROOK => self.ray_moves(sq, side, 0..4, moves),
                QUEEN => self.ray_moves(sq, side, 0..8, moves),
                KING => {
                    self.table_moves(sq, side, &KING_TARGETS[sq], moves);
                    self.castling_moves(sq, side, moves);
                }
                _ => {}
            }
        }
    }

    fn pawn_moves(&self, sq: usize, side: u8, promotions: Promotions, moves: &mut Vec<FastMove>) {
        let (dy, home, last) = if side == BLACK { (-1, 6, 0) } else { (1, 1, 7) };
        let y = sq / 8;

        if let Some(one) = offset(sq, 0, dy) {
            if self.cells[one] == EMPTY {
                push_pawn(FastMove::new(sq as u8, one as u8, 0), last, promotions, moves);
                if y == home {
                    if let Some(two) = offset(sq, 0, 2 * dy) {
                        if self.cells[two] == EMPTY {
                            moves.push(FastMove::new(sq as u8, two as u8, FLAG_DOUBLE));
                        }
                    }
                }
            }
        }

        for dx in [-1, 1] {
            let Some(to) = offset(sq, dx, dy) else {
                continue;
            };
            let target = self.cells[to];
            if target != EMPTY && target & BLACK != side {
                push_pawn(
                    FastMove::new(sq as u8, to as u8, FLAG_CAPTURE),
                    last,
                    promotions,
                    moves,
                );
            } else if target == EMPTY && self.en_passant == Some(to as u8) {
                moves.push(FastMove::new(
                    sq as u8,
                    to as u8,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }

    fn table_moves(&self, sq: usize, side: u8, targets: &[u8], moves: &mut Vec<FastMove>) {
        for &t in targets {
            let target = self.cells[usize::from(t)];
            if target == EMPTY {
                moves.push(FastMove::new(sq as u8, t, 0));
            } else if target & BLACK != side {
                moves.push(FastMove::new(sq as u8, t, FLAG_CAPTURE));
            }
        }
    }

    fn ray_moves(&self, sq: usize, side: u8, dirs: std::ops::Range<usize>, moves: &mut Vec<FastMove>) {
        for dir in dirs {
            for &t in &RAYS[sq][dir] {
                let target = self.cells[usize::from(t)];
                if target == EMPTY {
                    moves.push(FastMove::new(sq as u8, t, 0));
                    continue;
                }
                if target & BLACK != side {
                    moves.push(FastMove::new(sq as u8, t, FLAG_CAPTURE));
                }
                break;
            }
        }
    }

    fn castling_moves(&self, sq: usize, side: u8, moves: &mut Vec<FastMove>) {
        let (color, base, kingside, queenside) = if side == BLACK {
            (Color::Black, 56, CASTLE_BLACK_K, CASTLE_BLACK_Q)
        } else {
            (Color::White, 0, CASTLE_WHITE_K, CASTLE_WHITE_Q)
        };
        if sq != base + 4 {
            return;
        }
        let enemy = color.opponent();
        let rook = ROOK | side;
        let empty = |squares: &[usize]| squares.iter().all(|&s| self.cells[s] == EMPTY);
        let safe = |squares: &[usize]| {
            squares
                .iter()
                .all(|&s| !self.is_attacked(s as u8, enemy))
        };

        if self.castling & kingside != 0
            && self.cells[base + 7] == rook
            && empty(&[base + 5, base + 6])
            && safe(&[base + 4, base + 5, base + 6])
        {
            moves.push(FastMove::new(sq as u8, (base + 6) as u8, FLAG_CASTLE));
        }
        if self.castling & queenside != 0
            && self.cells[base] == rook
            && empty(&[base + 1, base + 2, base + 3])
            && safe(&[base + 4, base + 3, base + 2])
        {
            moves.push(FastMove::new(sq as u8, (base + 2) as u8, FLAG_CASTLE));
        }
    }
}

fn push_pawn(mv: FastMove, last: usize, promotions: Promotions, moves: &mut Vec<FastMove>) {
    if usize::from(mv.to) / 8 != last {
        moves.push(mv);
        return;
    }
    let kinds: &[PieceKind] = match promotions {
        Promotions::QueenOnly => &[PieceKind::Queen],
        Promotions::All => &PieceKind::PROMOTIONS,
    };
    for &kind in kinds {
        moves.push(FastMove {
            promotion: Some(kind),
            ..mv
        });
    }
}
