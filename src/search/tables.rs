//! Piece-square evaluation with material folded into the tables.
//!
//! Tables are written from White's side with rank 8 on the first row, so
//! White looks up `sq ^ 56` and Black looks up `sq` directly.

use crate::board::Color;
use crate::fast::{FastBoard, FastMove, BLACK, EMPTY, KIND_MASK};

const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20_000;

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

const fn embed(table: [i32; 64], value: i32) -> [i32; 64] {
    let mut out = table;
    let mut i = 0;
    while i < 64 {
        out[i] += value;
        i += 1;
    }
    out
}

/// Indexed by packed kind code (1..=6); slot 0 is unused.
static TABLES: [[i32; 64]; 7] = [
    [0; 64],
    embed(PAWN_PST, PAWN_VALUE),
    embed(KNIGHT_PST, KNIGHT_VALUE),
    embed(BISHOP_PST, BISHOP_VALUE),
    embed(ROOK_PST, ROOK_VALUE),
    embed(QUEEN_PST, QUEEN_VALUE),
    embed(KING_PST, KING_VALUE),
];

const VALUES: [i32; 7] = [
    0,
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Static score in centipawns from the side to move's point of view.
#[must_use]
pub fn evaluate(board: &FastBoard) -> i32 {
    let mut score = 0;
    for (sq, &cell) in board.cells().iter().enumerate() {
        if cell == EMPTY {
            continue;
        }
        let table = &TABLES[usize::from(cell & KIND_MASK)];
        if cell & BLACK == 0 {
            score += table[sq ^ 56];
        } else {
            score -= table[sq];
        }
    }
    match board.turn() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Most valuable victim, least valuable attacker.
pub(crate) fn mvv_lva(board: &FastBoard, mv: FastMove) -> i32 {
    let cells = board.cells();
    let attacker = VALUES[usize::from(cells[usize::from(mv.from)] & KIND_MASK)];
    let victim = if mv.is_en_passant() {
        PAWN_VALUE
    } else {
        VALUES[usize::from(cells[usize::from(mv.to)] & KIND_MASK)]
    };
    victim * 10 - attacker / 10
}
