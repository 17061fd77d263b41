//! Zobrist hashing for chess positions.
//!
//! Keys cover boards up to 16x16; a position's hash XORs one key per
//! piece-on-square, the side to move, each castling flag and the en passant
//! file.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Board, Color, SquareMeta};

const SQUARES: usize = 256;
const STRIDE: usize = 16;

pub(crate) struct ZobristKeys {
    // piece_keys[color * 6 + kind][y * 16 + x]
    pub(crate) piece_keys: [[u64; SQUARES]; 12],
    pub(crate) black_to_move_key: u64,
    // castling_keys[color][side]: 0=Kingside, 1=Queenside
    pub(crate) castling_keys: [[u64; 2]; 2],
    pub(crate) en_passant_keys: [u64; STRIDE],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[0; SQUARES]; 12];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [0; STRIDE];

        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

impl Board {
    /// Zobrist hash of the position (pieces, side to move, castling flags,
    /// en passant file). Move counters do not contribute.
    #[must_use]
    pub fn hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0;

        for (pos, piece) in self.pieces() {
            let slot = piece.color.index() * 6 + piece.kind.index();
            let sq = pos.y as usize * STRIDE + pos.x as usize;
            hash ^= keys.piece_keys[slot][sq];

            let meta = self.meta(pos);
            for (side, flag) in [SquareMeta::CASTLE_KINGSIDE, SquareMeta::CASTLE_QUEENSIDE]
                .into_iter()
                .enumerate()
            {
                if meta.contains(flag) {
                    hash ^= keys.castling_keys[piece.color.index()][side];
                }
            }
            if meta.contains(SquareMeta::DOUBLE_STEP) {
                hash ^= keys.en_passant_keys[pos.x as usize];
            }
        }

        if self.turn() == Color::Black {
            hash ^= keys.black_to_move_key;
        }

        hash
    }
}
