//! Shift-based attack generation on 64-bit square sets.
//!
//! Bit `y * 8 + x` is the square at file `x`, rank `y`. A shift moves every
//! bit at once; edge masks drop the bits that would wrap onto the next rank.

pub(crate) const FILE_A: u64 = 0x0101_0101_0101_0101;
pub(crate) const FILE_B: u64 = FILE_A << 1;
pub(crate) const FILE_G: u64 = FILE_A << 6;
pub(crate) const FILE_H: u64 = FILE_A << 7;
pub(crate) const RANK_1: u64 = 0xFF;
pub(crate) const RANK_2: u64 = RANK_1 << 8;
pub(crate) const RANK_7: u64 = RANK_1 << 48;
pub(crate) const RANK_8: u64 = RANK_1 << 56;

const NOT_A: u64 = !FILE_A;
const NOT_H: u64 = !FILE_H;
const NOT_AB: u64 = !(FILE_A | FILE_B);
const NOT_GH: u64 = !(FILE_G | FILE_H);

#[inline]
pub(crate) const fn north(b: u64) -> u64 {
    b << 8
}

#[inline]
pub(crate) const fn south(b: u64) -> u64 {
    b >> 8
}

#[inline]
pub(crate) const fn east(b: u64) -> u64 {
    (b & NOT_H) << 1
}

#[inline]
pub(crate) const fn west(b: u64) -> u64 {
    (b & NOT_A) >> 1
}

#[inline]
pub(crate) const fn north_east(b: u64) -> u64 {
    (b & NOT_H) << 9
}

#[inline]
pub(crate) const fn north_west(b: u64) -> u64 {
    (b & NOT_A) << 7
}

#[inline]
pub(crate) const fn south_east(b: u64) -> u64 {
    (b & NOT_H) >> 7
}

#[inline]
pub(crate) const fn south_west(b: u64) -> u64 {
    (b & NOT_A) >> 9
}

pub(crate) const STRAIGHT: [fn(u64) -> u64; 4] = [north, south, east, west];
pub(crate) const DIAGONAL: [fn(u64) -> u64; 4] = [north_east, north_west, south_east, south_west];

pub(crate) fn knight_attacks(b: u64) -> u64 {
    ((b & NOT_H) << 17)
        | ((b & NOT_A) << 15)
        | ((b & NOT_GH) << 10)
        | ((b & NOT_AB) << 6)
        | ((b & NOT_A) >> 17)
        | ((b & NOT_H) >> 15)
        | ((b & NOT_AB) >> 10)
        | ((b & NOT_GH) >> 6)
}

pub(crate) fn king_attacks(b: u64) -> u64 {
    let row = b | east(b) | west(b);
    (row | north(row) | south(row)) & !b
}

/// Squares a pawn set attacks diagonally. White pawns attack northwards.
pub(crate) fn pawn_attacks(b: u64, white: bool) -> u64 {
    if white {
        north_east(b) | north_west(b)
    } else {
        south_east(b) | south_west(b)
    }
}

/// Walk `step` from `from` until the edge or the first occupied square,
/// which is included.
#[inline]
pub(crate) fn slide(from: u64, occupied: u64, step: fn(u64) -> u64) -> u64 {
    let mut out = 0;
    let mut cur = step(from);
    while cur != 0 {
        out |= cur;
        if cur & occupied != 0 {
            break;
        }
        cur = step(cur);
    }
    out
}

pub(crate) fn rook_attacks(from: u64, occupied: u64) -> u64 {
    STRAIGHT.iter().fold(0, |acc, &step| acc | slide(from, occupied, step))
}

pub(crate) fn bishop_attacks(from: u64, occupied: u64) -> u64 {
    DIAGONAL.iter().fold(0, |acc, &step| acc | slide(from, occupied, step))
}

/// Iterate the single-bit masks of a set, lowest square first.
pub(crate) struct Bits(pub(crate) u64);

impl Iterator for Bits {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.0 == 0 {
            return None;
        }
        let low = self.0 & self.0.wrapping_neg();
        self.0 &= self.0 - 1;
        Some(low)
    }
}
