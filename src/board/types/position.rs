//! Board coordinates.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::PositionError;

/// A square on a board, as `(x, y)` = (file, rank), both zero-based.
///
/// Whether a position lies on a given board is decided by the board
/// (`Board::contains`), since boards carry their own width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub y: u8,
    pub x: u8,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Position { x, y }
    }

    /// Index into a row-major cell array of the given width.
    #[inline]
    #[must_use]
    pub const fn index(self, width: u8) -> usize {
        self.y as usize * width as usize + self.x as usize
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize, width: u8) -> Self {
        Position {
            x: (idx % width as usize) as u8,
            y: (idx / width as usize) as u8,
        }
    }

    /// Step by `(dx, dy)`, staying inside a `width` x `height` board.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, width: u8, height: u8) -> Option<Position> {
        let x = i32::from(self.x) + dx;
        let y = i32::from(self.y) + dy;
        if x < 0 || y < 0 || x >= i32::from(width) || y >= i32::from(height) {
            return None;
        }
        Some(Position::new(x as u8, y as u8))
    }

    /// Algebraic name: file letters followed by the 1-based rank.
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }
}

/// File letters in bijective base 26: a..z, aa, ab, ...
fn file_letters(x: u8) -> String {
    let mut n = usize::from(x) + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_letters(self.x), u32::from(self.y) + 1)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionError::InvalidNotation {
            notation: s.to_string(),
        };

        let split = s.find(|c: char| !c.is_ascii_lowercase()).ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if digits.starts_with('0') {
            return Err(invalid());
        }

        let mut file: usize = 0;
        for b in letters.bytes() {
            file = file * 26 + usize::from(b - b'a') + 1;
            if file > usize::from(u8::MAX) + 1 {
                return Err(invalid());
            }
        }
        let rank: usize = digits.parse().map_err(|_| invalid())?;
        if rank > usize::from(u8::MAX) + 1 {
            return Err(invalid());
        }

        Ok(Position::new((file - 1) as u8, (rank - 1) as u8))
    }
}
