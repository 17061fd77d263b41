//! Opening-book lookup.
//!
//! A book maps a position to weighted candidate moves. The engine consults
//! it before searching and ignores any candidate that is not legal in the
//! position, so a book never needs to be trusted.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use crate::board::{Board, MoveError};

/// A candidate move from the book, by long algebraic name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookMove {
    pub name: String,
    pub weight: u32,
}

/// The lookup contract: candidates for a position, possibly none.
pub trait OpeningBook {
    fn lookup(&self, board: &Board) -> Vec<BookMove>;
}

/// Error type for loading a book from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookError {
    /// 1-based line number
    pub line: usize,
    pub source: MoveError,
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opening book line {}: {}", self.line, self.source)
    }
}

impl std::error::Error for BookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// In-memory book keyed by [`Board::hash`].
#[derive(Clone, Debug, Default)]
pub struct MemoryBook {
    by_hash: HashMap<u64, Vec<BookMove>>,
}

impl MemoryBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load opening lines played from the standard start position.
    ///
    /// Each line is a whitespace-separated sequence of long algebraic moves,
    /// optionally followed by a numeric weight (default 1). Blank lines and
    /// lines starting with `#` are skipped. Weights of lines sharing a
    /// position and move are summed.
    pub fn from_lines(text: &str) -> Result<Self, BookError> {
        let mut weights: HashMap<u64, HashMap<String, u32>> = HashMap::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens: Vec<&str> = line.split_whitespace().collect();
            let weight = match tokens.last().map(|t| t.parse::<u32>()) {
                Some(Ok(w)) => {
                    tokens.pop();
                    w.max(1)
                }
                _ => 1,
            };

            let mut board = Board::new();
            for token in tokens {
                let mv = board.find_move(token).map_err(|source| BookError {
                    line: number + 1,
                    source,
                })?;
                let entry = weights
                    .entry(board.hash())
                    .or_default()
                    .entry(mv.name())
                    .or_insert(0);
                *entry = entry.saturating_add(weight);
                board = board.make(&mv);
            }
        }

        let by_hash = weights
            .into_iter()
            .map(|(hash, moves)| {
                let mut row: Vec<BookMove> = moves
                    .into_iter()
                    .map(|(name, weight)| BookMove { name, weight })
                    .collect();
                row.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
                (hash, row)
            })
            .collect();
        let book = MemoryBook { by_hash };
        log::debug!("opening book loaded with {} positions", book.len());
        Ok(book)
    }

    /// Add or reinforce a single candidate for `board`.
    pub fn insert(&mut self, board: &Board, name: &str, weight: u32) {
        let row = self.by_hash.entry(board.hash()).or_default();
        match row.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.weight = existing.weight.saturating_add(weight),
            None => row.push(BookMove {
                name: name.to_string(),
                weight,
            }),
        }
    }

    /// Number of positions with at least one candidate.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

impl OpeningBook for MemoryBook {
    fn lookup(&self, board: &Board) -> Vec<BookMove> {
        self.by_hash.get(&board.hash()).cloned().unwrap_or_default()
    }
}

/// Weighted random choice among `candidates`. A zero total weight falls
/// back to the first candidate.
pub fn choose_weighted<'a, R: Rng + ?Sized>(
    candidates: &'a [BookMove],
    rng: &mut R,
) -> Option<&'a BookMove> {
    let first = candidates.first()?;
    let total: u64 = candidates.iter().map(|m| u64::from(m.weight)).sum();
    if total == 0 {
        return Some(first);
    }
    let mut pick = rng.gen_range(0..total);
    for candidate in candidates {
        let w = u64::from(candidate.weight);
        if pick < w {
            return Some(candidate);
        }
        pick -= w;
    }
    Some(first)
}
