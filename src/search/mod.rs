//! Move selection.
//!
//! Two engines score the legal root moves of an authoritative [`Board`]:
//! - [`AlphaBeta`]: negamax with alpha-beta pruning over the packed
//!   [`FastBoard`](crate::fast::FastBoard), finishing each line with a
//!   capture-only quiescence search
//! - [`Rollout`]: seeded random beam sampling that reports win, loss and draw
//!   fractions alongside average material
//!
//! [`select_move`] consults an opening book first and falls back to one of
//! the engines. Both engines are pure functions of the position and their
//! parameters; each call builds and owns its own mutable board.

mod alphabeta;
mod constants;
mod params;
mod rollout;
mod tables;


use std::fmt;

use rand::Rng;

use crate::board::{Board, BoardError, Move};
use crate::book::{choose_weighted, BookMove, OpeningBook};

pub use alphabeta::AlphaBeta;
pub use constants::{INFINITY, MATE_SCORE, MATE_THRESHOLD};
pub use params::{AlphaBetaParams, RolloutParams, Strategy};
pub use rollout::{Rollout, Tally};
pub use tables::evaluate;

/// Error type for move selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Checkmate or stalemate: nothing to choose from
    NoLegalMoves,
    /// The position cannot be mirrored into a search board
    Board(BoardError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMoves => write!(f, "No legal moves available"),
            SearchError::Board(err) => write!(f, "Cannot search position: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::NoLegalMoves => None,
            SearchError::Board(err) => Some(err),
        }
    }
}

impl From<BoardError> for SearchError {
    fn from(err: BoardError) -> Self {
        SearchError::Board(err)
    }
}

/// Pick a move for the side to move.
///
/// Legal book candidates win over search and are chosen by weight. Without
/// one, the strategy's engine ranks the root moves: alpha-beta plays its
/// best, the rollout engine picks uniformly among its top `variety`.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    book: Option<&dyn OpeningBook>,
    strategy: &Strategy,
    rng: &mut R,
) -> Result<Move, SearchError> {
    if board.moves().is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    if let Some(book) = book {
        let legal: Vec<BookMove> = book
            .lookup(board)
            .into_iter()
            .filter(|m| board.find_move(&m.name).is_ok())
            .collect();
        if let Some(pick) = choose_weighted(&legal, rng) {
            log::trace!("book move {} (weight {})", pick.name, pick.weight);
            return board.find_move(&pick.name).map_err(|_| SearchError::NoLegalMoves);
        }
    }

    match strategy {
        Strategy::AlphaBeta(params) => {
            let ranked = AlphaBeta::new(*params).rank(board)?;
            ranked
                .first()
                .map(|(mv, _)| *mv)
                .ok_or(SearchError::NoLegalMoves)
        }
        Strategy::Rollout(params) => {
            let ranked = Rollout::new(*params).rank(board)?;
            let pool = &ranked[..params.variety.max(1).min(ranked.len())];
            if pool.is_empty() {
                return Err(SearchError::NoLegalMoves);
            }
            Ok(pool[rng.gen_range(0..pool.len())].0)
        }
    }
}
