//! Negamax with alpha-beta pruning and a capture-only quiescence search.

use super::constants::{INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::params::AlphaBetaParams;
use super::tables::{evaluate, mvv_lva};
use super::SearchError;
use crate::board::{Board, Move};
use crate::fast::{FastBoard, FastMove, Promotions};

/// Alpha-beta engine. Scores are always from the side to move's point of
/// view: positive is good for whoever is about to play.
#[derive(Clone, Debug, Default)]
pub struct AlphaBeta {
    params: AlphaBetaParams,
    nodes: u64,
}

impl AlphaBeta {
    #[must_use]
    pub fn new(params: AlphaBetaParams) -> Self {
        AlphaBeta { params, nodes: 0 }
    }

    #[must_use]
    pub fn params(&self) -> AlphaBetaParams {
        self.params
    }

    /// Nodes visited by the last call to `rank` or `search`.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score every legal root move with a full-window search, best first.
    /// Moves with equal scores keep generation order.
    pub fn rank(&mut self, board: &Board) -> Result<Vec<(Move, i32)>, SearchError> {
        if board.moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let mut fast = FastBoard::from_board(board)?;
        self.nodes = 0;

        let mut ranked = Vec::with_capacity(board.moves().len());
        for fm in fast.legal_moves(Promotions::All) {
            let mv = fm
                .to_board_move(board)
                .expect("packed move missing from the authoritative move list");
            fast.play(fm);
            let score = -self.negamax(
                &mut fast,
                self.params.depth.saturating_sub(1),
                -INFINITY,
                INFINITY,
            );
            fast.unplay();
            log::trace!("{} scores {}", mv, score);
            ranked.push((mv, score));
        }
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        if let Some((best, score)) = ranked.first() {
            let mate = if score.abs() >= MATE_THRESHOLD { " (mate)" } else { "" };
            log::debug!(
                "alpha-beta depth {} qdepth {}: best {} score {}{} after {} nodes",
                self.params.depth,
                self.params.qdepth,
                best,
                score,
                mate,
                self.nodes
            );
        }
        Ok(ranked)
    }

    /// Negamax value of `board` searched `depth` plies deep.
    pub fn search(&mut self, board: &mut FastBoard, depth: u32) -> i32 {
        self.nodes = 0;
        self.negamax(board, depth, -INFINITY, INFINITY)
    }

    fn negamax(&mut self, board: &mut FastBoard, depth: u32, mut alpha: i32, beta: i32) -> i32 {
        if depth == 0 {
            return self.quiesce(board, alpha, beta, self.params.qdepth);
        }
        self.nodes += 1;

        let moves = board.moves();
        if moves.is_empty() {
            return if board.is_check() {
                -(MATE_SCORE + depth as i32)
            } else {
                0
            };
        }

        for mv in moves {
            board.play(mv);
            let score = -self.negamax(board, depth - 1, -beta, -alpha);
            board.unplay();
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Capture-only search with stand pat. In check every evasion is
    /// searched, and having none is mate.
    fn quiesce(&mut self, board: &mut FastBoard, mut alpha: i32, beta: i32, qdepth: u32) -> i32 {
        self.nodes += 1;
        let stand_pat = evaluate(board);
        let in_check = board.is_check();

        let mut moves: Vec<FastMove> = if in_check {
            let moves = board.moves();
            if moves.is_empty() {
                return -MATE_SCORE;
            }
            moves
        } else {
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
            board.captures()
        };

        if qdepth == 0 {
            return if in_check { stand_pat } else { alpha };
        }

        moves.sort_by_cached_key(|&mv| -mvv_lva(board, mv));
        for mv in moves {
            board.play(mv);
            let score = -self.quiesce(board, -beta, -alpha, qdepth - 1);
            board.unplay();
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}
