//! Randomised beam rollouts.
//!
//! Below each root move the tree is sampled to a fixed depth. At every ply
//! the legal moves are scored by material plus a little uniform noise and
//! only the best few are followed; the beam narrows linearly with depth.
//! Leaves report material from the root mover's side; nodes without moves
//! report a win, loss or draw. Outcome fractions are averaged over the
//! children actually followed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::constants::RECIPROCAL_SCALE;
use super::params::RolloutParams;
use super::SearchError;
use crate::board::{Board, Color, Move};
use crate::fast::{FastBoard, FastMove, Promotions};

/// Outcome accumulator for one sampled subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tally {
    /// Sum of leaf material, root mover's side
    pub total: f64,
    /// Number of material leaves under this node
    pub samples: f64,
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
}

impl Tally {
    fn leaf(material: i32) -> Self {
        Tally {
            total: f64::from(material),
            samples: 1.0,
            ..Tally::default()
        }
    }

    /// Mean leaf material; NaN when no leaf was reached.
    #[must_use]
    pub fn average(&self) -> f64 {
        self.total / self.samples
    }

    /// Reward for winning lines, penalty for losing and drawn ones.
    #[must_use]
    pub fn bias(&self) -> f64 {
        reciprocal(self.win) - reciprocal(self.loss) - reciprocal(self.draw)
    }

    /// Average material plus bias. When no leaf was reached the bias alone
    /// decides: positive is `+inf`, negative `-inf`, zero is `0`.
    #[must_use]
    pub fn combined(&self) -> f64 {
        let average = self.average();
        let bias = self.bias();
        if average.is_nan() {
            if bias > 0.0 {
                f64::INFINITY
            } else if bias < 0.0 {
                f64::NEG_INFINITY
            } else {
                0.0
            }
        } else {
            average + bias
        }
    }
}

/// `15 / (1 - p) - 15`: zero at `p = 0`, unbounded as `p` approaches 1.
fn reciprocal(p: f64) -> f64 {
    RECIPROCAL_SCALE / (1.0 - p) - RECIPROCAL_SCALE
}

/// Stochastic rollout engine. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct Rollout {
    params: RolloutParams,
    rng: StdRng,
}

impl Rollout {
    #[must_use]
    pub fn new(params: RolloutParams) -> Self {
        Rollout {
            params,
            rng: StdRng::seed_from_u64(params.seed),
        }
    }

    #[must_use]
    pub fn params(&self) -> RolloutParams {
        self.params
    }

    /// Every legal root move with its combined score, best first.
    pub fn rank(&mut self, board: &Board) -> Result<Vec<(Move, f64)>, SearchError> {
        Ok(self
            .tallies(board)?
            .into_iter()
            .map(|(mv, tally)| (mv, tally.combined()))
            .collect())
    }

    /// Every legal root move with its raw tally, best combined score first.
    pub fn tallies(&mut self, board: &Board) -> Result<Vec<(Move, Tally)>, SearchError> {
        if board.moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let mut fast = FastBoard::from_board(board)?;
        let root = board.turn();

        let mut ranked = Vec::with_capacity(board.moves().len());
        for fm in fast.legal_moves(Promotions::All) {
            let mv = fm
                .to_board_move(board)
                .expect("packed move missing from the authoritative move list");
            fast.play(fm);
            let tally = self.sample(&mut fast, 1, root);
            fast.unplay();
            log::trace!(
                "{}: avg {:.2} win {:.3} loss {:.3} draw {:.3}",
                mv,
                tally.average(),
                tally.win,
                tally.loss,
                tally.draw
            );
            ranked.push((mv, tally));
        }
        ranked.sort_by(|a, b| b.1.combined().total_cmp(&a.1.combined()));

        if let Some((best, tally)) = ranked.first() {
            log::debug!(
                "rollout depth {} spread {}: best {} score {:.2}",
                self.params.depth,
                self.params.spread,
                best,
                tally.combined()
            );
        }
        Ok(ranked)
    }

    /// Beam width at ply `i`: `ceil(spread * (depth - i) / depth)`, at least 1.
    pub(super) fn beam(&self, i: u32) -> usize {
        let depth = f64::from(self.params.depth.max(1));
        let remaining = f64::from(self.params.depth.saturating_sub(i));
        ((self.params.spread * remaining / depth).ceil() as usize).max(1)
    }

    fn sample(&mut self, board: &mut FastBoard, i: u32, root: Color) -> Tally {
        // Game ends are classified even at the depth limit.
        let moves = board.moves();
        if moves.is_empty() {
            let mut tally = Tally::default();
            if !board.is_check() {
                tally.draw = 1.0;
            } else if board.turn() == root {
                tally.loss = 1.0;
            } else {
                tally.win = 1.0;
            }
            return tally;
        }
        if i >= self.params.depth {
            return Tally::leaf(board.score(root));
        }

        let mover = board.turn();
        let jitter = self.params.jitter;
        let mut scored: Vec<(f64, FastMove)> = moves
            .into_iter()
            .map(|mv| {
                board.play(mv);
                let material = f64::from(board.score(mover));
                board.unplay();
                (material + jitter * self.rng.gen::<f64>(), mv)
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(self.beam(i));

        let kept = scored.len() as f64;
        let mut tally = Tally::default();
        for (_, mv) in scored {
            board.play(mv);
            let child = self.sample(board, i + 1, root);
            board.unplay();
            tally.total += child.total;
            tally.samples += child.samples;
            tally.win += child.win;
            tally.loss += child.loss;
            tally.draw += child.draw;
        }
        tally.win /= kept;
        tally.loss /= kept;
        tally.draw /= kept;
        tally
    }
}
