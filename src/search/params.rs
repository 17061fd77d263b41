#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alpha-beta search limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlphaBetaParams {
    /// Full-width plies below the root move
    pub depth: u32,
    /// Capture-only plies once `depth` runs out
    pub qdepth: u32,
}

impl Default for AlphaBetaParams {
    fn default() -> Self {
        AlphaBetaParams { depth: 3, qdepth: 4 }
    }
}

/// Stochastic rollout limits.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RolloutParams {
    /// Plies sampled below the root move
    pub depth: u32,
    /// Beam width at the first sampled ply; shrinks linearly with depth
    pub spread: f64,
    /// Upper bound of the uniform noise added to each candidate's material
    pub jitter: f64,
    pub seed: u64,
    /// How many top-ranked moves `select_move` picks among
    pub variety: usize,
}

impl Default for RolloutParams {
    fn default() -> Self {
        RolloutParams {
            depth: 3,
            spread: 6.0,
            jitter: 0.5,
            seed: 0,
            variety: 1,
        }
    }
}

/// Engine used by [`select_move`](super::select_move) when the book has no
/// answer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    AlphaBeta(AlphaBetaParams),
    Rollout(RolloutParams),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AlphaBeta(AlphaBetaParams::default())
    }
}
