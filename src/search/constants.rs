//! Search constants.

/// Base score of a checkmate. The mated side gets `-(MATE_SCORE + depth)`
/// so that nearer mates score further from zero.
pub const MATE_SCORE: i32 = 100_000;

/// Scores at or beyond this magnitude are mate scores.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Window bound, larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;

/// Scale of the rollout bias: `RECIPROCAL_SCALE / (1 - p) - RECIPROCAL_SCALE`.
pub const RECIPROCAL_SCALE: f64 = 15.0;
