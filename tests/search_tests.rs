//! Search tests to verify the engines find correct moves in various positions.

use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_tiers::search::{AlphaBetaParams, RolloutParams, MATE_THRESHOLD};
use chess_tiers::{select_move, AlphaBeta, Board, MemoryBook, OpeningBook, Rollout, SearchError, Strategy};

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let best = select_move(&board, None, &Strategy::default(), &mut rng).unwrap();
    assert_eq!(best.name(), "e1e8", "Should find Qe8# (back rank mate)");
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    let board =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4")
            .unwrap();
    let ranked = AlphaBeta::default().rank(&board).unwrap();
    assert_eq!(ranked[0].0.name(), "h5f7", "Should find Qxf7# (scholar's mate)");
    assert!(ranked[0].1 >= MATE_THRESHOLD);
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    // f7 is defended by the king, so Qxf7+ loses the queen for a pawn.
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3")
            .unwrap();
    let ranked = AlphaBeta::new(AlphaBetaParams { depth: 2, qdepth: 4 })
        .rank(&board)
        .unwrap();
    let best = ranked[0].0;
    assert_ne!(best.to.name(), "f7", "Qxf7+ drops the queen to the king");
}

/// Test that the engine captures free material
#[test]
fn captures_free_piece() {
    let board = Board::from_fen("4k3/8/8/3r4/8/8/8/3QK3 w - - 0 1").unwrap();
    let best = select_move(
        &board,
        None,
        &Strategy::AlphaBeta(AlphaBetaParams { depth: 2, qdepth: 4 }),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(best.name(), "d1d5");
}

/// Test that both engines refuse finished games
#[test]
fn no_move_in_finished_game() {
    let mate = Board::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    for strategy in [
        Strategy::default(),
        Strategy::Rollout(RolloutParams::default()),
    ] {
        assert_eq!(
            select_move(&mate, None, &strategy, &mut rng),
            Err(SearchError::NoLegalMoves)
        );
    }
}

/// Test that the rollout engine sees a mate as a certain win
#[test]
fn rollout_scores_mate_as_infinite() {
    let board = Board::from_fen("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
    let ranked = Rollout::new(RolloutParams::default()).rank(&board).unwrap();
    let mate = ranked.iter().find(|(m, _)| m.name() == "h1h8").unwrap();
    assert_eq!(mate.1, f64::INFINITY);
    assert_eq!(ranked[0].1, f64::INFINITY);
}

/// Test that a loaded book drives the opening
#[test]
fn book_move_is_played_from_start() {
    let book = MemoryBook::from_lines("e2e4 e7e5 3\nd2d4 d7d5 1\n").unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let start = Board::new();
    for _ in 0..8 {
        let mv = select_move(&start, Some(&book as &dyn OpeningBook), &Strategy::default(), &mut rng)
            .unwrap();
        assert!(mv.name() == "e2e4" || mv.name() == "d2d4");
    }

    let after = start.play("e2e4").unwrap();
    let reply = select_move(&after, Some(&book as &dyn OpeningBook), &Strategy::default(), &mut rng)
        .unwrap();
    assert_eq!(reply.name(), "e7e5");
}

/// Test that engine output does not depend on the caller's board state
#[test]
fn ranking_is_reproducible() {
    let board =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    let a = AlphaBeta::new(AlphaBetaParams { depth: 2, qdepth: 2 }).rank(&board).unwrap();
    let b = AlphaBeta::new(AlphaBetaParams { depth: 2, qdepth: 2 }).rank(&board).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), board.moves().len());
}

#[cfg(feature = "serde")]
#[test]
fn strategy_round_trips_through_json() {
    let strategy = Strategy::Rollout(RolloutParams {
        depth: 4,
        seed: 99,
        ..RolloutParams::default()
    });
    let json = serde_json::to_string(&strategy).unwrap();
    let back: Strategy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, strategy);
}
