//! Property-based tests using proptest.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::Board;

const STARTS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

fn start_strategy() -> impl Strategy<Value = usize> {
    0..STARTS.len()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

/// Every board along a seeded random playout, the root included.
fn playout(start: usize, seed: u64, plies: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut boards = vec![Board::from_fen(STARTS[start]).unwrap()];
    for _ in 0..plies {
        let Some(mv) = boards.last().unwrap().moves().choose(&mut rng).copied() else {
            break;
        };
        let next = boards.last().unwrap().apply(&mv).unwrap();
        boards.push(next);
    }
    boards
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: a position is never both checkmate and stalemate
    #[test]
    fn prop_mate_and_stalemate_exclusive(start in start_strategy(), seed in any::<u64>(), plies in move_count_strategy()) {
        for board in playout(start, seed, plies) {
            prop_assert!(!(board.checkmate() && board.stalemate()));
            prop_assert_eq!(board.checkmate() || board.stalemate(), board.moves().is_empty());
            prop_assert_eq!(board.checkmate(), board.check() && board.moves().is_empty());
        }
    }

    /// Property: the check-evasion fast path finds exactly the filtered moves
    #[test]
    fn prop_evasions_match_filtered(start in start_strategy(), seed in any::<u64>(), plies in move_count_strategy()) {
        for board in playout(start, seed, plies) {
            let checkers = board.checkers();
            if !checkers.is_empty() {
                prop_assert_eq!(board.evasions(&checkers), board.generate_filtered());
            }
            prop_assert_eq!(board.moves().to_vec(), board.generate_filtered());
        }
    }

    /// Property: FEN round-trip preserves position and hash
    #[test]
    fn prop_fen_roundtrip(start in start_strategy(), seed in any::<u64>(), plies in move_count_strategy()) {
        for board in playout(start, seed, plies) {
            let fen = board.to_fen();
            let parsed = Board::from_fen(&fen).unwrap();
            prop_assert_eq!(parsed.to_fen(), fen);
            prop_assert_eq!(parsed.hash(), board.hash());
            prop_assert!(parsed == board);
        }
    }

    /// Property: every generated move resolves by its own name
    #[test]
    fn prop_move_names_resolve(start in start_strategy(), seed in any::<u64>(), plies in move_count_strategy()) {
        for board in playout(start, seed, plies) {
            for mv in board.moves() {
                prop_assert_eq!(board.find_move(&mv.name()).unwrap(), *mv);
            }
        }
    }

    /// Property: playing never changes the board played from
    #[test]
    fn prop_play_is_pure(start in start_strategy(), seed in any::<u64>(), plies in move_count_strategy()) {
        let boards = playout(start, seed, plies);
        for pair in boards.windows(2) {
            let before = pair[0].to_fen();
            let replay = pair[0].apply(&pair[0].moves()[0]).unwrap();
            prop_assert_eq!(pair[0].to_fen(), before);
            prop_assert!(replay.turn() != pair[0].turn());
        }
    }
}
