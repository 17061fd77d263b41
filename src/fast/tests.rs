use rand::prelude::*;

use super::{FastBoard, Promotions};
use crate::board::{Board, BoardError, Color};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
];

type Snapshot = ([u8; 64], [u8; 2], Color, u8, Option<u8>);

fn snapshot(board: &FastBoard) -> Snapshot {
    (
        *board.cells(),
        [
            board.king_square(Color::White),
            board.king_square(Color::Black),
        ],
        board.turn(),
        board.castling_bits(),
        board.en_passant(),
    )
}

#[test]
fn test_play_unplay_restores_every_move() {
    for fen in POSITIONS {
        let mut fast = FastBoard::from_board(&Board::from_fen(fen).unwrap()).unwrap();
        let before = snapshot(&fast);
        for mv in fast.legal_moves(Promotions::All) {
            fast.play(mv);
            assert_ne!(fast.turn(), before.2);
            fast.unplay();
            assert_eq!(snapshot(&fast), before, "{fen}: {mv}");
        }
    }
}

#[test]
fn test_nested_random_playout_unwinds() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut fast = FastBoard::from_board(&Board::new()).unwrap();
    let start = snapshot(&fast);
    let mut trail = Vec::new();

    for _ in 0..120 {
        let moves = fast.legal_moves(Promotions::All);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        trail.push(snapshot(&fast));
        fast.play(mv);
    }

    while let Some(expected) = trail.pop() {
        fast.unplay();
        assert_eq!(snapshot(&fast), expected);
    }
    assert_eq!(snapshot(&fast), start);
    assert_eq!(fast.ply(), 0);
}

#[test]
fn test_moves_match_authoritative_names() {
    for fen in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        let mut fast = FastBoard::from_board(&board).unwrap();
        let mut fast_names: Vec<String> = fast
            .legal_moves(Promotions::All)
            .iter()
            .map(|m| m.name())
            .collect();
        let mut names: Vec<String> = board.moves().iter().map(|m| m.name()).collect();
        fast_names.sort();
        names.sort();
        assert_eq!(fast_names, names, "{fen}");
        assert_eq!(fast.is_check(), board.check());
        assert_eq!(fast.score(Color::White), board.score(Color::White));
    }
}

#[test]
fn test_queen_only_promotions() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let mut fast = FastBoard::from_board(&board).unwrap();
    let promos = |moves: Vec<super::FastMove>| moves.iter().filter(|m| m.promotion.is_some()).count();
    assert_eq!(promos(fast.moves()), 1);
    assert_eq!(promos(fast.legal_moves(Promotions::All)), 4);
}

#[test]
fn test_captures_only_returns_captures() {
    let board = Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
        .unwrap();
    let mut fast = FastBoard::from_board(&board).unwrap();
    let captures = fast.captures();
    assert!(captures.iter().all(|m| m.is_capture()));
    assert!(captures.iter().any(|m| m.is_en_passant() && m.name() == "e5f6"));
}

#[test]
fn test_resolves_to_board_moves() {
    let board = Board::new();
    let mut fast = FastBoard::from_board(&board).unwrap();
    for mv in fast.moves() {
        let resolved = mv.to_board_move(&board).expect("every fast move exists on the board");
        assert_eq!(resolved.name(), mv.name());
    }
}

#[test]
fn test_rejects_unsupported_boards() {
    let wide = Board::from_fen("k9/10/10/K9 w - -").unwrap();
    assert!(matches!(
        FastBoard::from_board(&wide),
        Err(BoardError::UnsupportedGeometry { width: 10, height: 4 })
    ));

    let kingless = Board::new()
        .delete("e8".parse().unwrap())
        .unwrap();
    assert_eq!(
        FastBoard::from_board(&kingless).unwrap_err(),
        BoardError::MissingKing {
            color: Color::Black
        }
    );

    let odd_castle = Board::from_fen("1k5r/8/8/8/8/8/8/4K3 w k -").unwrap();
    assert!(matches!(
        FastBoard::from_board(&odd_castle),
        Err(BoardError::UnsupportedCastling { color: Color::Black })
    ));
}

#[test]
#[should_panic(expected = "unplay without a matching play")]
fn test_unplay_without_play_panics() {
    let mut fast = FastBoard::from_board(&Board::new()).unwrap();
    fast.unplay();
}
