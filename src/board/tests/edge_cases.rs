//! Special moves and unusual positions.

use crate::board::{Board, Color, Piece, PieceKind, Position, SquareMeta};

fn pos(name: &str) -> Position {
    name.parse().unwrap()
}

fn names(board: &Board) -> Vec<String> {
    let mut names: Vec<String> = board.moves().iter().map(|m| m.name()).collect();
    names.sort();
    names
}

#[test]
fn test_all_promotions_are_generated() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let promotions: Vec<String> = names(&board)
        .into_iter()
        .filter(|n| n.starts_with("a7a8"))
        .collect();
    assert_eq!(promotions, vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r"]);
    assert!(board.find_move("a7a8").is_err());
}

#[test]
fn test_underpromotion_places_chosen_piece() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let next = board.play("a7a8n").unwrap();
    assert_eq!(next.at(pos("a8")), Some(Piece::new(Color::White, PieceKind::Knight)));
    assert_eq!(next.at(pos("a7")), None);
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_capture_promotion() {
    let board = Board::from_fen("1r6/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let mv = board.find_move("a7b8r").unwrap();
    assert_eq!(mv.captured.map(|c| c.piece.kind), Some(PieceKind::Rook));
    let next = board.apply(&mv).unwrap();
    assert_eq!(next.at(pos("b8")), Some(Piece::new(Color::White, PieceKind::Rook)));
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    assert!(board.meta(pos("f5")).contains(SquareMeta::DOUBLE_STEP));
    let mv = board.find_move("e5f6").unwrap();
    assert!(mv.is_en_passant());
    assert_eq!(mv.captured.map(|c| c.at), Some(pos("f5")));
    // Only the pawn that just moved can be taken.
    assert!(board.find_move("e5d6").is_err());

    let next = board.apply(&mv).unwrap();
    assert_eq!(next.at(pos("f5")), None);
    assert_eq!(next.at(pos("f6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(next.at(pos("d5")), Some(Piece::new(Color::Black, PieceKind::Pawn)));
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let later = board.play("g1f3").unwrap().play("a7a6").unwrap();
    assert!(later.find_move("e5f6").is_err());
    assert!(later.to_fen().contains(" - 0 4"));
}

#[test]
fn test_double_step_sets_en_passant_field() {
    let board = Board::new().play("e2e4").unwrap();
    assert_eq!(
        board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_castling_moves_rook() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let short = board.play("e1g1").unwrap();
    assert_eq!(short.at(pos("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(short.at(pos("h1")), None);
    assert_eq!(short.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    let long = board.play("e1c1").unwrap();
    assert_eq!(long.at(pos("d1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(long.at(pos("a1")), None);
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    assert!(!board.check());
    assert!(board.find_move("e1g1").is_err());
    assert!(board.find_move("e1c1").is_ok());
}

#[test]
fn test_rook_arriving_on_transit_file_blocks_castling() {
    let root = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(root.find_move("e1g1").is_ok());
    assert!(root.find_move("e1c1").is_ok());

    let later = root.play("a1b1").unwrap().play("h8f8").unwrap();
    assert!(later.is_attacked(pos("f1"), Color::Black));
    assert!(!later.check());
    assert!(later.find_move("e1g1").is_err());
    assert!(later.find_move("e1c1").is_err());
}

#[test]
fn test_king_is_never_captured() {
    // Black to move is legal; handing the move to White leaves a king en prise.
    let board = Board::from_fen("4k2R/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    let forced = board.with_turn(Color::White);
    assert!(forced.find_move("h8e8").is_err());
    assert!(forced.moves().iter().all(|m| m.captured.is_none()));
    for mv in forced.moves() {
        let next = forced.apply(mv).unwrap();
        assert!(next.king(Color::Black).is_some());
    }
}

#[test]
fn test_cannot_castle_out_of_check() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").unwrap();
    assert!(board.check());
    assert!(board.moves().iter().all(|m| !m.is_castling()));
}

#[test]
fn test_king_move_revokes_both_castling_sides() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = board.play("e1e2").unwrap().play("e8e7").unwrap();
    assert!(next.to_fen().contains(" w - - "));
}

#[test]
fn test_double_check_allows_only_king_moves() {
    let board = Board::from_fen("7k/8/8/8/Qb6/8/8/r3K3 w - - 0 1").unwrap();
    assert_eq!(board.checkers().len(), 2);
    assert_eq!(names(&board), vec!["e1e2", "e1f2"]);
}

#[test]
fn test_evasions_agree_with_filtered_generation() {
    let fens = [
        "7k/8/8/8/Qb6/8/8/r3K3 w - - 0 1",
        "4k3/8/8/8/1b6/8/8/1N2K2R w K - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/5PPq/8/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
        "4k3/8/8/8/8/5n2/8/4K3 w - - 0 1",
    ];
    for fen in fens {
        let board = Board::from_fen(fen).unwrap();
        let checkers = board.checkers();
        assert!(!checkers.is_empty(), "{fen}");
        assert_eq!(board.evasions(&checkers), board.generate_filtered(), "{fen}");
    }
}

#[test]
fn test_en_passant_can_capture_checking_pawn() {
    let board = Board::from_fen("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
    assert!(board.check());
    let mv = board.find_move("e4d3").unwrap();
    assert!(mv.is_en_passant());
}

#[test]
fn test_wide_board_names() {
    let board = Board::from_fen("k9/10/10/K8R w - -").unwrap();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 4);
    let next = board.play("j1j3").unwrap();
    assert_eq!(next.at(pos("j3")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(next.to_fen(), "k9/9R/10/K9 b - - 1 1");
    assert!(board.play("k1k2").is_err());
}

#[test]
fn test_tall_board_pawn_ranks() {
    let board = Board::from_fen("3k/P3/4/4/4/4/4/4/2P1/K3 w - - 0 1").unwrap();
    assert_eq!(board.height(), 10);
    let moves = names(&board);
    assert!(moves.contains(&"a9a10q".to_string()));
    assert!(moves.contains(&"c2c4".to_string()));
    assert!(!moves.iter().any(|n| n.starts_with("c2") && n.len() > 4));
}
