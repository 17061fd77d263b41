//! Benchmarks for the board tiers and the search engines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_tiers::search::{evaluate, AlphaBetaParams, RolloutParams};
use chess_tiers::{AlphaBeta, BitBoard, Board, FastBoard, Line, Rollout, Tier};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    for (name, fen) in [("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), ("kiwipete", KIWIPETE)] {
        let board = Board::from_fen(fen).unwrap();
        let depth = 3;

        group.bench_with_input(BenchmarkId::new("line", name), &board, |b, board| {
            b.iter(|| Line::new(board.clone()).perft(black_box(depth)))
        });

        let mut fast = FastBoard::from_board(&board).unwrap();
        group.bench_function(BenchmarkId::new("fast", name), |b| {
            b.iter(|| fast.perft(black_box(depth)))
        });

        let mut bits = BitBoard::from_board(&board).unwrap();
        group.bench_function(BenchmarkId::new("bitboard", name), |b| {
            b.iter(|| bits.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let board = Board::from_fen(KIWIPETE).unwrap();
    group.bench_function("board", |b| {
        // A fresh board each time, since the move list is cached per value.
        b.iter(|| black_box(board.clone().moves().len()))
    });

    let mut fast = FastBoard::from_board(&board).unwrap();
    group.bench_function("fast", |b| b.iter(|| black_box(Tier::legal_moves(&mut fast))));

    let mut bits = BitBoard::from_board(&board).unwrap();
    group.bench_function("bitboard", |b| b.iter(|| black_box(Tier::legal_moves(&mut bits))));

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    let board = Board::from_fen(MIDDLEGAME).unwrap();
    for depth in [2, 3] {
        group.bench_with_input(BenchmarkId::new("alphabeta", depth), &depth, |b, &depth| {
            b.iter(|| AlphaBeta::new(AlphaBetaParams { depth, qdepth: 4 }).rank(&board))
        });
    }
    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("rollout", depth), &depth, |b, &depth| {
            b.iter(|| {
                Rollout::new(RolloutParams {
                    depth,
                    ..RolloutParams::default()
                })
                .rank(&board)
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("middlegame", MIDDLEGAME),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let fast = FastBoard::from_board(&Board::from_fen(fen).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &fast, |b, fast| {
            b.iter(|| black_box(evaluate(fast)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
