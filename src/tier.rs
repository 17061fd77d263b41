//! The shared interface of the three board representations.
//!
//! [`Line`] walks the authoritative [`Board`] by keeping every position of
//! the current line on a stack; [`FastBoard`] and [`BitBoard`] mutate in
//! place and keep an undo log. All three answer the same questions, so
//! perft can check them against one another.

use crate::bitboard::{BitBoard, BitMove};
use crate::board::{Board, Color, Move};
use crate::fast::{FastBoard, FastMove, Promotions};

/// A board that can enumerate legal moves and play/unplay them in LIFO order.
pub trait Tier {
    type Move: Copy;

    /// Fully legal moves, with all four promotion pieces.
    fn legal_moves(&mut self) -> Vec<Self::Move>;

    fn play(&mut self, mv: Self::Move);

    /// Revert the most recent `play`. Panics when nothing was played.
    fn unplay(&mut self);

    fn turn(&self) -> Color;

    fn is_check(&self) -> bool;

    /// Material balance in pawns from `color`'s side.
    fn score(&self, color: Color) -> i32;

    /// Long algebraic name of `mv`.
    fn move_name(&self, mv: Self::Move) -> String;

    /// Leaf count of exhaustive legal play to `depth`.
    fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            self.play(mv);
            nodes += self.perft(depth - 1);
            self.unplay();
        }
        nodes
    }

    /// Leaf counts below each root move, keyed by move name.
    fn divide(&mut self, depth: usize) -> Vec<(String, u64)> {
        let mut out = Vec::new();
        for mv in self.legal_moves() {
            let name = self.move_name(mv);
            self.play(mv);
            out.push((name, self.perft(depth.saturating_sub(1))));
            self.unplay();
        }
        out.sort();
        out
    }
}

/// The authoritative board driven as a tier: each `play` pushes the
/// resulting immutable position.
#[derive(Clone, Debug)]
pub struct Line {
    boards: Vec<Board>,
}

impl Line {
    #[must_use]
    pub fn new(root: Board) -> Self {
        Line { boards: vec![root] }
    }

    /// The position at the end of the line.
    #[must_use]
    pub fn current(&self) -> &Board {
        self.boards.last().expect("a line always holds its root")
    }

    /// Number of moves played since the root.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.boards.len() - 1
    }
}

impl Tier for Line {
    type Move = Move;

    fn legal_moves(&mut self) -> Vec<Move> {
        self.current().moves().to_vec()
    }

    fn play(&mut self, mv: Move) {
        let next = self.current().make(&mv);
        self.boards.push(next);
    }

    fn unplay(&mut self) {
        assert!(self.boards.len() > 1, "unplay without a matching play");
        self.boards.pop();
    }

    fn turn(&self) -> Color {
        self.current().turn()
    }

    fn is_check(&self) -> bool {
        self.current().check()
    }

    fn score(&self, color: Color) -> i32 {
        self.current().score(color)
    }

    fn move_name(&self, mv: Move) -> String {
        mv.name()
    }
}

impl Tier for FastBoard {
    type Move = FastMove;

    fn legal_moves(&mut self) -> Vec<FastMove> {
        FastBoard::legal_moves(self, Promotions::All)
    }

    fn play(&mut self, mv: FastMove) {
        FastBoard::play(self, mv);
    }

    fn unplay(&mut self) {
        FastBoard::unplay(self);
    }

    fn turn(&self) -> Color {
        FastBoard::turn(self)
    }

    fn is_check(&self) -> bool {
        FastBoard::is_check(self)
    }

    fn score(&self, color: Color) -> i32 {
        FastBoard::score(self, color)
    }

    fn move_name(&self, mv: FastMove) -> String {
        mv.name()
    }
}

impl Tier for BitBoard {
    type Move = BitMove;

    fn legal_moves(&mut self) -> Vec<BitMove> {
        BitBoard::legal_moves(self)
    }

    fn play(&mut self, mv: BitMove) {
        BitBoard::play(self, mv);
    }

    fn unplay(&mut self) {
        BitBoard::unplay(self);
    }

    fn turn(&self) -> Color {
        BitBoard::turn(self)
    }

    fn is_check(&self) -> bool {
        BitBoard::is_check(self)
    }

    fn score(&self, color: Color) -> i32 {
        BitBoard::score(self, color)
    }

    fn move_name(&self, mv: BitMove) -> String {
        mv.name()
    }
}
