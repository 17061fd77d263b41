//! Attack detection on the authoritative board.

use super::{Board, Color, Piece, PieceKind, Position};

pub(crate) const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

impl Board {
    /// True if any piece of `by` attacks `target`.
    #[must_use]
    pub fn is_attacked(&self, target: Position, by: Color) -> bool {
        !self.scan_attackers(target, by, true).is_empty()
    }

    /// Squares of all `by` pieces attacking `target`.
    #[must_use]
    pub fn attackers(&self, target: Position, by: Color) -> Vec<Position> {
        self.scan_attackers(target, by, false)
    }

    fn scan_attackers(&self, target: Position, by: Color, first_only: bool) -> Vec<Position> {
        let mut found = Vec::new();
        let hit = |pos: Position, found: &mut Vec<Position>| {
            found.push(pos);
            first_only
        };

        let knight = Piece::new(by, PieceKind::Knight);
        for &(dx, dy) in &KNIGHT_OFFSETS {
            if let Some(pos) = self.step(target, dx, dy) {
                if self.at(pos) == Some(knight) && hit(pos, &mut found) {
                    return found;
                }
            }
        }

        let king = Piece::new(by, PieceKind::King);
        for &(dx, dy) in &KING_OFFSETS {
            if let Some(pos) = self.step(target, dx, dy) {
                if self.at(pos) == Some(king) && hit(pos, &mut found) {
                    return found;
                }
            }
        }

        // A pawn of `by` attacks diagonally forward, so it stands one rank
        // behind the target from its own point of view.
        let pawn = Piece::new(by, PieceKind::Pawn);
        for dx in [-1, 1] {
            if let Some(pos) = self.step(target, dx, -by.pawn_direction()) {
                if self.at(pos) == Some(pawn) && hit(pos, &mut found) {
                    return found;
                }
            }
        }

        for (dirs, diagonal) in [(&ROOK_DIRS, false), (&BISHOP_DIRS, true)] {
            for &(dx, dy) in dirs {
                let mut cur = target;
                while let Some(pos) = self.step(cur, dx, dy) {
                    cur = pos;
                    let Some(piece) = self.at(pos) else { continue };
                    let slides = if diagonal {
                        piece.kind.attacks_diagonally()
                    } else {
                        piece.kind.attacks_straight()
                    };
                    if piece.color == by && slides && hit(pos, &mut found) {
                        return found;
                    }
                    break;
                }
            }
        }

        found
    }

    /// Pieces of the side not to move that give check.
    #[must_use]
    pub fn checkers(&self) -> Vec<Position> {
        match self.king(self.turn) {
            Some(king) => self.attackers(king, self.turn.opponent()),
            None => Vec::new(),
        }
    }

    /// The side to move's king is attacked.
    #[must_use]
    pub fn check(&self) -> bool {
        self.king(self.turn)
            .is_some_and(|king| self.is_attacked(king, self.turn.opponent()))
    }
}
