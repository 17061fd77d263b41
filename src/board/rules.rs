//! Legality, game-state predicates and move application by name.

use super::error::MoveError;
use super::{Board, Move, PieceKind, Position};

impl Board {
    /// Legal moves for the side to move, in a deterministic order.
    ///
    /// Computed on first access and cached on this board value.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        self.moves.get_or_init(|| {
            let checkers = self.checkers();
            if checkers.is_empty() {
                self.generate_filtered()
            } else {
                self.evasions(&checkers)
            }
        })
    }

    /// Every pseudo-legal move that does not leave the mover in check.
    pub(crate) fn generate_filtered(&self) -> Vec<Move> {
        self.pseudo_moves()
            .into_iter()
            .filter(|mv| self.keeps_king_safe(mv))
            .collect()
    }

    /// Moves answering a check: king moves, captures of a lone checker and
    /// interpositions on its ray. With two checkers only the king may move.
    pub(crate) fn evasions(&self, checkers: &[Position]) -> Vec<Move> {
        let single = match checkers {
            [only] => Some(*only),
            _ => None,
        };
        let blocks = match (single, self.king(self.turn)) {
            (Some(checker), Some(king)) => self.ray_between(checker, king),
            _ => Vec::new(),
        };

        self.pseudo_moves()
            .into_iter()
            .filter(|mv| {
                if mv.piece.kind == PieceKind::King {
                    return !mv.is_castling();
                }
                let Some(checker) = single else { return false };
                mv.captured.is_some_and(|c| c.at == checker) || blocks.contains(&mv.to)
            })
            .filter(|mv| self.keeps_king_safe(mv))
            .collect()
    }

    /// Squares strictly between a sliding checker and the king. Empty for
    /// knights, pawns and adjacent checkers.
    fn ray_between(&self, checker: Position, king: Position) -> Vec<Position> {
        let Some(piece) = self.at(checker) else {
            return Vec::new();
        };
        if !piece.kind.is_slider() {
            return Vec::new();
        }
        let dx = (i32::from(king.x) - i32::from(checker.x)).signum();
        let dy = (i32::from(king.y) - i32::from(checker.y)).signum();
        let mut squares = Vec::new();
        let mut cur = checker;
        while let Some(next) = self.step(cur, dx, dy) {
            if next == king {
                break;
            }
            squares.push(next);
            cur = next;
        }
        squares
    }

    fn keeps_king_safe(&self, mv: &Move) -> bool {
        let next = self.make(mv);
        match next.king(self.turn) {
            Some(king) => !next.is_attacked(king, self.turn.opponent()),
            None => true,
        }
    }

    /// In check with no legal moves.
    #[must_use]
    pub fn checkmate(&self) -> bool {
        self.check() && self.moves().is_empty()
    }

    /// Not in check and no legal moves.
    #[must_use]
    pub fn stalemate(&self) -> bool {
        !self.check() && self.moves().is_empty()
    }

    /// Stalemate, insufficient material, or fifty moves without a pawn move
    /// or capture.
    #[must_use]
    pub fn draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.insufficient_material() || self.stalemate()
    }

    /// Bare kings, or bare kings plus a single knight or bishop.
    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        let mut minors = 0;
        for (_, piece) in self.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => minors += 1,
                _ => return false,
            }
        }
        minors <= 1
    }

    /// Find the legal move with the given long algebraic name.
    pub fn find_move(&self, name: &str) -> Result<Move, MoveError> {
        let (from, to, promotion) = self.parse_move_name(name)?;
        self.moves()
            .iter()
            .find(|mv| {
                mv.from == from && mv.to == to && mv.promotion.map(|p| p.kind) == promotion
            })
            .copied()
            .ok_or_else(|| MoveError::Illegal {
                name: name.to_string(),
            })
    }

    /// Play a move by name, returning the resulting position.
    ///
    /// Fails with `MoveError::Malformed` when the name is not of the form
    /// `<from><to>[nbrq]` on this board, and with `MoveError::Illegal` when
    /// no legal move matches. `self` is never modified.
    pub fn play(&self, name: &str) -> Result<Board, MoveError> {
        let mv = self.find_move(name)?;
        Ok(self.make(&mv))
    }

    /// Apply a move generated by this board.
    pub fn apply(&self, mv: &Move) -> Result<Board, MoveError> {
        if self.moves().contains(mv) {
            Ok(self.make(mv))
        } else {
            Err(MoveError::Illegal { name: mv.name() })
        }
    }

    fn parse_move_name(&self, name: &str) -> Result<(Position, Position, Option<PieceKind>), MoveError> {
        let malformed = || MoveError::Malformed {
            name: name.to_string(),
        };
        let bytes = name.as_bytes();

        // <letters><digits><letters><digits>[promotion]
        let mut cuts = Vec::with_capacity(4);
        let mut i = 0;
        for _ in 0..2 {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            cuts.push((start, i));
        }
        let rest = &name[i..];

        let mut squares = cuts.iter().map(|&(a, b)| name[a..b].parse::<Position>());
        let from = squares.next().and_then(Result::ok).ok_or_else(malformed)?;
        let to = squares.next().and_then(Result::ok).ok_or_else(malformed)?;
        if !self.contains(from) || !self.contains(to) {
            return Err(malformed());
        }

        let promotion = match rest.chars().collect::<Vec<_>>().as_slice() {
            [] => None,
            [c] => match PieceKind::from_char(*c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) && c.is_ascii_lowercase() => {
                    Some(kind)
                }
                _ => return Err(malformed()),
            },
            _ => return Err(malformed()),
        };
        Ok((from, to, promotion))
    }

    /// Count leaf positions reachable by exhaustive legal play.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        match depth {
            0 => 1,
            1 => self.moves().len() as u64,
            _ => self
                .moves()
                .iter()
                .map(|mv| self.make(mv).perft(depth - 1))
                .sum(),
        }
    }
}
