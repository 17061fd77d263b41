use super::error::FenError;
use super::state::MAX_DIMENSION;
use super::{Board, Color, Piece, PieceKind, Position, SquareMeta};

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// Ranks may be of any width up to 16 (multi-digit empty runs are
    /// accepted), and the half-move and full-move fields are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let rows = parse_placement(parts[0])?;
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || width > MAX_DIMENSION as usize || height > MAX_DIMENSION as usize {
            return Err(FenError::UnsupportedSize { width, height });
        }
        for (rank, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(FenError::RaggedRank {
                    rank: height - rank,
                    files: row.len(),
                    expected: width,
                });
            }
        }

        let turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut board = Board::blank(width as u8, height as u8, turn);
        for (i, row) in rows.iter().enumerate() {
            let y = (height - 1 - i) as u8;
            for (x, cell) in row.iter().enumerate() {
                board.set(Position::new(x as u8, y), *cell);
            }
        }

        for color in Color::BOTH {
            let found = board
                .pieces()
                .filter(|(_, p)| *p == Piece::new(color, PieceKind::King))
                .count();
            if found != 1 {
                return Err(FenError::KingCount { color, found });
            }
        }

        let idle = turn.opponent();
        if board.king(idle).is_some_and(|king| board.is_attacked(king, turn)) {
            return Err(FenError::OpponentInCheck { color: idle });
        }

        for c in parts[2].chars() {
            let (color, kingside) = match c {
                'K' => (Color::White, true),
                'Q' => (Color::White, false),
                'k' => (Color::Black, true),
                'q' => (Color::Black, false),
                '-' => continue,
                _ => return Err(FenError::InvalidCastling { char: c }),
            };
            board.grant_castle(color, kingside).ok_or(FenError::InvalidCastling { char: c })?;
        }

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let target: Position = parts[3].parse().map_err(|_| invalid())?;
            let mover = turn.opponent();
            let pawn_at = board
                .step(target, 0, mover.pawn_direction())
                .ok_or_else(invalid)?;
            if !board.contains(target)
                || board.at(pawn_at) != Some(Piece::new(mover, PieceKind::Pawn))
            {
                return Err(invalid());
            }
            board.set_meta(pawn_at, board.meta(pawn_at).with(SquareMeta::DOUBLE_STEP));
        }

        if let Some(field) = parts.get(4) {
            board.halfmove_clock = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }

        Ok(board)
    }

    /// Set a castling flag on `color`'s king if the matching rook is in place.
    fn grant_castle(&mut self, color: Color, kingside: bool) -> Option<()> {
        let king = self.king(color)?;
        let rook_x = if kingside { self.width - 1 } else { 0 };
        let rook = Position::new(rook_x, king.y);
        if rook == king || self.at(rook) != Some(Piece::new(color, PieceKind::Rook)) {
            return None;
        }
        if (kingside && king.x >= rook_x) || (!kingside && king.x == 0) {
            return None;
        }
        let meta = self.meta(king).with(SquareMeta::castle(kingside));
        self.set_meta(king, meta);
        Some(())
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(self.height as usize);
        for y in (0..self.height).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for x in 0..self.width {
                if let Some(piece) = self.at(Position::new(x, y)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.turn == Color::White { "w" } else { "b" };

        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if let Some(king) = self.king(color) {
                if self.meta(king).contains(SquareMeta::castle(kingside)) {
                    castling.push(c);
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .pieces()
            .find(|&(pos, _)| self.meta(pos).contains(SquareMeta::DOUBLE_STEP))
            .and_then(|(pos, pawn)| self.step(pos, 0, -pawn.color.pawn_direction()))
            .map_or_else(|| "-".to_string(), |p| p.name());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

/// Split the placement field into rows (top rank first).
fn parse_placement(placement: &str) -> Result<Vec<Vec<Option<Piece>>>, FenError> {
    let mut rows = Vec::new();
    for rank_str in placement.split('/') {
        let mut row = Vec::new();
        let mut run = 0usize;
        for c in rank_str.chars() {
            if let Some(d) = c.to_digit(10) {
                run = run * 10 + d as usize;
                if run > MAX_DIMENSION as usize {
                    return Err(FenError::UnsupportedSize {
                        width: run,
                        height: 0,
                    });
                }
                continue;
            }
            row.extend(std::iter::repeat(None).take(run));
            run = 0;
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            row.push(Some(piece));
        }
        row.extend(std::iter::repeat(None).take(run));
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_start_position_round_trip() {
        let board = Board::from_fen(START).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.to_fen(), START);
    }

    #[test]
    fn test_four_field_fen() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn test_en_passant_field_flags_pawn() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let board = Board::from_fen(fen).unwrap();
        assert!(board
            .meta(Position::new(5, 4))
            .contains(SquareMeta::DOUBLE_STEP));
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn test_wide_board() {
        let board = Board::from_fen("k9/10/10/K9 w - -").unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 4);
        assert!(board.to_fen().starts_with("k9/10/10/K9 w"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            Board::from_fen("8/8 w"),
            Err(FenError::TooFewParts { found: 2 })
        );
        assert!(matches!(
            Board::from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/K7 w - -"),
            Err(FenError::KingCount { color: Color::Black, found: 0 })
        ));
        assert_eq!(
            Board::from_fen("4k2R/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::OpponentInCheck { color: Color::Black })
        );
        assert!(Board::from_fen("4k2R/8/8/8/8/8/8/4K3 b - - 0 1").is_ok());
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K -"),
            Err(FenError::InvalidCastling { char: 'K' })
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - e3"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/7/8/8/4K3 w - -"),
            Err(FenError::RaggedRank { .. })
        ));
    }
}
