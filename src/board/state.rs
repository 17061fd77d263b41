use once_cell::sync::OnceCell;

use super::error::PositionError;
use super::{BoardError, Color, Move, Piece, PieceKind, Position, SquareMeta};

/// Largest supported width or height.
pub const MAX_DIMENSION: u8 = 16;

/// Immutable chess position.
///
/// Every operation that changes the position (`put`, `delete`, `play`,
/// `apply`) returns a new `Board`; the original stays valid. The legal move
/// list is computed on first use and cached for the lifetime of the value,
/// so a board can be shared by reference across threads.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) turn: Color,
    pub(crate) squares: Vec<Option<Piece>>,
    pub(crate) meta: Vec<SquareMeta>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) moves: OnceCell<Vec<Move>>,
}

impl Board {
    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::blank(8, 8, Color::White);
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (x, kind) in back_rank.iter().enumerate() {
            let x = x as u8;
            board.set(Position::new(x, 0), Some(Piece::new(Color::White, *kind)));
            board.set(Position::new(x, 7), Some(Piece::new(Color::Black, *kind)));
            board.set(Position::new(x, 1), Some(Piece::new(Color::White, PieceKind::Pawn)));
            board.set(Position::new(x, 6), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        let both = SquareMeta::CASTLE_KINGSIDE.with(SquareMeta::CASTLE_QUEENSIDE);
        board.set_meta(Position::new(4, 0), both);
        board.set_meta(Position::new(4, 7), both);
        board
    }

    /// An empty board of the given size with White to move.
    pub fn empty(width: u8, height: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(BoardError::UnsupportedGeometry { width, height });
        }
        Ok(Board::blank(width, height, Color::White))
    }

    pub(crate) fn blank(width: u8, height: u8, turn: Color) -> Self {
        let cells = usize::from(width) * usize::from(height);
        Board {
            width,
            height,
            turn,
            squares: vec![None; cells],
            meta: vec![SquareMeta::NONE; cells],
            halfmove_clock: 0,
            fullmove_number: 1,
            moves: OnceCell::new(),
        }
    }

    /// Copy of the position without the cached move list.
    pub(crate) fn fresh(&self) -> Self {
        Board {
            width: self.width,
            height: self.height,
            turn: self.turn,
            squares: self.squares.clone(),
            meta: self.meta.clone(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moves: OnceCell::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Side to move.
    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Piece on a square, `None` when empty or off the board.
    #[inline]
    #[must_use]
    pub fn at(&self, pos: Position) -> Option<Piece> {
        if self.contains(pos) {
            self.squares[pos.index(self.width)]
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn meta(&self, pos: Position) -> SquareMeta {
        if self.contains(pos) {
            self.meta[pos.index(self.width)]
        } else {
            SquareMeta::NONE
        }
    }

    /// New board with `piece` placed on `pos`. Any flags on the square are
    /// dropped.
    pub fn put(&self, pos: Position, piece: Piece) -> Result<Board, PositionError> {
        self.check_on_board(pos)?;
        let mut next = self.fresh();
        next.revoke_flags_at(pos);
        next.set(pos, Some(piece));
        next.set_meta(pos, SquareMeta::NONE);
        Ok(next)
    }

    /// New board with `pos` emptied.
    pub fn delete(&self, pos: Position) -> Result<Board, PositionError> {
        self.check_on_board(pos)?;
        let mut next = self.fresh();
        next.revoke_flags_at(pos);
        next.set(pos, None);
        next.set_meta(pos, SquareMeta::NONE);
        Ok(next)
    }

    /// New board with a different side to move. En passant flags are
    /// cleared since they only make sense for the side that did not just
    /// double-step.
    ///
    /// Like `put` and `delete` this does not check legality: handing the
    /// move to a side whose opponent is in check yields a position where
    /// the king is attacked but can never be captured, since generated moves
    /// never take a king.
    #[must_use]
    pub fn with_turn(&self, turn: Color) -> Board {
        let mut next = self.fresh();
        next.turn = turn;
        next.clear_double_steps();
        next
    }

    /// All pieces with their squares, rank by rank from a1.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        let width = self.width;
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.map(|p| (Position::from_index(idx, width), p)))
    }

    #[must_use]
    pub fn king(&self, color: Color) -> Option<Position> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(pos, _)| pos)
    }

    /// Material balance in pawns (1, 3, 3, 5, 9), positive when White is
    /// ahead; negated when asked from Black's side.
    #[must_use]
    pub fn score(&self, color: Color) -> i32 {
        let white: i32 = self.pieces().map(|(_, p)| p.signed_value()).sum();
        white * color.sign()
    }

    pub(crate) fn check_on_board(&self, pos: Position) -> Result<(), PositionError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(PositionError::OffBoard {
                notation: pos.name(),
            })
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        let idx = pos.index(self.width);
        self.squares[idx] = piece;
    }

    #[inline]
    pub(crate) fn set_meta(&mut self, pos: Position, meta: SquareMeta) {
        let idx = pos.index(self.width);
        self.meta[idx] = meta;
    }

    #[inline]
    pub(crate) fn step(&self, pos: Position, dx: i32, dy: i32) -> Option<Position> {
        pos.offset(dx, dy, self.width, self.height)
    }

    pub(crate) fn clear_double_steps(&mut self) {
        for m in &mut self.meta {
            *m = m.without(SquareMeta::DOUBLE_STEP);
        }
    }

    /// Home rank of `color`'s pawns.
    #[inline]
    pub(crate) fn pawn_home_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => 1,
            Color::Black => self.height.saturating_sub(2),
        }
    }

    /// Rank on which `color`'s pawns promote.
    #[inline]
    pub(crate) fn promotion_rank(&self, color: Color) -> u8 {
        match color {
            Color::White => self.height - 1,
            Color::Black => 0,
        }
    }

    /// Clear the castling flag that depends on a rook standing on `corner`.
    pub(crate) fn revoke_castle(&mut self, color: Color, corner: Position) {
        let kingside = if corner.x == self.width - 1 {
            true
        } else if corner.x == 0 {
            false
        } else {
            return;
        };
        if let Some(king) = self.king(color) {
            if king.y == corner.y {
                let meta = self.meta(king).without(SquareMeta::castle(kingside));
                self.set_meta(king, meta);
            }
        }
    }

    /// Keep castling flags consistent when the piece on `pos` goes away.
    fn revoke_flags_at(&mut self, pos: Position) {
        if let Some(piece) = self.at(pos) {
            if piece.kind == PieceKind::Rook {
                self.revoke_castle(piece.color, pos);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.turn == other.turn
            && self.squares == other.squares
            && self.meta == other.meta
            && self.halfmove_clock == other.halfmove_clock
    }
}

impl Eq for Board {}
