//! Per-square metadata flags.

/// Flags attached to a board square.
///
/// Pawn squares may carry `DOUBLE_STEP` (the pawn just advanced two ranks and
/// can be taken en passant this ply). King squares carry the castling sides
/// still available; a castling flag implies a rook of the king's color on the
/// matching outer file of the king's rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SquareMeta(u8);

impl SquareMeta {
    pub const NONE: SquareMeta = SquareMeta(0);
    pub const DOUBLE_STEP: SquareMeta = SquareMeta(1 << 0);
    pub const CASTLE_KINGSIDE: SquareMeta = SquareMeta(1 << 1);
    pub const CASTLE_QUEENSIDE: SquareMeta = SquareMeta(1 << 2);

    #[inline]
    #[must_use]
    pub const fn contains(self, flag: SquareMeta) -> bool {
        self.0 & flag.0 == flag.0 && flag.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: SquareMeta) -> Self {
        SquareMeta(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: SquareMeta) -> Self {
        SquareMeta(self.0 & !flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Castling flag for one side.
    #[inline]
    #[must_use]
    pub const fn castle(kingside: bool) -> Self {
        if kingside {
            SquareMeta::CASTLE_KINGSIDE
        } else {
            SquareMeta::CASTLE_QUEENSIDE
        }
    }
}
