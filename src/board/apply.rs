use super::{Board, Color, Move, PieceKind, SquareMeta};

impl Board {
    /// Position after `mv`, without checking that `mv` is legal here.
    pub(crate) fn make(&self, mv: &Move) -> Board {
        debug_assert!(
            !mv.captured.is_some_and(|c| c.piece.kind == PieceKind::King),
            "move {mv} captures a king"
        );
        let mut next = self.fresh();
        let color = mv.piece.color;

        // Only the pawn that moves now may be taken en passant next ply.
        next.clear_double_steps();

        if let Some(capture) = mv.captured {
            next.set(capture.at, None);
            next.set_meta(capture.at, SquareMeta::NONE);
            if capture.piece.kind == PieceKind::Rook {
                next.revoke_castle(capture.piece.color, capture.at);
            }
        }

        if mv.piece.kind == PieceKind::Rook {
            next.revoke_castle(color, mv.from);
        }

        next.set(mv.from, None);
        next.set_meta(mv.from, SquareMeta::NONE);
        if let Some(rook) = mv.castle {
            next.set(rook.from, None);
            next.set_meta(rook.from, SquareMeta::NONE);
        }

        next.set(mv.to, Some(mv.promotion.unwrap_or(mv.piece)));
        let landed = if mv.is_double_step() && mv.promotion.is_none() {
            SquareMeta::DOUBLE_STEP
        } else {
            SquareMeta::NONE
        };
        next.set_meta(mv.to, landed);

        if let Some(rook) = mv.castle {
            next.set(rook.to, self.at(rook.from));
            next.set_meta(rook.to, SquareMeta::NONE);
        }

        next.halfmove_clock = if mv.piece.kind == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if color == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.turn = color.opponent();
        next
    }
}
