use crate::game_state::chess_types::{CastleSide, PieceKind, Square};

/// Special-case tag carried by a generated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    Quiet,
    DoublePawnPush,
    EnPassant,
    Castling(CastleSide),
}

/// A candidate move as produced by move generation.
///
/// `captured` is filled for ordinary captures and for en passant, where the
/// captured pawn sits beside the destination rather than on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub special: SpecialMove,
}

impl ChessMove {
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            special: SpecialMove::Quiet,
        }
    }

    #[inline]
    pub const fn capture(from: Square, to: Square, piece: PieceKind, captured: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(captured),
            promotion: None,
            special: SpecialMove::Quiet,
        }
    }

    #[inline]
    pub const fn with_special(mut self, special: SpecialMove) -> Self {
        self.special = special;
        self
    }

    #[inline]
    pub const fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.special, SpecialMove::EnPassant)
    }

    #[inline]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.special {
            SpecialMove::Castling(side) => Some(side),
            _ => None,
        }
    }
}

/// Origin/destination of the most recently applied move, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

impl From<&ChessMove> for LastMove {
    fn from(mv: &ChessMove) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
        }
    }
}
