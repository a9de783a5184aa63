//! Canonical chess-rule constants.
//!
//! Starting layout, castling geometry and the fixed notation tokens used by
//! the move log.

use crate::game_state::chess_types::{CastleSide, Color, Square, square_at};

/// Standard starting position as position text (placement + side + castling).
pub const STARTING_POSITION_TEXT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

pub const KING_HOME_COL: u8 = 4;

pub const KINGSIDE_NOTATION: &str = "O-O";
pub const QUEENSIDE_NOTATION: &str = "O-O-O";
pub const PROMOTION_SUFFIX: &str = "=Q";

/// Squares involved in one castling move for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

pub const fn castle_path(color: Color, side: CastleSide) -> CastlePath {
    let row = color.back_row();
    match side {
        CastleSide::Kingside => CastlePath {
            king_from: square_at(row, KING_HOME_COL),
            king_to: square_at(row, 6),
            rook_from: square_at(row, 7),
            rook_to: square_at(row, 5),
        },
        CastleSide::Queenside => CastlePath {
            king_from: square_at(row, KING_HOME_COL),
            king_to: square_at(row, 2),
            rook_from: square_at(row, 0),
            rook_to: square_at(row, 3),
        },
    }
}
