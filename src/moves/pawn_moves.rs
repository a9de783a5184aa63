//! Pawn geometry helpers.
//!
//! Pawns are the one piece whose pushes and attacks differ, so the attack-only
//! diagonals are exposed separately for square-attack tests.

use crate::game_state::chess_types::{offset_square, row_of, Color, Square};

/// Diagonal squares a pawn of `color` on `square` attacks. The forward square
/// is never included.
#[inline]
pub fn pawn_attacks(color: Color, square: Square) -> impl Iterator<Item = Square> {
    let d_row = color.pawn_direction();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| offset_square(square, d_row, d_col))
}

/// Row a pawn of `color` starts on (and may double-advance from).
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row on which a pawn of `color` promotes.
#[inline]
pub const fn pawn_promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

#[inline]
pub fn is_promotion_square(color: Color, square: Square) -> bool {
    row_of(square) == pawn_promotion_row(color)
}
