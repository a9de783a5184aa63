use crate::game_state::chess_types::{offset_square, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// On-board squares a knight on `square` jumps to, ignoring occupancy.
#[inline]
pub fn knight_targets(square: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| offset_square(square, d_row, d_col))
}
