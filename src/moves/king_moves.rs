//! King step geometry.
//!
//! Castling is not a geometric king step and lives with legal king move
//! generation instead.

use crate::game_state::chess_types::{offset_square, Square};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_targets(square: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| offset_square(square, d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::king_targets;
    use crate::game_state::chess_types::square_at;

    #[test]
    fn king_targets_from_a1_has_three_squares() {
        let a1 = square_at(7, 0);
        assert_eq!(king_targets(a1).count(), 3);
    }

    #[test]
    fn king_targets_from_center_has_eight_squares() {
        assert_eq!(king_targets(square_at(3, 3)).count(), 8);
    }
}
