//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and grid indices.
//! Row 0 is rank 8, so the rank digit is `8 - row`.

use crate::game_state::chess_types::{col_of, row_of, square_at, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
/// Accepts upper-case files as well, since model replies are not normalized.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }

    let col = file - b'a';
    let row = 7 - (rank - b'1');
    Some(square_at(row, col))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_name(square: Square) -> String {
    let file_char = char::from(b'a' + col_of(square));
    let rank_char = char::from(b'8' - row_of(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_name};
    use crate::game_state::chess_types::square_at;

    #[test]
    fn corner_conversions() {
        assert_eq!(algebraic_to_square("a8"), Some(0));
        assert_eq!(algebraic_to_square("h1"), Some(63));
        assert_eq!(square_name(0), "a8");
        assert_eq!(square_name(63), "h1");
    }

    #[test]
    fn e2_maps_to_row_six() {
        assert_eq!(algebraic_to_square("e2"), Some(square_at(6, 4)));
        assert_eq!(algebraic_to_square("E2"), Some(square_at(6, 4)));
        assert_eq!(square_name(square_at(6, 4)), "e2");
    }

    #[test]
    fn rejects_off_board_coordinates() {
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("a0"), None);
        assert_eq!(algebraic_to_square("e"), None);
        assert_eq!(algebraic_to_square("e22"), None);
    }
}
