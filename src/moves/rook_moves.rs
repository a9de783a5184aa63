use crate::game_state::chess_types::{Board, Square};
use crate::moves::ray_trace::trace_rays;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn rook_attacks(board: &Board, square: Square) -> Vec<Square> {
    trace_rays(board, square, &ROOK_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;
    use crate::game_state::chess_types::{square_at, Board, Color, Piece, PieceKind};

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        let board: Board = [None; 64];
        assert_eq!(rook_attacks(&board, square_at(0, 0)).len(), 14);
    }

    #[test]
    fn rook_ray_stops_at_own_piece_square() {
        let mut board: Board = [None; 64];
        let a1 = square_at(7, 0);
        board[square_at(7, 2) as usize] = Some(Piece::new(PieceKind::Bishop, Color::White));
        let attacks = rook_attacks(&board, a1);
        assert!(attacks.contains(&square_at(7, 2)));
        assert!(!attacks.contains(&square_at(7, 3)));
    }
}
