//! Occupancy-aware ray tracing for sliding pieces.

use crate::game_state::chess_types::{offset_square, Board, Square};

/// Walk from `square` in one direction, collecting every square up to and
/// including the first occupied one. Whether that blocker may be captured is
/// decided by the caller.
pub fn trace_ray(board: &Board, square: Square, d_row: i8, d_col: i8, out: &mut Vec<Square>) {
    let mut current = square;
    while let Some(next) = offset_square(current, d_row, d_col) {
        out.push(next);
        if board[next as usize].is_some() {
            break;
        }
        current = next;
    }
}

pub fn trace_rays(board: &Board, square: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut out = Vec::with_capacity(14);
    for &(d_row, d_col) in directions {
        trace_ray(board, square, d_row, d_col, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::trace_ray;
    use crate::game_state::chess_types::{square_at, Board, Color, Piece, PieceKind};

    #[test]
    fn blocker_stops_ray_and_is_included() {
        let mut board: Board = [None; 64];
        let c1 = square_at(7, 2);
        let e3 = square_at(5, 4);
        board[e3 as usize] = Some(Piece::new(PieceKind::Pawn, Color::Black));

        let mut out = Vec::new();
        trace_ray(&board, c1, -1, 1, &mut out);

        assert_eq!(out, vec![square_at(6, 3), e3]);
    }

    #[test]
    fn open_ray_runs_to_edge() {
        let board: Board = [None; 64];
        let mut out = Vec::new();
        trace_ray(&board, square_at(7, 0), -1, 0, &mut out);
        assert_eq!(out.len(), 7);
        assert_eq!(out.last().copied(), Some(square_at(0, 0)));
    }
}
