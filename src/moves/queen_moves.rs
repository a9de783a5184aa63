//! Queen attacks are the union of rook and bishop rays.

use crate::game_state::chess_types::{Board, Square};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::ray_trace::trace_ray;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

pub fn queen_attacks(board: &Board, square: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(27);
    for &(d_row, d_col) in ROOK_DIRECTIONS.iter().chain(BISHOP_DIRECTIONS.iter()) {
        trace_ray(board, square, d_row, d_col, &mut out);
    }
    out
}
