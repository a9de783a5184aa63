use crate::game_state::chess_types::{Board, Square};
use crate::moves::ray_trace::trace_rays;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Diagonal squares reachable from `square`, including the first blocker on
/// each ray regardless of its color.
#[inline]
pub fn bishop_attacks(board: &Board, square: Square) -> Vec<Square> {
    trace_rays(board, square, &BISHOP_DIRECTIONS)
}
