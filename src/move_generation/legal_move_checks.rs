//! Square-attack and check detection.
//!
//! Attacks are pseudo-legal: a pinned piece still attacks, and pawns attack
//! only their forward diagonals.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::squares_of;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state
        .board
        .iter()
        .position(|p| *p == Some(Piece::new(PieceKind::King, color)))
        .map(|sq| sq as Square)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// True iff any piece of `attacker_color` could land on `square` by its
/// movement geometry.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    squares_of(game_state, attacker_color).any(|from| attacks_square(game_state, from, square))
}

fn attacks_square(game_state: &GameState, from: Square, target: Square) -> bool {
    let Some(piece) = game_state.board[from as usize] else {
        return false;
    };
    let board = &game_state.board;
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from).any(|sq| sq == target),
        PieceKind::Knight => knight_targets(from).any(|sq| sq == target),
        PieceKind::King => king_targets(from).any(|sq| sq == target),
        PieceKind::Bishop => bishop_attacks(board, from).contains(&target),
        PieceKind::Rook => rook_attacks(board, from).contains(&target),
        PieceKind::Queen => queen_attacks(board, from).contains(&target),
    }
}
