//! Bishop, rook and queen move generation.
//!
//! Rays stop at the first occupied square, which is kept only when it holds
//! an enemy piece.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_sliding_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    out: &mut Vec<ChessMove>,
) {
    let board = &game_state.board;
    let targets = match piece.kind {
        PieceKind::Bishop => bishop_attacks(board, from),
        PieceKind::Rook => rook_attacks(board, from),
        PieceKind::Queen => queen_attacks(board, from),
        _ => return,
    };
    push_targets(game_state, from, piece, targets, out);
}
