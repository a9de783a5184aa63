//! Full legal move generation pipeline.
//!
//! Dispatches piece-wise pseudo-legal generation, then drops every candidate
//! that leaves the mover's own king attacked. The look-ahead plays the move on
//! a scratch copy, so the caller's state is never touched.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::play_unchecked;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::squares_of;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::generate_sliding_moves;
use crate::moves::move_descriptions::ChessMove;

/// Geometry-only moves for whatever piece stands on `square`.
pub fn pseudo_legal_moves_from(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(28);
    let Some(piece) = game_state.piece_at(square) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, square, piece.color, &mut out),
        PieceKind::Knight => generate_knight_moves(game_state, square, piece.color, &mut out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_sliding_moves(game_state, square, piece, &mut out)
        }
        PieceKind::King => generate_king_moves(game_state, square, piece.color, &mut out),
    }
    out
}

/// Legal moves for the piece on `square`. Empty when the square is empty or
/// holds a piece of the side not to move.
pub fn legal_moves_from(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    match game_state.piece_at(square) {
        Some(piece) if piece.color == game_state.side_to_move => {}
        _ => return Vec::new(),
    }

    let mover = game_state.side_to_move;
    pseudo_legal_moves_from(game_state, square)
        .into_iter()
        .filter(|mv| !leaves_king_attacked(game_state, mv, mover))
        .collect()
}

#[inline]
pub fn legal_destinations(game_state: &GameState, square: Square) -> Vec<Square> {
    legal_moves_from(game_state, square)
        .into_iter()
        .map(|mv| mv.to)
        .collect()
}

/// Every legal move for the side to move, in board order of the origin square.
pub fn all_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    squares_of(game_state, game_state.side_to_move)
        .flat_map(|sq| legal_moves_from(game_state, sq))
        .collect()
}

pub fn has_legal_move(game_state: &GameState) -> bool {
    squares_of(game_state, game_state.side_to_move)
        .any(|sq| !legal_moves_from(game_state, sq).is_empty())
}

fn leaves_king_attacked(game_state: &GameState, mv: &ChessMove, mover: Color) -> bool {
    let mut scratch = game_state.clone();
    play_unchecked(&mut scratch, mv);
    is_king_in_check(&scratch, mover)
}
