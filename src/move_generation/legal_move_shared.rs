use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::ChessMove;

#[inline]
pub fn is_empty(game_state: &GameState, square: Square) -> bool {
    game_state.board[square as usize].is_none()
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square, color: Color) -> Option<PieceKind> {
    match game_state.board[square as usize] {
        Some(piece) if piece.color != color => Some(piece.kind),
        _ => None,
    }
}

/// Turn raw target squares into moves: empty squares become quiet moves,
/// enemy-occupied squares become captures, own-occupied squares are dropped.
pub fn push_targets(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    targets: impl IntoIterator<Item = Square>,
    out: &mut Vec<ChessMove>,
) {
    for to in targets {
        match game_state.board[to as usize] {
            None => out.push(ChessMove::quiet(from, to, piece.kind)),
            Some(target) if target.color != piece.color => {
                out.push(ChessMove::capture(from, to, piece.kind, target.kind))
            }
            Some(_) => {}
        }
    }
}

/// Squares holding pieces of `color`, in board order.
pub fn squares_of(game_state: &GameState, color: Color) -> impl Iterator<Item = Square> + '_ {
    game_state
        .board
        .iter()
        .enumerate()
        .filter(move |(_, p)| matches!(p, Some(piece) if piece.color == color))
        .map(|(sq, _)| sq as Square)
}
