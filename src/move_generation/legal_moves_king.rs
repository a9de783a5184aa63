use crate::game_state::chess_rules::castle_path;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{is_empty, push_targets};
use crate::moves::king_moves::king_targets;
use crate::moves::move_descriptions::{ChessMove, SpecialMove};

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    let king = Piece::new(PieceKind::King, color);
    push_targets(game_state, from, king, king_targets(from), out);

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        let path = castle_path(color, side);
        if path.king_from == from && can_castle(game_state, color, side) {
            out.push(
                ChessMove::quiet(path.king_from, path.king_to, PieceKind::King)
                    .with_special(SpecialMove::Castling(side)),
            );
        }
    }
}

/// Castling precondition check for one color and side:
/// - the right is still held,
/// - the king is not in check,
/// - king and rook stand on their home squares,
/// - every square strictly between them is empty,
/// - no square the king crosses, start and end included, is attacked.
pub fn can_castle(game_state: &GameState, color: Color, side: CastleSide) -> bool {
    if !game_state.has_castling_right(color, side) {
        return false;
    }

    let path = castle_path(color, side);
    if game_state.board[path.king_from as usize] != Some(Piece::new(PieceKind::King, color))
        || game_state.board[path.rook_from as usize] != Some(Piece::new(PieceKind::Rook, color))
    {
        return false;
    }

    let (low, high) = if path.rook_from < path.king_from {
        (path.rook_from, path.king_from)
    } else {
        (path.king_from, path.rook_from)
    };
    if !(low + 1..high).all(|sq| is_empty(game_state, sq)) {
        return false;
    }

    let enemy = color.opposite();
    let (low, high) = if path.king_to < path.king_from {
        (path.king_to, path.king_from)
    } else {
        (path.king_from, path.king_to)
    };
    // The start square is in this range, which also covers "not in check".
    !(low..=high).any(|sq| is_square_attacked(game_state, sq, enemy))
}
