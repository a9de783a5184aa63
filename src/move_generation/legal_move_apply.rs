//! Move application: the only path that mutates a live `GameState`.
//!
//! `play_unchecked` performs the board-level side effects of a generated move
//! and is shared with the legality look-ahead and perft. `apply_move` wraps
//! it with the legality gate, the notation log, and the check/result update.

use crate::errors::IllegalMove;
use crate::game_state::chess_rules::castle_path;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves_from};
use crate::moves::move_descriptions::{ChessMove, LastMove, SpecialMove};
use crate::utils::long_algebraic::move_to_notation;

/// Check `from -> to` against the legal set without mutating anything.
///
/// Reasons are reported in a fixed order: terminal game, same square, empty
/// origin, wrong color, destination not legal.
pub fn validate_move(game_state: &GameState, from: Square, to: Square) -> Result<ChessMove, IllegalMove> {
    if game_state.result.is_terminal() {
        return Err(IllegalMove::GameOver);
    }
    if from == to {
        return Err(IllegalMove::SameSquare(from));
    }

    let piece = game_state
        .piece_at(from)
        .ok_or(IllegalMove::NoPieceAtOrigin(from))?;
    if piece.color != game_state.side_to_move {
        return Err(IllegalMove::WrongColor {
            square: from,
            owner: piece.color,
            to_move: game_state.side_to_move,
        });
    }

    legal_moves_from(game_state, from)
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or(IllegalMove::NotLegal { from, to })
}

/// Apply the move `from -> to` for the side to move.
///
/// On failure nothing is mutated and the reason is returned. Terminal games
/// refuse every move.
pub fn apply_move(
    game_state: &mut GameState,
    from: Square,
    to: Square,
) -> Result<ChessMove, IllegalMove> {
    let mv = validate_move(game_state, from, to)?;

    let notation = move_to_notation(&mv);
    play_unchecked(game_state, &mv);
    game_state.move_history.push(notation);
    game_state.last_move = Some(LastMove::from(&mv));
    refresh_game_status(game_state);

    Ok(mv)
}

/// Execute a generated move's board effects without any legality check:
/// en-passant removal, castling rook relocation, queen promotion, castling
/// rights, en-passant target and side to move.
pub(crate) fn play_unchecked(game_state: &mut GameState, mv: &ChessMove) {
    let mover = game_state.side_to_move;

    if mv.is_en_passant() {
        // The captured pawn sits on the origin row, destination column.
        let captured_sq = square_at(row_of(mv.from), col_of(mv.to));
        game_state.board[captured_sq as usize] = None;
    }

    if let Some(side) = mv.castle_side() {
        let path = castle_path(mover, side);
        let rook = game_state.board[path.rook_from as usize].take();
        game_state.board[path.rook_to as usize] = rook;
    }

    let moved = game_state.board[mv.from as usize].take();
    game_state.board[mv.to as usize] = match mv.promotion {
        Some(kind) => Some(Piece::new(kind, mover)),
        None => moved,
    };

    update_castling_rights(game_state, mv, mover);

    game_state.en_passant_square = match mv.special {
        SpecialMove::DoublePawnPush => Some((mv.from + mv.to) / 2),
        _ => None,
    };

    game_state.side_to_move = mover.opposite();
}

fn update_castling_rights(game_state: &mut GameState, mv: &ChessMove, mover: Color) {
    if mv.piece == PieceKind::King {
        game_state.castling_rights &=
            !(castle_flag(mover, CastleSide::Kingside) | castle_flag(mover, CastleSide::Queenside));
    }

    // A rook leaving its corner, or anything landing on an enemy corner,
    // clears that corner's right for good.
    for color in [Color::White, Color::Black] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            let rook_home = castle_path(color, side).rook_from;
            if mv.from == rook_home || mv.to == rook_home {
                game_state.castling_rights &= !castle_flag(color, side);
            }
        }
    }
}

/// Recompute per-color check status and the game result for the side now to
/// move: no legal moves means checkmate when in check, stalemate otherwise.
pub(crate) fn refresh_game_status(game_state: &mut GameState) {
    game_state.in_check = [
        is_king_in_check(game_state, Color::White),
        is_king_in_check(game_state, Color::Black),
    ];

    let to_move = game_state.side_to_move;
    game_state.result = if has_legal_move(game_state) {
        GameResult::InProgress
    } else if game_state.in_check[to_move.index()] {
        GameResult::win_for(to_move.opposite())
    } else {
        GameResult::Stalemate
    };
}
