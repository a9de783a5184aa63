use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_piece_on, is_empty};
use crate::moves::move_descriptions::{ChessMove, SpecialMove};
use crate::moves::pawn_moves::{is_promotion_square, pawn_attacks, pawn_start_row};

/// Pseudo-legal pawn moves for the pawn of `color` on `from`. Promotions are
/// always to a queen.
pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    let direction = color.pawn_direction();

    if let Some(one_step) = offset_square(from, direction, 0) {
        if is_empty(game_state, one_step) {
            out.push(promote_if_needed(
                ChessMove::quiet(from, one_step, PieceKind::Pawn),
                color,
            ));

            if row_of(from) == pawn_start_row(color) {
                if let Some(two_step) = offset_square(from, 2 * direction, 0) {
                    if is_empty(game_state, two_step) {
                        out.push(
                            ChessMove::quiet(from, two_step, PieceKind::Pawn)
                                .with_special(SpecialMove::DoublePawnPush),
                        );
                    }
                }
            }
        }
    }

    // captures and en passant
    for to in pawn_attacks(color, from) {
        if let Some(captured) = enemy_piece_on(game_state, to, color) {
            out.push(promote_if_needed(
                ChessMove::capture(from, to, PieceKind::Pawn, captured),
                color,
            ));
        } else if game_state.en_passant_square == Some(to)
            && enemy_piece_on(game_state, square_at(row_of(from), col_of(to)), color)
                == Some(PieceKind::Pawn)
        {
            out.push(
                ChessMove::capture(from, to, PieceKind::Pawn, PieceKind::Pawn)
                    .with_special(SpecialMove::EnPassant),
            );
        }
    }
}

#[inline]
fn promote_if_needed(mv: ChessMove, color: Color) -> ChessMove {
    if is_promotion_square(color, mv.to) {
        mv.with_promotion(PieceKind::Queen)
    } else {
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::SpecialMove;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn blocked_pawn_cannot_double_advance() {
        let game = GameState::from_position_text("4k3/8/8/8/8/4n3/4P3/4K3 w - -")
            .expect("position should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, sq("e2"), Color::White, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn pawn_reaching_last_rank_promotes_to_queen_only() {
        let game = GameState::from_position_text("1n2k3/P7/8/8/8/8/8/4K3 w - -")
            .expect("position should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, sq("a7"), Color::White, &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|mv| mv.promotion == Some(PieceKind::Queen)));
        assert!(out.iter().any(|mv| mv.to == sq("b8") && mv.is_capture()));
    }

    #[test]
    fn en_passant_target_yields_tagged_capture() {
        let game = GameState::from_position_text("4k3/8/8/3pP3/8/8/8/4K3 w - d6")
            .expect("position should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, sq("e5"), Color::White, &mut out);
        let ep = out
            .iter()
            .find(|mv| mv.to == sq("d6"))
            .expect("en passant capture should be generated");
        assert_eq!(ep.special, SpecialMove::EnPassant);
        assert_eq!(ep.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_beside_the_capturer() {
        let mut game = GameState::from_position_text("8/8/8/3kP3/8/8/8/4K3 w - -")
            .expect("position should parse");
        game.en_passant_square = Some(sq("d6"));

        let mut out = Vec::new();
        generate_pawn_moves(&game, sq("e5"), Color::White, &mut out);
        assert!(out.iter().all(|mv| mv.special != SpecialMove::EnPassant));
        assert!(out.iter().all(|mv| mv.to != sq("d6")));
        assert!(game.apply_move(sq("e5"), sq("d6")).is_err());
    }
}
