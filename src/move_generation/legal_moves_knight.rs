use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::ChessMove;

pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    out: &mut Vec<ChessMove>,
) {
    let knight = Piece::new(PieceKind::Knight, color);
    push_targets(game_state, from, knight, knight_targets(from), out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn starting_knight_has_two_moves() {
        let game = GameState::new_game();
        let g1 = algebraic_to_square("g1").expect("g1 should parse");
        let mut out = Vec::new();
        generate_knight_moves(&game, g1, Color::White, &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|mv| !mv.is_capture()));
    }
}
