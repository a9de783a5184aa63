//! Position-text export.
//!
//! Produces `<placement> <w|b>`: the FEN piece placement followed by the side
//! to move. Rights, en-passant and clocks are not part of the exported text.

use crate::game_state::{chess_types::*, game_state::GameState};

pub fn generate_position_text(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{} {}", generate_placement_field(&game_state.board), side_to_move)
}

fn generate_placement_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match board[square_at(row, col) as usize] {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_letter(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

#[inline]
fn piece_letter(piece: Piece) -> char {
    let letter = piece.kind.letter();
    match piece.color {
        Color::White => letter,
        Color::Black => letter.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::generate_position_text;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn starting_position_text() {
        let game = GameState::new_game();
        assert_eq!(
            generate_position_text(&game),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"
        );
    }

    #[test]
    fn text_after_e4_collapses_empty_runs() {
        let mut game = GameState::new_game();
        let e2 = algebraic_to_square("e2").expect("e2 should parse");
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        game.apply_move(e2, e4).expect("e2-e4 should be legal");

        assert_eq!(
            generate_position_text(&game),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        );
    }

    #[test]
    fn constructed_position_round_trips_placement() {
        let text = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
        let game = GameState::from_position_text(text).expect("position should parse");
        assert_eq!(
            generate_position_text(&game),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w"
        );
    }
}
