//! Text board renderer.
//!
//! One line per rank from 8 down to 1, `"8: "` prefix, Unicode glyphs and `.`
//! for empty squares, then a file footer. This is the board view sent to the
//! models, so the layout is part of the prompt contract.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const FILE_FOOTER: &str = "   a b c d e f g h";

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        out.push(char::from(b'8' - row));
        out.push(':');

        for col in 0..8u8 {
            out.push(' ');
            match game_state.board[square_at(row, col) as usize] {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('.'),
            }
        }

        out.push('\n');
    }

    out.push_str(FILE_FOOTER);
    out
}

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_game_state, FILE_FOOTER};
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_board_layout() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8: ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[1], "7: ♟ ♟ ♟ ♟ ♟ ♟ ♟ ♟");
        assert_eq!(lines[4], "4: . . . . . . . .");
        assert_eq!(lines[7], "1: ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖");
        assert_eq!(lines[8], FILE_FOOTER);
    }
}
