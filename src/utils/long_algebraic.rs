//! Move notation used by the move log and the prompts.
//!
//! `move_to_notation` is the engine's log format: a long-algebraic variant
//! with an explicit origin (`Ng1-f3`, `e5xd6`, `b7-b8=Q`, `O-O`).
//! `move_to_shorthand` is the `from:e2 to:e4` form the models are asked to
//! answer in.

use crate::game_state::chess_rules::{KINGSIDE_NOTATION, PROMOTION_SUFFIX, QUEENSIDE_NOTATION};
use crate::game_state::chess_types::{CastleSide, PieceKind};
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::square_name;

pub fn move_to_notation(mv: &ChessMove) -> String {
    match mv.castle_side() {
        Some(CastleSide::Kingside) => return KINGSIDE_NOTATION.to_owned(),
        Some(CastleSide::Queenside) => return QUEENSIDE_NOTATION.to_owned(),
        None => {}
    }

    let mut out = String::with_capacity(8);
    if mv.piece != PieceKind::Pawn {
        out.push(mv.piece.letter());
    }
    out.push_str(&square_name(mv.from));
    out.push(if mv.is_capture() { 'x' } else { '-' });
    out.push_str(&square_name(mv.to));
    if mv.promotion.is_some() {
        out.push_str(PROMOTION_SUFFIX);
    }
    out
}

#[inline]
pub fn move_to_shorthand(mv: &ChessMove) -> String {
    format!("from:{} to:{}", square_name(mv.from), square_name(mv.to))
}

#[cfg(test)]
mod tests {
    use super::{move_to_notation, move_to_shorthand};
    use crate::game_state::chess_types::{CastleSide, PieceKind};
    use crate::moves::move_descriptions::{ChessMove, SpecialMove};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn piece_letters_and_separators() {
        let knight = ChessMove::quiet(sq("g1"), sq("f3"), PieceKind::Knight);
        assert_eq!(move_to_notation(&knight), "Ng1-f3");

        let pawn = ChessMove::quiet(sq("e2"), sq("e4"), PieceKind::Pawn)
            .with_special(SpecialMove::DoublePawnPush);
        assert_eq!(move_to_notation(&pawn), "e2-e4");

        let capture = ChessMove::capture(sq("c4"), sq("f7"), PieceKind::Bishop, PieceKind::Pawn);
        assert_eq!(move_to_notation(&capture), "Bc4xf7");
    }

    #[test]
    fn castling_and_promotion_tokens() {
        let short = ChessMove::quiet(sq("e1"), sq("g1"), PieceKind::King)
            .with_special(SpecialMove::Castling(CastleSide::Kingside));
        let long = ChessMove::quiet(sq("e8"), sq("c8"), PieceKind::King)
            .with_special(SpecialMove::Castling(CastleSide::Queenside));
        assert_eq!(move_to_notation(&short), "O-O");
        assert_eq!(move_to_notation(&long), "O-O-O");

        let promo = ChessMove::capture(sq("b7"), sq("a8"), PieceKind::Pawn, PieceKind::Rook)
            .with_promotion(PieceKind::Queen);
        assert_eq!(move_to_notation(&promo), "b7xa8=Q");
    }

    #[test]
    fn shorthand_matches_answer_format() {
        let mv = ChessMove::quiet(sq("e2"), sq("e4"), PieceKind::Pawn);
        assert_eq!(move_to_shorthand(&mv), "from:e2 to:e4");
    }
}
