//! Position-text parser.
//!
//! Reads `<placement> <w|b> [castling] [en-passant]`, the FEN layout without
//! clocks. Missing castling and en-passant fields mean "none". Derived status
//! (check flags, result) is left for the caller to compute.

use crate::errors::PositionError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::pawn_moves::pawn_start_row;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_position_text(text: &str) -> Result<GameState, PositionError> {
    let mut parts = text.split_whitespace();

    let board_part = parts.next().ok_or(PositionError::MissingField("placement"))?;
    let side_part = parts.next().ok_or(PositionError::MissingField("side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");

    if let Some(extra) = parts.next() {
        return Err(PositionError::TrailingField(extra.to_owned()));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;

    for color in [Color::White, Color::Black] {
        let count = game_state
            .board
            .iter()
            .flatten()
            .filter(|p| p.kind == PieceKind::King && p.color == color)
            .count();
        if count != 1 {
            return Err(PositionError::KingCount { color, count });
        }
    }

    // The side that just moved cannot have left its king attacked.
    let waiting = game_state.side_to_move.opposite();
    if is_king_in_check(&game_state, waiting) {
        return Err(PositionError::OpponentInCheck(waiting));
    }

    check_en_passant_target(&game_state, en_passant_part)?;

    Ok(game_state)
}

/// An en-passant target must be the square a pawn of the side not to move
/// just skipped: empty, with that pawn directly in front of it and its start
/// square vacated.
fn check_en_passant_target(game_state: &GameState, en_passant_part: &str) -> Result<(), PositionError> {
    let Some(target) = game_state.en_passant_square else {
        return Ok(());
    };
    let invalid = || PositionError::InvalidSquare(en_passant_part.to_owned());

    let pusher = game_state.side_to_move.opposite();
    let direction = pusher.pawn_direction();
    let skipped_row = pawn_start_row(pusher) as i8 + direction;
    if row_of(target) as i8 != skipped_row {
        return Err(invalid());
    }

    let landed = offset_square(target, direction, 0).ok_or_else(invalid)?;
    let start = offset_square(target, -direction, 0).ok_or_else(invalid)?;
    let board = &game_state.board;
    if board[target as usize].is_some()
        || board[start as usize].is_some()
        || board[landed as usize] != Some(Piece::new(PieceKind::Pawn, pusher))
    {
        return Err(invalid());
    }

    Ok(())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), PositionError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::RankCount(ranks.len()));
    }

    // Placement text lists rank 8 first, which is row 0 of the grid.
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 8 - row as u8;
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(PositionError::InvalidPiece(ch));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(PositionError::RankWidth { rank });
                }
                continue;
            }

            let piece = piece_from_char(ch).ok_or(PositionError::InvalidPiece(ch))?;
            if col >= 8 {
                return Err(PositionError::RankWidth { rank });
            }

            game_state.board[square_at(row as u8, col) as usize] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err(PositionError::RankWidth { rank });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, PositionError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(PositionError::InvalidSide(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, PositionError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(PositionError::InvalidCastling(castling_part.to_owned())),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, PositionError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .ok_or_else(|| PositionError::InvalidSquare(en_passant_part.to_owned()))
}

fn piece_from_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, color))
}
