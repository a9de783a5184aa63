//! The single mutable game aggregate.
//!
//! `GameState` owns the board, turn, castling and en-passant state, the
//! notation log and the derived check/result fields. Fields are crate-private:
//! outside callers read through accessors and mutate only through
//! [`GameState::apply_move`] or [`GameState::reset`].

use crate::errors::{IllegalMove, PositionError};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, refresh_game_status, validate_move};
use crate::move_generation::legal_move_generator::{
    all_legal_moves, legal_destinations, legal_moves_from,
};
use crate::moves::move_descriptions::{ChessMove, LastMove};
use crate::utils::fen_generator::generate_position_text;
use crate::utils::fen_parser::parse_position_text;
use crate::utils::render_game_state::render_game_state;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) move_history: Vec<String>,
    pub(crate) last_move: Option<LastMove>,
    // [color]
    pub(crate) in_check: [bool; 2],
    pub(crate) result: GameResult,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            move_history: Vec::new(),
            last_move: None,
            in_check: [false; 2],
            result: GameResult::InProgress,
        }
    }
}

impl GameState {
    /// Empty board, White to move. Only useful as a parsing scaffold.
    #[inline]
    pub(crate) fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            game_state.board[square_at(0, col) as usize] = Some(Piece::new(kind, Color::Black));
            game_state.board[square_at(1, col) as usize] =
                Some(Piece::new(PieceKind::Pawn, Color::Black));
            game_state.board[square_at(6, col) as usize] =
                Some(Piece::new(PieceKind::Pawn, Color::White));
            game_state.board[square_at(7, col) as usize] = Some(Piece::new(kind, Color::White));
        }
        game_state.castling_rights = CASTLE_ALL;
        game_state
    }

    /// Build a position from `<placement> <w|b> [castling] [en-passant]`.
    #[inline]
    pub fn from_position_text(text: &str) -> Result<Self, PositionError> {
        let mut game_state = parse_position_text(text)?;
        refresh_game_status(&mut game_state);
        Ok(game_state)
    }

    /// Discard everything and start over from the initial position.
    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square as usize).copied().flatten()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castle_flag(color, side) != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn move_history(&self) -> &[String] {
        &self.move_history
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.in_check[color.index()]
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Legal moves for the piece on `square`; empty unless it belongs to the
    /// side to move.
    #[inline]
    pub fn legal_moves_from(&self, square: Square) -> Vec<ChessMove> {
        legal_moves_from(self, square)
    }

    #[inline]
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        legal_destinations(self, square)
    }

    #[inline]
    pub fn all_legal_moves(&self) -> Vec<ChessMove> {
        all_legal_moves(self)
    }

    /// Would `from -> to` be accepted right now? Never mutates.
    #[inline]
    pub fn validate_move(&self, from: Square, to: Square) -> Result<ChessMove, IllegalMove> {
        validate_move(self, from, to)
    }

    /// The sole mutation entry point. See
    /// [`crate::move_generation::legal_move_apply::apply_move`].
    #[inline]
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<ChessMove, IllegalMove> {
        apply_move(self, from, to)
    }

    #[inline]
    pub fn position_text(&self) -> String {
        generate_position_text(self)
    }

    #[inline]
    pub fn board_text(&self) -> String {
        render_game_state(self)
    }
}
