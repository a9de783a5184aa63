//! Core value types shared by the rules engine and the move-proposal adapter.
//!
//! Squares are plain indices into an 8x8 grid stored row-major, where row 0 is
//! rank 8 (Black's back rank) and column 0 is file a. So `a8 == 0` and
//! `h1 == 63`.

pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at game start.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used by position text and move notation.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Outcome field of a game. Every variant but `InProgress` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameResult {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;
pub type CastlingRights = u8;

#[inline]
pub const fn castle_flag(color: Color, side: CastleSide) -> CastlingRights {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CASTLE_WHITE_KINGSIDE,
        (Color::White, CastleSide::Queenside) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, CastleSide::Kingside) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, CastleSide::Queenside) => CASTLE_BLACK_QUEENSIDE,
    }
}

/// Board square index (`0..=63`), `row * 8 + col`.
pub type Square = u8;

/// Row-major 8x8 grid of optional pieces.
pub type Board = [Option<Piece>; 64];

#[inline]
pub const fn square_at(row: u8, col: u8) -> Square {
    row * 8 + col
}

#[inline]
pub const fn row_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn col_of(square: Square) -> u8 {
    square % 8
}

/// Step `square` by a row/column delta, or `None` when that leaves the board.
#[inline]
pub fn offset_square(square: Square, d_row: i8, d_col: i8) -> Option<Square> {
    let row = row_of(square) as i8 + d_row;
    let col = col_of(square) as i8 + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some(square_at(row as u8, col as u8))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_square_stays_on_board() {
        let a8 = square_at(0, 0);
        assert_eq!(offset_square(a8, -1, 0), None);
        assert_eq!(offset_square(a8, 0, -1), None);
        assert_eq!(offset_square(a8, 1, 1), Some(square_at(1, 1)));

        let h1 = square_at(7, 7);
        assert_eq!(h1, 63);
        assert_eq!(offset_square(h1, 1, 0), None);
        assert_eq!(offset_square(h1, -2, -1), Some(square_at(5, 6)));
    }

    #[test]
    fn castle_flags_are_distinct() {
        let flags = [
            castle_flag(Color::White, CastleSide::Kingside),
            castle_flag(Color::White, CastleSide::Queenside),
            castle_flag(Color::Black, CastleSide::Kingside),
            castle_flag(Color::Black, CastleSide::Queenside),
        ];
        assert_eq!(flags.iter().fold(0, |acc, f| acc | f), CASTLE_ALL);
        assert_eq!(CASTLE_ALL.count_ones(), 4);
    }
}
