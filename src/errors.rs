//! Error types shared across the crate.
//!
//! Every variant here is recoverable by the caller. Illegal move attempts and
//! per-attempt completion failures feed retry loops; catalog failures are
//! surfaced to whoever asked for the model list.

use std::time::Duration;

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::utils::algebraic::square_name;

/// Why `apply_move` refused a move. The game state is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("the game is already over")]
    GameOver,
    #[error("origin and destination are the same square ({})", square_name(*.0))]
    SameSquare(Square),
    #[error("there is no piece on {}", square_name(*.0))]
    NoPieceAtOrigin(Square),
    #[error("the piece on {} belongs to {}, but {} is to move", square_name(*.square), .owner.name(), .to_move.name())]
    WrongColor {
        square: Square,
        owner: Color,
        to_move: Color,
    },
    #[error("{} to {} is not a legal move", square_name(*.from), square_name(*.to))]
    NotLegal { from: Square, to: Square },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position text is missing the {0} field")]
    MissingField(&'static str),
    #[error("position text has unexpected trailing field '{0}'")]
    TrailingField(String),
    #[error("piece placement must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: u8 },
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("{color} must have exactly one king, found {count}", color = .color.name())]
    KingCount { color: Color, count: usize },
    #[error("{} is in check but it is not their move", .0.name())]
    OpponentInCheck(Color),
}

/// Failure of a single completion request. Always recoverable per attempt.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid API key")]
    Unauthorized,
    #[error("insufficient credits")]
    InsufficientCredits,
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("server error ({status})")]
    Server { status: u16 },
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Failure of the model listing, classified for display.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid API key")]
    InvalidCredential,
    #[error("too many requests, please wait")]
    RateLimited,
    #[error("model catalog server error")]
    ServerError,
    #[error("model listing timed out")]
    Timeout,
    #[error("API error {status}: {body}")]
    Other { status: u16, body: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed model listing: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0} has no legal moves")]
    NoLegalMoves(&'static str),
}

/// Why the match controller could not advance the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("a move request is already in flight")]
    Busy,
    #[error("the game is already over")]
    GameOver,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{player} proposed a move the rules engine refused: {source}")]
    Refused {
        player: String,
        #[source]
        source: IllegalMove,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}
