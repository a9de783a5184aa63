//! Player abstraction used by the match controller.
//!
//! An engine receives a read-only view of the game and returns one move for
//! the side to move, plus whatever per-attempt diagnostics it collected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;

/// Where a returned move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Parsed from a model reply and accepted by the rules engine.
    Model,
    /// Retry ceiling reached; picked uniformly from the legal set.
    RandomFallback,
    /// A player that only ever picks at random.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Accepted,
    Unparseable,
    Rejected,
    TransportError,
}

/// One round-trip of the proposal loop.
#[derive(Debug, Clone)]
pub struct AttemptEvent {
    pub attempt: u32,
    pub outcome: AttemptOutcome,
    pub reason: Option<String>,
    pub reply_excerpt: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub best_move: ChessMove,
    pub source: MoveSource,
    pub attempts: Vec<AttemptEvent>,
}

impl EngineOutput {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.source == MoveSource::RandomFallback
    }
}

#[async_trait]
pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for `game_state.side_to_move()`. The returned move is
    /// always a member of the current legal set.
    async fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, EngineError>;
}
