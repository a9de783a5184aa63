//! Uniform random player.
//!
//! Picks from the legal moves with an owned RNG, so a seeded instance plays a
//! reproducible game. Also the fallback picker for the model player.

use async_trait::async_trait;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, MoveSource};
use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform choice over the side to move's legal moves.
pub fn pick_random_legal_move(
    game_state: &GameState,
    rng: &mut StdRng,
) -> Result<ChessMove, EngineError> {
    game_state
        .all_legal_moves()
        .as_slice()
        .choose(rng)
        .copied()
        .ok_or_else(|| EngineError::NoLegalMoves(game_state.side_to_move().name()))
}

#[async_trait]
impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    async fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, EngineError> {
        let best_move = pick_random_legal_move(game_state, &mut self.rng)?;
        Ok(EngineOutput {
            best_move,
            source: MoveSource::Random,
            attempts: Vec::new(),
        })
    }
}
