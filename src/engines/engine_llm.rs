//! Model-backed player.
//!
//! Each turn runs the proposal loop: build a prompt, ask the completion
//! endpoint, parse the reply, validate it against the rules engine, and on
//! failure feed the reason back into the next prompt. After the attempt
//! ceiling a uniformly random legal move is played instead, so a turn never
//! fails while legal moves exist.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::engines::engine_random::pick_random_legal_move;
use crate::engines::engine_trait::{AttemptEvent, AttemptOutcome, Engine, EngineOutput, MoveSource};
use crate::errors::EngineError;
use crate::game_state::game_state::GameState;
use crate::llm::completion_client::{excerpt, CompletionClient, CompletionRequest, SamplingParams};
use crate::llm::prompt::{build_prompt, RetryFeedback, SYSTEM_INSTRUCTION};
use crate::llm::response_parser::parse_reply;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 25;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const RULES_VIOLATED: &str = "Invalid move - rules violated";
const FORMAT_NOT_UNDERSTOOD: &str = "Move format not understood";
const REPLY_EXCERPT: usize = 200;

/// Pauses inserted between failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Pause after every `every`-th failed parse/validation.
    pub every: u32,
    pub short_pause: Duration,
    pub long_pause: Duration,
    /// Attempts beyond this number use `long_pause`.
    pub long_after: u32,
    pub transport_pause: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            every: 3,
            short_pause: Duration::from_millis(800),
            long_pause: Duration::from_millis(2000),
            long_after: 15,
            transport_pause: Duration::from_millis(500),
        }
    }
}

impl BackoffPolicy {
    pub fn none() -> Self {
        Self {
            short_pause: Duration::ZERO,
            long_pause: Duration::ZERO,
            transport_pause: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn after_rejection(&self, attempt: u32) -> Option<Duration> {
        if self.every == 0 || attempt % self.every != 0 {
            return None;
        }
        let pause = if attempt > self.long_after {
            self.long_pause
        } else {
            self.short_pause
        };
        (!pause.is_zero()).then_some(pause)
    }

    pub fn after_transport_error(&self) -> Option<Duration> {
        (!self.transport_pause.is_zero()).then_some(self.transport_pause)
    }
}

#[derive(Debug, Clone)]
pub struct LlmEngineConfig {
    pub model: String,
    pub max_attempts: u32,
    pub request_timeout: Duration,
    pub sampling: SamplingParams,
    pub backoff: BackoffPolicy,
}

impl LlmEngineConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sampling: SamplingParams::default(),
            backoff: BackoffPolicy::default(),
        }
    }
}

pub struct LlmEngine {
    client: Arc<dyn CompletionClient>,
    config: LlmEngineConfig,
    rng: StdRng,
}

impl LlmEngine {
    pub fn new(client: Arc<dyn CompletionClient>, config: LlmEngineConfig) -> Self {
        Self {
            client,
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Fixed fallback RNG, for reproducible tests.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &LlmEngineConfig {
        &self.config
    }

    fn record(
        &self,
        attempts: &mut Vec<AttemptEvent>,
        attempt: u32,
        outcome: AttemptOutcome,
        reason: Option<String>,
        reply: &str,
    ) {
        debug!(
            model = %self.config.model,
            attempt,
            ?outcome,
            reason = reason.as_deref().unwrap_or(""),
            "move attempt"
        );
        attempts.push(AttemptEvent {
            attempt,
            outcome,
            reason,
            reply_excerpt: excerpt(reply, REPLY_EXCERPT),
            at: Utc::now(),
        });
    }
}

#[async_trait]
impl Engine for LlmEngine {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, EngineError> {
        let mover = game_state.side_to_move();
        if game_state.all_legal_moves().is_empty() {
            return Err(EngineError::NoLegalMoves(mover.name()));
        }

        let mut attempts = Vec::new();
        let mut feedback: Option<RetryFeedback> = None;

        for attempt in 1..=self.config.max_attempts {
            let request = CompletionRequest {
                model: self.config.model.clone(),
                system: SYSTEM_INSTRUCTION.to_owned(),
                prompt: build_prompt(game_state, attempt, feedback.as_ref()),
                sampling: self.config.sampling,
                timeout: self.config.request_timeout,
            };

            let reply = match self.client.complete(&request).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(model = %self.config.model, attempt, error = %err, "completion request failed");
                    let reason = format!("API error: {err}");
                    self.record(
                        &mut attempts,
                        attempt,
                        AttemptOutcome::TransportError,
                        Some(reason.clone()),
                        "",
                    );
                    feedback = Some(RetryFeedback {
                        invalid_move: None,
                        error: reason,
                    });
                    if let Some(pause) = self.config.backoff.after_transport_error() {
                        tokio::time::sleep(pause).await;
                    }
                    continue;
                }
            };

            match parse_reply(&reply) {
                Some(parsed) => match game_state.validate_move(parsed.from, parsed.to) {
                    Ok(best_move) => {
                        self.record(&mut attempts, attempt, AttemptOutcome::Accepted, None, &reply);
                        info!(model = %self.config.model, attempt, format = ?parsed.format, "model move accepted");
                        return Ok(EngineOutput {
                            best_move,
                            source: MoveSource::Model,
                            attempts,
                        });
                    }
                    Err(illegal) => {
                        self.record(
                            &mut attempts,
                            attempt,
                            AttemptOutcome::Rejected,
                            Some(illegal.to_string()),
                            &reply,
                        );
                        feedback = Some(RetryFeedback {
                            invalid_move: Some((parsed.from, parsed.to)),
                            error: format!("{RULES_VIOLATED} ({illegal})"),
                        });
                    }
                },
                None => {
                    self.record(
                        &mut attempts,
                        attempt,
                        AttemptOutcome::Unparseable,
                        Some(FORMAT_NOT_UNDERSTOOD.to_owned()),
                        &reply,
                    );
                    feedback = Some(RetryFeedback {
                        invalid_move: None,
                        error: FORMAT_NOT_UNDERSTOOD.to_owned(),
                    });
                }
            }

            if let Some(pause) = self.config.backoff.after_rejection(attempt) {
                debug!(attempt, ?pause, "pausing before next attempt");
                tokio::time::sleep(pause).await;
            }
        }

        let best_move = pick_random_legal_move(game_state, &mut self.rng)?;
        warn!(
            model = %self.config.model,
            attempts = self.config.max_attempts,
            "no valid move from model, playing a random legal move"
        );
        Ok(EngineOutput {
            best_move,
            source: MoveSource::RandomFallback,
            attempts,
        })
    }
}
