//! Head-to-head match controller.
//!
//! Drives a game between a White and a Black [`Engine`]: asks the side to
//! move for a move, applies it, and repeats until the game ends, the ply cap
//! is hit, or an observer raises the pause flag. Busy and pause flags are
//! shared atomics so a UI or signal handler can watch or steer a running
//! match; progress is optionally streamed as [`MatchEvent`]s.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::engines::engine_trait::{Engine, MoveSource};
use crate::errors::MatchError;
use crate::game_state::chess_types::{Color, GameResult};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
    Paused,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub move_delay: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            move_delay: Duration::from_millis(1200),
        }
    }
}

/// One applied move as seen by the controller.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub color: Color,
    pub chess_move: ChessMove,
    pub notation: String,
    pub source: MoveSource,
    pub attempts: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub enum MatchEvent {
    Thinking { color: Color, player: String },
    MoveApplied(MoveRecord),
    Finished(MatchOutcome),
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_think_time: Duration,
    pub black_think_time: Duration,
    pub fallback_moves: u32,
}

/// Clears the busy flag when dropped, including on early return.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct MatchController {
    game: GameState,
    white: Box<dyn Engine>,
    black: Box<dyn Engine>,
    config: MatchConfig,
    busy: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    events: Option<UnboundedSender<MatchEvent>>,
    stats: MatchStats,
}

#[derive(Debug, Clone, Default)]
struct MatchStats {
    white_move_count: u32,
    black_move_count: u32,
    white_think_time: Duration,
    black_think_time: Duration,
    fallback_moves: u32,
}

impl MatchController {
    pub fn new(white: Box<dyn Engine>, black: Box<dyn Engine>, config: MatchConfig) -> Self {
        Self::from_state(GameState::new_game(), white, black, config)
    }

    /// Start from a caller-provided position.
    pub fn from_state(
        game: GameState,
        white: Box<dyn Engine>,
        black: Box<dyn Engine>,
        config: MatchConfig,
    ) -> Self {
        Self {
            game,
            white,
            black,
            config,
            busy: Arc::new(AtomicBool::new(false)),
            paused: Arc::new(AtomicBool::new(false)),
            events: None,
            stats: MatchStats::default(),
        }
    }

    pub fn with_events(mut self, events: UnboundedSender<MatchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn busy_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    pub fn pause_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.paused)
    }

    /// Start over from the initial position with fresh counters.
    pub fn new_game(&mut self) {
        self.game.reset();
        self.stats = MatchStats::default();
        self.white.new_game();
        self.black.new_game();
    }

    fn emit(&self, event: MatchEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver only means nobody is watching.
            let _ = events.send(event);
        }
    }

    /// Ask the side to move for one move and apply it.
    ///
    /// Refused while another request is in flight or once the game is over.
    pub async fn request_and_apply_move(&mut self) -> Result<MoveRecord, MatchError> {
        if self.game.is_terminal() {
            return Err(MatchError::GameOver);
        }
        let _guard = BusyGuard::acquire(&self.busy).ok_or(MatchError::Busy)?;

        let color = self.game.side_to_move();
        let engine = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        let player = engine.name().to_owned();
        if let Some(events) = &self.events {
            let _ = events.send(MatchEvent::Thinking {
                color,
                player: player.clone(),
            });
        }

        let started = Instant::now();
        let out = engine.choose_move(&self.game).await?;
        let elapsed = started.elapsed();

        let applied = self
            .game
            .apply_move(out.best_move.from, out.best_move.to)
            .map_err(|source| MatchError::Refused {
                player: player.clone(),
                source,
            })?;
        let notation = self
            .game
            .move_history()
            .last()
            .cloned()
            .unwrap_or_default();

        match color {
            Color::White => {
                self.stats.white_move_count = self.stats.white_move_count.saturating_add(1);
                self.stats.white_think_time += elapsed;
            }
            Color::Black => {
                self.stats.black_move_count = self.stats.black_move_count.saturating_add(1);
                self.stats.black_think_time += elapsed;
            }
        }
        if out.is_fallback() {
            self.stats.fallback_moves = self.stats.fallback_moves.saturating_add(1);
            warn!(%player, %notation, "fallback move played");
        }

        info!(
            color = color.name(),
            %player,
            %notation,
            attempts = out.attempts.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "move applied"
        );

        let record = MoveRecord {
            color,
            chess_move: applied,
            notation,
            source: out.source,
            attempts: out.attempts.len(),
            elapsed,
        };
        self.emit(MatchEvent::MoveApplied(record.clone()));
        Ok(record)
    }

    /// Play until the game ends, the ply cap is reached, or the pause flag
    /// is raised. Clearing the flag and calling `play` again resumes.
    pub async fn play(&mut self) -> Result<MatchResult, MatchError> {
        let mut plies = self.game.move_history().len();

        let outcome = loop {
            if let Some(outcome) = terminal_outcome(self.game.result()) {
                break outcome;
            }
            if plies >= usize::from(self.config.max_plies) {
                break MatchOutcome::DrawMaxPlies;
            }
            if self.paused.load(Ordering::Acquire) {
                break MatchOutcome::Paused;
            }

            self.request_and_apply_move().await?;
            plies += 1;

            if !self.game.is_terminal() && !self.config.move_delay.is_zero() {
                tokio::time::sleep(self.config.move_delay).await;
            }
        };

        info!(?outcome, plies, "match finished");
        self.emit(MatchEvent::Finished(outcome));

        Ok(MatchResult {
            outcome,
            final_state: self.game.clone(),
            played_moves: self.game.move_history().to_vec(),
            white_move_count: self.stats.white_move_count,
            black_move_count: self.stats.black_move_count,
            white_think_time: self.stats.white_think_time,
            black_think_time: self.stats.black_think_time,
            fallback_moves: self.stats.fallback_moves,
        })
    }
}

fn terminal_outcome(result: GameResult) -> Option<MatchOutcome> {
    match result {
        GameResult::InProgress => None,
        GameResult::WhiteWins => Some(MatchOutcome::WhiteWinCheckmate),
        GameResult::BlackWins => Some(MatchOutcome::BlackWinCheckmate),
        GameResult::Stalemate => Some(MatchOutcome::DrawStalemate),
    }
}
