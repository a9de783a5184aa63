use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_arena::config::ArenaConfig;
use plum_arena::engines::engine_llm::LlmEngine;
use plum_arena::engines::engine_random::RandomEngine;
use plum_arena::engines::engine_trait::{Engine, MoveSource};
use plum_arena::game_state::game_state::GameState;
use plum_arena::llm::completion_client::{CompletionClient, OpenRouterClient};
use plum_arena::llm::model_catalog::{fetch_models, CatalogOptions, HttpCatalogSource};
use plum_arena::move_generation::perft::{perft, perft_divide, perft_parallel};
use plum_arena::utils::engine_match_harness::{MatchController, MatchEvent};
use plum_arena::utils::game_record::{result_token, write_game_record};

/// Player name that selects the offline random mover instead of a model.
const RANDOM_PLAYER: &str = "random";
const LOG_ENV: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "plum_arena", version, about = "Two language models play chess against each other")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game. Use "random" as a player for an offline opponent.
    Play(PlayArgs),
    /// List chat models suitable for play, best first.
    Models {
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
    /// Count legal-move-tree nodes from a position.
    Perft {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        /// Position text; defaults to the starting position.
        #[arg(long)]
        position: Option<String>,
        /// Print the node count below each root move.
        #[arg(long)]
        divide: bool,
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Args)]
struct PlayArgs {
    #[arg(long)]
    white: Option<String>,
    #[arg(long)]
    black: Option<String>,
    #[arg(long)]
    max_plies: Option<u16>,
    #[arg(long)]
    move_delay_ms: Option<u64>,
    #[arg(long)]
    max_attempts: Option<u32>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Seed for the random player and for model fallbacks.
    #[arg(long)]
    seed: Option<u64>,
    /// Start from this position text instead of the initial position.
    #[arg(long)]
    position: Option<String>,
    /// Write a game record here when the match ends.
    #[arg(long)]
    record: Option<PathBuf>,
}

impl PlayArgs {
    fn apply_to(&self, config: &mut ArenaConfig) {
        if let Some(white) = &self.white {
            config.white_model = Some(white.clone());
        }
        if let Some(black) = &self.black {
            config.black_model = Some(black.clone());
        }
        if let Some(n) = self.max_plies {
            config.max_plies = n;
        }
        if let Some(ms) = self.move_delay_ms {
            config.move_delay = Duration::from_millis(ms);
        }
        if let Some(n) = self.max_attempts {
            config.max_attempts = n;
        }
        if let Some(ms) = self.timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG, so load it before the subscriber reads the filter.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(LOG_ENV))
        .init();

    let cli = Cli::parse();
    let mut config = ArenaConfig::from_env().context("failed to read configuration")?;

    match cli.command {
        Command::Play(args) => {
            args.apply_to(&mut config);
            run_play(&config, &args).await
        }
        Command::Models { limit } => run_models(&config, limit).await,
        Command::Perft {
            depth,
            position,
            divide,
            parallel,
        } => run_perft(depth, position.as_deref(), divide, parallel),
    }
}

/// Filter directives from `var`, falling back to `info` when unset or invalid.
fn log_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn build_player(
    model: &str,
    config: &ArenaConfig,
    client: &mut Option<Arc<dyn CompletionClient>>,
    seed: Option<u64>,
) -> Result<Box<dyn Engine>> {
    if model.eq_ignore_ascii_case(RANDOM_PLAYER) {
        return Ok(Box::new(match seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::new(),
        }));
    }

    let client = match client {
        Some(client) => Arc::clone(client),
        None => {
            let api_key = config.require_api_key()?;
            let created: Arc<dyn CompletionClient> =
                Arc::new(OpenRouterClient::new(api_key, config.base_url.clone()));
            *client = Some(Arc::clone(&created));
            created
        }
    };

    let engine = LlmEngine::new(client, config.engine_config(model));
    Ok(Box::new(match seed {
        Some(seed) => engine.with_rng(StdRng::seed_from_u64(seed)),
        None => engine,
    }))
}

async fn run_play(config: &ArenaConfig, args: &PlayArgs) -> Result<()> {
    let (Some(white_model), Some(black_model)) = (&config.white_model, &config.black_model) else {
        bail!("both players are required: pass --white/--black or set ARENA_WHITE_MODEL/ARENA_BLACK_MODEL");
    };

    let mut client = None;
    let white = build_player(white_model, config, &mut client, args.seed)?;
    let black = build_player(black_model, config, &mut client, args.seed.map(|s| s ^ 0x5A5A))?;

    let start = match &args.position {
        Some(text) => GameState::from_position_text(text).context("invalid --position")?,
        None => GameState::new_game(),
    };
    println!("{}\n", start.board_text());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller =
        MatchController::from_state(start, white, black, config.match_config()).with_events(tx);

    let pause = controller.pause_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, pausing after the current move");
            pause.store(true, Ordering::Release);
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                MatchEvent::Thinking { color, player } => {
                    info!(color = color.name(), %player, "thinking");
                }
                MatchEvent::MoveApplied(record) => {
                    let tag = match record.source {
                        MoveSource::RandomFallback => " (random fallback)",
                        _ => "",
                    };
                    println!(
                        "{:<5} {:<10} {} attempt(s), {:.1}s{}",
                        record.color.name(),
                        record.notation,
                        record.attempts,
                        record.elapsed.as_secs_f64(),
                        tag
                    );
                }
                MatchEvent::Finished(outcome) => println!("\nfinished: {outcome:?}"),
            }
        }
    });

    let result = controller.play().await?;
    drop(controller);
    printer.await.ok();

    println!("\n{}", result.final_state.board_text());
    println!(
        "result {} after {} plies, {} fallback move(s); think time white {:.1}s black {:.1}s",
        result_token(result.final_state.result()),
        result.played_moves.len(),
        result.fallback_moves,
        result.white_think_time.as_secs_f64(),
        result.black_think_time.as_secs_f64()
    );

    if let Some(path) = &args.record {
        let record = write_game_record(
            &result.final_state,
            white_model,
            black_model,
            chrono::Local::now().date_naive(),
        );
        std::fs::write(path, record)
            .with_context(|| format!("failed to write game record to {}", path.display()))?;
        println!("game record written to {}", path.display());
    }

    Ok(())
}

async fn run_models(config: &ArenaConfig, limit: usize) -> Result<()> {
    let source = HttpCatalogSource::new(config.require_api_key()?);
    let models = fetch_models(&source, &config.base_url, CatalogOptions::default()).await?;

    for model in models.iter().take(limit) {
        println!(
            "{:<50}  {:>6}  {}",
            model.id,
            model.context_label(),
            model.display_name()
        );
    }
    if models.len() > limit {
        println!("... ({} more)", models.len() - limit);
    }
    Ok(())
}

fn run_perft(depth: u8, position: Option<&str>, divide: bool, parallel: bool) -> Result<()> {
    let game = match position {
        Some(text) => GameState::from_position_text(text).context("invalid --position")?,
        None => GameState::new_game(),
    };

    if divide {
        let mut total = 0u64;
        for (notation, nodes) in perft_divide(&game, depth) {
            println!("{notation}: {nodes}");
            total += nodes;
        }
        println!("\nnodes {total}");
        return Ok(());
    }

    let started = std::time::Instant::now();
    let counts = if parallel {
        perft_parallel(&game, depth)
    } else {
        perft(&game, depth)
    };
    println!("{counts:#?}");
    println!("{:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}
