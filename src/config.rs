//! Runtime configuration.
//!
//! Values come from the process environment (a `.env` file is loaded first by
//! the binary) and may then be overridden by command-line flags. The API key
//! is only ever read from the environment.

use std::str::FromStr;
use std::time::Duration;

use crate::engines::engine_llm::{LlmEngineConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT};
use crate::errors::ConfigError;
use crate::llm::completion_client::DEFAULT_BASE_URL;
use crate::utils::engine_match_harness::MatchConfig;

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_WHITE_MODEL: &str = "ARENA_WHITE_MODEL";
pub const ENV_BLACK_MODEL: &str = "ARENA_BLACK_MODEL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "ARENA_REQUEST_TIMEOUT_MS";
pub const ENV_MAX_ATTEMPTS: &str = "ARENA_MAX_ATTEMPTS";
pub const ENV_MOVE_DELAY_MS: &str = "ARENA_MOVE_DELAY_MS";
pub const ENV_MAX_PLIES: &str = "ARENA_MAX_PLIES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub white_model: Option<String>,
    pub black_model: Option<String>,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub move_delay: Duration,
    pub max_plies: u16,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let match_defaults = MatchConfig::default();
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            white_model: None,
            black_model: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            move_delay: match_defaults.move_delay,
            max_plies: match_defaults.max_plies,
        }
    }
}

impl ArenaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get(ENV_API_KEY);
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        config.white_model = get(ENV_WHITE_MODEL);
        config.black_model = get(ENV_BLACK_MODEL);

        if let Some(ms) = parse_number::<u64>(ENV_REQUEST_TIMEOUT_MS, get(ENV_REQUEST_TIMEOUT_MS))? {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(n) = parse_number(ENV_MAX_ATTEMPTS, get(ENV_MAX_ATTEMPTS))? {
            config.max_attempts = n;
        }
        if let Some(ms) = parse_number::<u64>(ENV_MOVE_DELAY_MS, get(ENV_MOVE_DELAY_MS))? {
            config.move_delay = Duration::from_millis(ms);
        }
        if let Some(n) = parse_number(ENV_MAX_PLIES, get(ENV_MAX_PLIES))? {
            config.max_plies = n;
        }

        Ok(config)
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    pub fn engine_config(&self, model: &str) -> LlmEngineConfig {
        let mut config = LlmEngineConfig::new(model);
        config.max_attempts = self.max_attempts.max(1);
        config.request_timeout = self.request_timeout;
        config
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            max_plies: self.max_plies,
            move_delay: self.move_delay,
        }
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { key, value: v.clone() })
        })
        .transpose()
}
