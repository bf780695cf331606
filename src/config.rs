use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};

/// Names the TOML file to read settings from.
pub const CONFIG_ENV: &str = "TROPHY_SNAKE_CONFIG";
/// Names a file to write logs to; logging is off when unset.
pub const LOG_ENV: &str = "TROPHY_SNAKE_LOG";

/// Game tunables, loaded from TOML with environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sleep between input polls (one clock tick).
    pub poll_interval_us: u64,
    /// Polls per trophy countdown tick, i.e. per real second.
    pub polls_per_trophy_tick: u32,
    /// Ticks per simulation step before the snake's length is subtracted.
    pub base_time_unit: u32,
    /// Fastest the snake may go, in ticks per step.
    pub min_time_unit: u32,
    pub initial_length: usize,
    /// How long the end-of-game message stays up.
    pub end_pause_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_us: 7_812, // 1/128 s
            polls_per_trophy_tick: 128,
            base_time_unit: 64,
            min_time_unit: 4,
            initial_length: 5,
            end_pause_ms: 2_000,
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults, then the file named by `TROPHY_SNAKE_CONFIG`, then
    /// single-field `TROPHY_SNAKE_*` overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Config::from_file(Path::new(&path))?,
            None => Config::default(),
        };

        config.apply_env_overrides();
        Ok(config.validate())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Config::from_toml_str(&content).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os(LOG_ENV) {
            if !path.is_empty() {
                self.log_file = Some(PathBuf::from(path));
            }
        }
        if let Some(n) = env_parse("TROPHY_SNAKE_POLL_INTERVAL_US") {
            self.poll_interval_us = n;
        }
        if let Some(n) = env_parse("TROPHY_SNAKE_BASE_TIME_UNIT") {
            self.base_time_unit = n;
        }
        if let Some(n) = env_parse("TROPHY_SNAKE_MIN_TIME_UNIT") {
            self.min_time_unit = n;
        }
        if let Some(n) = env_parse("TROPHY_SNAKE_INITIAL_LENGTH") {
            self.initial_length = n;
        }
        if let Some(n) = env_parse("TROPHY_SNAKE_END_PAUSE_MS") {
            self.end_pause_ms = n;
        }
    }

    /// Raises values that would stall or break the clock.
    pub fn validate(mut self) -> Self {
        self.min_time_unit = self.min_time_unit.max(1);
        self.polls_per_trophy_tick = self.polls_per_trophy_tick.max(1);
        self.initial_length = self.initial_length.max(1);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us)
    }

    pub fn end_pause(&self) -> Duration {
        Duration::from_millis(self.end_pause_ms)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse().ok())
}
