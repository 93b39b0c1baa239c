//! Game and run configuration
//!
//! Supports JSON scenario files describing:
//! - The population and light pacing (`game`)
//! - Run duration and move chances (`run`)
//! - Where to export statistics afterwards
//!
//! Every field is optional in the file; missing fields take the defaults.

use chrono::Duration;
use greenlight_clock::TimeScale;
use greenlight_core::LightPhase;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::{GameError, Result};

/// Population and pacing settings, fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players created at construction and on reset
    pub total_players: usize,
    /// Length of each light phase in seconds
    pub light_duration: f64,
    /// Whether the reporter is invoked
    pub verbose: bool,
    /// Random seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    /// How simulated time relates to wall time
    pub time_scale: TimeScale,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_players: 20,
            light_duration: 2.0,
            verbose: true,
            seed: None,
            time_scale: TimeScale::Normal,
        }
    }
}

impl GameConfig {
    pub fn new(total_players: usize, verbose: bool, light_duration: f64) -> Self {
        Self {
            total_players,
            light_duration,
            verbose,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_scale(mut self, time_scale: TimeScale) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_players == 0 {
            return Err(GameError::InvalidPlayerCount);
        }
        self.light_phase().map(|_| ())
    }

    /// Light duration as a clock duration
    pub fn light_phase(&self) -> Result<Duration> {
        let invalid = || GameError::InvalidLightDuration(self.light_duration);

        if !(self.light_duration.is_finite() && self.light_duration > 0.0) {
            return Err(invalid());
        }
        let secs =
            std::time::Duration::try_from_secs_f64(self.light_duration).map_err(|_| invalid())?;
        // Sub-nanosecond phases round to zero and would never advance the clock
        if secs.is_zero() {
            return Err(invalid());
        }
        Duration::from_std(secs).map_err(|_| invalid())
    }
}

/// Parameters for a single call to `Game::start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Total run budget in seconds
    pub game_duration: u64,
    /// Probability that a remaining player moves on green (0.0-1.0)
    pub green_move_chance: f64,
    /// Probability that a remaining player moves on red (0.0-1.0)
    pub red_move_chance: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            game_duration: 60,
            green_move_chance: 0.8,
            red_move_chance: 0.05,
        }
    }
}

impl RunConfig {
    pub fn new(game_duration: u64, green_move_chance: f64, red_move_chance: f64) -> Self {
        Self {
            game_duration,
            green_move_chance,
            red_move_chance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for phase in [LightPhase::Green, LightPhase::Red] {
            let value = self.move_chance(phase);
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidMoveChance { phase, value });
            }
        }
        self.budget().map(|_| ())
    }

    /// Move probability that applies during `phase`
    pub fn move_chance(&self, phase: LightPhase) -> f64 {
        match phase {
            LightPhase::Green => self.green_move_chance,
            LightPhase::Red => self.red_move_chance,
        }
    }

    /// Run duration as a clock duration
    pub fn budget(&self) -> Result<Duration> {
        i64::try_from(self.game_duration)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(GameError::InvalidGameDuration(self.game_duration))
    }
}

/// A complete scenario: game, run and export destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub game: GameConfig,
    pub run: RunConfig,
    /// Where to write the statistics document; no export when absent
    pub export_path: Option<PathBuf>,
}

impl Default for ScenarioConfig {
    /// The stock scenario: 20 players, 2 second lights, one minute, 80% / 10%
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            run: RunConfig {
                red_move_chance: 0.1,
                ..RunConfig::default()
            },
            export_path: Some(PathBuf::from(DEFAULT_EXPORT_PATH)),
        }
    }
}

/// Default statistics file name
pub const DEFAULT_EXPORT_PATH: &str = "greenlight_stats.json";

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.run.validate()
    }
}

/// Scenario file errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
