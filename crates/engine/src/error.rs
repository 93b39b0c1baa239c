//! Game engine errors

use greenlight_core::LightPhase;
use greenlight_ports::ClockError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("The number of players must be greater than 0")]
    InvalidPlayerCount,

    #[error("Light duration must be a positive number of seconds, got {0}")]
    InvalidLightDuration(f64),

    #[error("Game duration of {0} seconds is out of range")]
    InvalidGameDuration(u64),

    #[error("{phase} move chance must be between 0.0 and 1.0, got {value}")]
    InvalidMoveChance { phase: LightPhase, value: f64 },

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to export statistics to {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    /// True for errors caused by invalid construction or run arguments
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GameError::InvalidPlayerCount
                | GameError::InvalidLightDuration(_)
                | GameError::InvalidGameDuration(_)
                | GameError::InvalidMoveChance { .. }
                | GameError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
