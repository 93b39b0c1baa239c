//! Red Light, Green Light engine
//!
//! Drives a population of players through alternating light phases:
//! - [`Game`] owns the players and statistics and runs the round loop
//! - [`GameConfig`] / [`RunConfig`] hold the validated parameters
//! - [`GameExport`] is the JSON statistics document
//!
//! Pacing goes through a [`greenlight_clock::GameClock`], so tests can run
//! a full game on a fixed clock without waiting.

pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod reporting;

pub use config::{ConfigError, DEFAULT_EXPORT_PATH, GameConfig, RunConfig, ScenarioConfig};
pub use error::{GameError, Result};
pub use export::{ExportedConfig, ExportedPlayers, GameExport, PlayerRecord};
pub use game::{Game, GameState};
pub use reporting::LogReporter;
