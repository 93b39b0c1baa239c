//! Command-line arguments
//!
//! Every flag is optional. Values are layered: defaults, then the scenario
//! file given with `--config`, then the flags themselves.

use clap::Parser;
use greenlight_clock::TimeScale;
use greenlight_engine::{ConfigError, ScenarioConfig};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "greenlight")]
#[command(about = "Red Light, Green Light simulation")]
#[command(version)]
pub struct Cli {
    /// JSON scenario file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of players
    #[arg(short = 'n', long)]
    pub players: Option<usize>,

    /// Seconds per light phase
    #[arg(short, long)]
    pub light_duration: Option<f64>,

    /// Game budget in seconds
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Chance that a player moves on green (0.0 to 1.0)
    #[arg(long)]
    pub green_chance: Option<f64>,

    /// Chance that a player moves on red (0.0 to 1.0)
    #[arg(long)]
    pub red_chance: Option<f64>,

    /// Random seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pacing: normal, fixed, fast:<n> or slow:<n>
    #[arg(long)]
    pub time_scale: Option<TimeScale>,

    /// Only log, no round-by-round console output
    #[arg(short, long)]
    pub quiet: bool,

    /// Statistics file to write after the game
    #[arg(short, long, conflicts_with = "no_export")]
    pub export: Option<PathBuf>,

    /// Skip the statistics export
    #[arg(long)]
    pub no_export: bool,
}

impl Cli {
    /// Resolve the scenario this invocation describes
    pub fn scenario(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut scenario = match &self.config {
            Some(path) => ScenarioConfig::from_file(path)?,
            None => ScenarioConfig::default(),
        };
        self.apply(&mut scenario);
        Ok(scenario)
    }

    /// Overwrite the scenario with every flag that was given
    pub fn apply(&self, scenario: &mut ScenarioConfig) {
        let game = &mut scenario.game;
        if let Some(players) = self.players {
            game.total_players = players;
        }
        if let Some(light_duration) = self.light_duration {
            game.light_duration = light_duration;
        }
        if let Some(seed) = self.seed {
            game.seed = Some(seed);
        }
        if let Some(time_scale) = self.time_scale {
            game.time_scale = time_scale;
        }
        if self.quiet {
            game.verbose = false;
        }

        let run = &mut scenario.run;
        if let Some(duration) = self.duration {
            run.game_duration = duration;
        }
        if let Some(chance) = self.green_chance {
            run.green_move_chance = chance;
        }
        if let Some(chance) = self.red_chance {
            run.red_move_chance = chance;
        }

        if self.no_export {
            scenario.export_path = None;
        } else if let Some(path) = &self.export {
            scenario.export_path = Some(path.clone());
        }
    }
}
