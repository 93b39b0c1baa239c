//! JSON statistics export
//!
//! The document has three top-level sections:
//!
//! ```json
//! {
//!   "game_config": { "total_players": 20, "light_duration": 2.0, "game_duration": 60 },
//!   "statistics": { "total_rounds": 30, ... },
//!   "players": { "remaining": [...], "finished": [...], "eliminated": [...] }
//! }
//! ```

use greenlight_core::{GameStats, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::RunConfig;
use crate::error::{GameError, Result};
use crate::game::Game;

/// Run length reported for a game that was never started
const UNSTARTED_GAME_DURATION: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameExport {
    pub game_config: ExportedConfig,
    pub statistics: GameStats,
    pub players: ExportedPlayers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedConfig {
    pub total_players: usize,
    pub light_duration: f64,
    pub game_duration: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportedPlayers {
    pub remaining: Vec<PlayerRecord>,
    pub finished: Vec<PlayerRecord>,
    pub eliminated: Vec<PlayerRecord>,
}

/// Exported view of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub position: f64,
    pub field_length: f64,
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_round: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elimination_round: Option<u64>,
    pub total_moves: u64,
    pub successful_moves: u64,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            position: player.position(),
            field_length: player.field_length(),
            speed: player.speed(),
            finish_round: player.finish_round(),
            elimination_round: player.elimination_round(),
            total_moves: player.total_moves(),
            successful_moves: player.successful_moves(),
        }
    }
}

impl GameExport {
    pub fn from_game(game: &Game) -> Self {
        let records = |players: Vec<&Player>| -> Vec<PlayerRecord> {
            players.into_iter().map(PlayerRecord::from).collect()
        };

        Self {
            game_config: ExportedConfig {
                total_players: game.total_players(),
                light_duration: game.config().light_duration,
                game_duration: game
                    .last_run()
                    .map(|run: &RunConfig| run.game_duration)
                    .unwrap_or(UNSTARTED_GAME_DURATION),
            },
            statistics: game.stats().clone(),
            players: ExportedPlayers {
                remaining: records(game.remaining_players()),
                finished: records(game.finished_players()),
                eliminated: records(game.eliminated_players()),
            },
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let export_error = |source: std::io::Error| GameError::Export {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(export_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(export_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use greenlight_clock::TimeScale;
    use greenlight_core::LightPhase;

    fn staged_game() -> Game {
        let config = GameConfig::new(5, false, 1.5)
            .with_seed(99)
            .with_time_scale(TimeScale::Fixed);
        let mut game = Game::with_config(config).unwrap();
        let players = game.players_mut();
        players[0].eliminate(3);
        while !players[4].has_finished() {
            players[4].attempt_move(LightPhase::Green, 7);
        }
        game
    }

    #[test]
    fn test_unstarted_game_uses_default_duration() {
        let export = staged_game().snapshot();

        assert_eq!(export.game_config.total_players, 5);
        assert_eq!(export.game_config.light_duration, 1.5);
        assert_eq!(export.game_config.game_duration, 60);
    }

    #[test]
    fn test_players_are_bucketed() {
        let export = staged_game().snapshot();

        let ids = |records: &[PlayerRecord]| {
            records.iter().map(|r| r.id.to_string()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&export.players.remaining), vec!["002", "003", "004"]);
        assert_eq!(ids(&export.players.finished), vec!["005"]);
        assert_eq!(ids(&export.players.eliminated), vec!["001"]);
        assert_eq!(export.players.eliminated[0].elimination_round, Some(3));
        assert_eq!(export.players.finished[0].finish_round, Some(7));
    }

    #[test]
    fn test_optional_rounds_are_omitted() {
        let json = staged_game().snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let remaining = &value["players"]["remaining"][0];
        assert_eq!(remaining["id"], "002");
        assert!(remaining.get("finish_round").is_none());
        assert!(remaining.get("elimination_round").is_none());
        assert_eq!(remaining["total_moves"], 0);

        let finished = &value["players"]["finished"][0];
        assert_eq!(finished["finish_round"], 7);
        assert!(finished.get("elimination_round").is_none());

        assert!(value["statistics"]["total_rounds"].is_u64());
        assert!(value["statistics"]["start_time"].is_null());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("stats.json");

        let err = staged_game().snapshot().write_to(&path).unwrap_err();

        assert!(matches!(err, GameError::Export { .. }));
    }

    #[test]
    fn test_written_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let export = staged_game().snapshot();

        export.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: GameExport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.game_config.total_players, 5);
        assert_eq!(parsed.statistics.total_rounds, export.statistics.total_rounds);
        assert_eq!(parsed.players.remaining.len(), 3);
        assert_eq!(parsed.players.finished[0].id, export.players.finished[0].id);
        assert_eq!(parsed.players.eliminated[0].elimination_round, Some(3));
    }
}
