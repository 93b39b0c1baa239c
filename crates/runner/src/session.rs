//! One game from scenario to exported statistics

use greenlight_core::Player;
use greenlight_engine::{ConfigError, Game, GameError, ScenarioConfig};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

use crate::console::ConsoleReporter;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// What happened to a session
pub struct SessionOutcome {
    pub game: Game,
    /// Players still on the field; `None` when the game was interrupted
    pub survivors: Option<Vec<Player>>,
    pub interrupted: bool,
    /// Where the statistics were written, if anywhere
    pub exported_to: Option<PathBuf>,
}

/// Play `scenario` until it ends or `shutdown` resolves, then export.
///
/// A shutdown stops the game between two awaits of the round loop; the run
/// is marked interrupted and its statistics are still exported.
pub async fn run_session<F>(
    scenario: &ScenarioConfig,
    shutdown: F,
) -> Result<SessionOutcome, RunnerError>
where
    F: Future<Output = ()>,
{
    scenario.validate()?;

    let mut game = Game::with_config(scenario.game.clone())?;
    if scenario.game.verbose {
        game = game.with_reporter(ConsoleReporter);
    }

    let result = tokio::select! {
        result = game.start(&scenario.run) => Some(result),
        _ = shutdown => None,
    };

    let (survivors, interrupted) = match result {
        Some(result) => (Some(result?), false),
        None => {
            game.interrupt();
            (None, true)
        }
    };

    let exported_to = match &scenario.export_path {
        Some(path) => {
            game.export_stats(path)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(SessionOutcome {
        game,
        survivors,
        interrupted,
        exported_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenlight_clock::TimeScale;
    use greenlight_engine::{GameConfig, GameState, RunConfig};
    use greenlight_ports::EndReason;

    fn scenario(time_scale: TimeScale) -> ScenarioConfig {
        ScenarioConfig {
            game: GameConfig::new(10, false, 1.0)
                .with_seed(4)
                .with_time_scale(time_scale),
            run: RunConfig::new(20, 0.8, 0.1),
            export_path: None,
        }
    }

    #[tokio::test]
    async fn test_session_runs_to_completion() {
        let outcome = run_session(&scenario(TimeScale::Fixed), std::future::pending())
            .await
            .unwrap();

        assert!(!outcome.interrupted);
        assert_eq!(outcome.game.state(), GameState::Ended);
        let survivors = outcome.survivors.unwrap();
        assert_eq!(survivors.len(), outcome.game.remaining_players().len());
        assert!(outcome.exported_to.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_game() {
        let shutdown = tokio::time::sleep(std::time::Duration::from_millis(20));

        let outcome = run_session(&scenario(TimeScale::Normal), shutdown)
            .await
            .unwrap();

        assert!(outcome.interrupted);
        assert!(outcome.survivors.is_none());
        assert_eq!(outcome.game.end_reason(), Some(EndReason::Interrupted));
        assert!(outcome.game.stats().end_time.is_some());
    }

    #[tokio::test]
    async fn test_invalid_scenario_is_rejected() {
        let mut scenario = scenario(TimeScale::Fixed);
        scenario.run.green_move_chance = 2.0;

        let result = run_session(&scenario, std::future::pending()).await;

        assert!(matches!(
            result,
            Err(RunnerError::Game(GameError::InvalidMoveChance { .. }))
        ));
    }

    #[tokio::test]
    async fn test_clock_failure_skips_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut scenario = scenario(TimeScale::Fast(0));
        scenario.export_path = Some(path.clone());

        let result = run_session(&scenario, std::future::pending()).await;

        assert!(matches!(result, Err(RunnerError::Game(GameError::Clock(_)))));
        assert!(!path.exists());
    }
}
