//! Game engine - owns the population and drives the round loop
//!
//! One run walks the state machine `NotStarted -> Running -> Ended`:
//!
//! ```text
//! round += 1
//! sample moving players at the phase's move chance
//! apply moves in population order, count eliminations and finishes
//! report the round (verbose only)
//! stop when nobody is left unresolved
//! wait min(light duration, remaining budget), flip the light
//! ```
//!
//! A finished game only runs again after [`Game::reset`].

use chrono::Duration;
use greenlight_clock::{Clock, GameClock};
use greenlight_core::{GameStats, LightPhase, MoveOutcome, Player, PlayerId};
use greenlight_ports::{EndReason, FinalReport, GameIntro, GameReporter, RoundReport};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::config::{GameConfig, RunConfig};
use crate::error::{GameError, Result};
use crate::export::GameExport;
use crate::reporting::LogReporter;

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
    Ended,
}

/// Red Light, Green Light simulation
pub struct Game {
    config: GameConfig,
    /// Length of one light phase
    light_phase: Duration,
    /// Population in creation order
    players: Vec<Player>,
    stats: GameStats,
    rng: StdRng,
    clock: Arc<GameClock>,
    reporter: Box<dyn GameReporter>,
    state: GameState,
    phase: LightPhase,
    round: u64,
    last_run: Option<RunConfig>,
    end_reason: Option<EndReason>,
}

impl Game {
    /// Create a game with default seed and time scale
    pub fn new(total_players: usize, verbose: bool, light_duration: f64) -> Result<Self> {
        Self::with_config(GameConfig::new(total_players, verbose, light_duration))
    }

    /// Create a game from a full configuration
    pub fn with_config(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a game drawing all randomness from `rng`
    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let light_phase = config.light_phase()?;
        let players = create_players(config.total_players, &mut rng);
        let clock = GameClock::new(None, config.time_scale);

        Ok(Self {
            config,
            light_phase,
            players,
            stats: GameStats::new(),
            rng,
            clock,
            reporter: Box::new(LogReporter),
            state: GameState::NotStarted,
            phase: LightPhase::Green,
            round: 0,
            last_run: None,
            end_reason: None,
        })
    }

    /// Replace the reporting collaborator
    pub fn with_reporter(mut self, reporter: impl GameReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Pace the game with an externally owned clock
    pub fn with_clock(mut self, clock: Arc<GameClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn total_players(&self) -> usize {
        self.config.total_players
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Mutable access to the population, for staging scenarios
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn clock(&self) -> &Arc<GameClock> {
        &self.clock
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> LightPhase {
        self.phase
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Run configuration of the last started run
    pub fn last_run(&self) -> Option<&RunConfig> {
        self.last_run.as_ref()
    }

    /// Players neither eliminated nor finished
    pub fn remaining_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_remaining()).collect()
    }

    pub fn finished_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.has_finished()).collect()
    }

    pub fn eliminated_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_eliminated()).collect()
    }

    /// Remaining players that are not in `moving`
    pub fn stationary_players(&self, moving: &[PlayerId]) -> Vec<&Player> {
        stationary(&self.players, moving)
    }

    /// Independently sample each remaining player with probability `move_chance`
    pub fn sample_moving_players(&mut self, move_chance: f64) -> Result<Vec<PlayerId>> {
        if !(0.0..=1.0).contains(&move_chance) {
            return Err(GameError::InvalidMoveChance {
                phase: self.phase,
                value: move_chance,
            });
        }

        let mut moving = Vec::new();
        for player in self.players.iter().filter(|p| p.is_remaining()) {
            if self.rng.gen_bool(move_chance) {
                moving.push(player.id());
            }
        }
        Ok(moving)
    }

    /// Run the game until the budget is spent or nobody is left unresolved.
    ///
    /// Returns the players still on the field when the run ended. Finishers
    /// are not included.
    pub async fn start(&mut self, run: &RunConfig) -> Result<Vec<Player>> {
        run.validate()?;
        if self.state != GameState::NotStarted {
            return Err(GameError::InvalidState(format!(
                "cannot start a game in state {:?}; reset it first",
                self.state
            )));
        }
        let budget = run.budget()?;

        self.state = GameState::Running;
        self.last_run = Some(run.clone());
        self.phase = LightPhase::Green;
        self.round = 0;
        self.stats.record_population(&self.players);

        let started_at = self.clock.now();
        self.stats.start_timer(started_at);

        info!(
            "Game starting: {} players, {}s budget, {}s lights, move chance green {:.1}% / red {:.1}%",
            self.players.len(),
            run.game_duration,
            self.config.light_duration,
            run.green_move_chance * 100.0,
            run.red_move_chance * 100.0
        );

        if self.config.verbose {
            let intro = GameIntro {
                total_players: self.players.len(),
                game_duration: run.game_duration,
                light_duration: self.config.light_duration,
                green_move_chance: run.green_move_chance,
                red_move_chance: run.red_move_chance,
                average_speed: self.stats.average_speed,
                average_field_length: self.stats.average_field_length,
            };
            self.reporter.game_started(&intro);
        }

        let outcome = self.run_rounds(run, budget).await;

        self.stats.end_timer(self.clock.now());
        self.state = GameState::Ended;

        match outcome {
            Ok(reason) => {
                self.end_reason = Some(reason);
                info!(
                    "Game over after {} rounds ({}): {} remaining, {} finished, {} eliminated",
                    self.stats.total_rounds,
                    reason,
                    self.remaining_count(),
                    self.stats.total_finishers,
                    self.stats.total_eliminations
                );
                self.report_final();
                Ok(self.remaining_players().into_iter().cloned().collect())
            }
            Err(e) => {
                self.end_reason = Some(EndReason::Failed);
                warn!("Game aborted in round {}: {}", self.round, e);
                Err(e)
            }
        }
    }

    async fn run_rounds(&mut self, run: &RunConfig, budget: Duration) -> Result<EndReason> {
        let started_at = self.stats.start_time.unwrap_or_else(|| self.clock.now());

        loop {
            let elapsed = self.clock.now() - started_at;
            if elapsed >= budget {
                return Ok(EndReason::TimeExpired);
            }

            self.round += 1;
            self.stats.total_rounds = self.round;
            let phase = self.phase;

            let moving = self.sample_moving_players(run.move_chance(phase))?;
            let stationary_ids: Vec<PlayerId> = self
                .stationary_players(&moving)
                .iter()
                .map(|p| p.id())
                .collect();
            self.stats.record_moves(phase, moving.len() as u64);

            let (eliminated, finished) = self.apply_moves(phase, &moving);

            debug!(
                "Round {} ({}): {} moved, {} stationary, {} eliminated, {} finished",
                self.round,
                phase,
                moving.len(),
                stationary_ids.len(),
                eliminated,
                finished
            );

            if self.config.verbose {
                let report = RoundReport {
                    round: self.round,
                    phase,
                    moving: select(&self.players, &moving),
                    stationary: select(&self.players, &stationary_ids),
                    eliminated_this_round: eliminated,
                    finished_this_round: finished,
                    remaining_total: self.players.iter().filter(|p| p.is_remaining()).count(),
                    finished_total: self.players.iter().filter(|p| p.has_finished()).count(),
                };
                self.reporter.round_completed(&report);
            }

            if let Some(reason) = self.resolution() {
                return Ok(reason);
            }

            let wait = std::cmp::min(self.light_phase, budget - elapsed);
            if wait > Duration::zero() {
                if self.config.verbose {
                    if let Ok(wait) = wait.to_std() {
                        self.reporter.waiting(wait);
                    }
                }
                self.clock.sleep(wait).await?;
            }

            self.phase = phase.toggled();
        }
    }

    /// Move every sampled player, in population order
    fn apply_moves(&mut self, phase: LightPhase, moving: &[PlayerId]) -> (usize, usize) {
        let moving: HashSet<PlayerId> = moving.iter().copied().collect();
        let round = self.round;
        let mut eliminated = 0;
        let mut finished = 0;

        for player in self.players.iter_mut().filter(|p| moving.contains(&p.id())) {
            match player.attempt_move(phase, round) {
                MoveOutcome::Eliminated => {
                    eliminated += 1;
                    self.stats.record_elimination(phase);
                }
                MoveOutcome::Finished => {
                    finished += 1;
                    self.stats.record_finish();
                }
                MoveOutcome::Moved | MoveOutcome::Ignored => {}
            }
        }

        (eliminated, finished)
    }

    /// Termination check run after every round
    fn resolution(&self) -> Option<EndReason> {
        if self.players.iter().all(Player::has_finished) {
            Some(EndReason::AllFinished)
        } else if !self.players.iter().any(Player::is_remaining) {
            Some(EndReason::AllResolved)
        } else {
            None
        }
    }

    fn remaining_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_remaining()).count()
    }

    fn report_final(&mut self) {
        if !self.config.verbose {
            return;
        }
        let Some(end_reason) = self.end_reason else {
            return;
        };

        let report = FinalReport {
            total_players: self.config.total_players,
            end_reason,
            stats: &self.stats,
            remaining: self.players.iter().filter(|p| p.is_remaining()).collect(),
            finished: self.players.iter().filter(|p| p.has_finished()).collect(),
            eliminated: self.players.iter().filter(|p| p.is_eliminated()).collect(),
        };
        self.reporter.game_ended(&report);
    }

    /// Stop a running game from outside the round loop.
    ///
    /// Call this after dropping the `start` future (e.g. on Ctrl-C). The
    /// timer is closed and everything collected so far stays exportable.
    /// Returns false if the game was not running.
    pub fn interrupt(&mut self) -> bool {
        if self.state != GameState::Running {
            warn!("Interrupt ignored: game is {:?}", self.state);
            return false;
        }

        self.stats.end_timer(self.clock.now());
        self.state = GameState::Ended;
        self.end_reason = Some(EndReason::Interrupted);
        warn!("Game interrupted in round {}", self.round);
        self.report_final();
        true
    }

    /// Fresh population of the same size and fresh statistics
    pub fn reset(&mut self) {
        self.players = create_players(self.config.total_players, &mut self.rng);
        self.stats = GameStats::new();
        self.state = GameState::NotStarted;
        self.phase = LightPhase::Green;
        self.round = 0;
        self.last_run = None;
        self.end_reason = None;
        debug!("Game reset with {} players", self.players.len());
    }

    /// Build the statistics document for the current state
    pub fn snapshot(&self) -> GameExport {
        GameExport::from_game(self)
    }

    /// Write the statistics document as JSON to `path`
    pub fn export_stats(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.snapshot().write_to(path)?;
        info!("Statistics exported to {}", path.display());
        Ok(())
    }
}

fn create_players(total_players: usize, rng: &mut StdRng) -> Vec<Player> {
    (1..=total_players)
        .map(|seq| Player::random(PlayerId::new(seq as u32), rng))
        .collect()
}

fn stationary<'a>(players: &'a [Player], moving: &[PlayerId]) -> Vec<&'a Player> {
    let moving: HashSet<&PlayerId> = moving.iter().collect();
    players
        .iter()
        .filter(|p| p.is_remaining() && !moving.contains(&p.id()))
        .collect()
}

/// Players whose id is in `ids`, in population order
fn select<'a>(players: &'a [Player], ids: &[PlayerId]) -> Vec<&'a Player> {
    let ids: HashSet<&PlayerId> = ids.iter().collect();
    players.iter().filter(|p| ids.contains(&p.id())).collect()
}
