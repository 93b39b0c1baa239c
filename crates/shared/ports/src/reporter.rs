use greenlight_core::{GameStats, LightPhase, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The run-duration budget was used up
    TimeExpired,
    /// Every player crossed the finish line
    AllFinished,
    /// No player is left unresolved (eliminated or finished)
    AllResolved,
    /// Stopped from outside while running
    Interrupted,
    /// Aborted by a runtime failure
    Failed,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::TimeExpired => "time expired",
            EndReason::AllFinished => "all players finished",
            EndReason::AllResolved => "no players remaining",
            EndReason::Interrupted => "interrupted",
            EndReason::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// Run parameters and population averages, emitted once before round 1
#[derive(Debug, Clone, PartialEq)]
pub struct GameIntro {
    pub total_players: usize,
    pub game_duration: u64,
    pub light_duration: f64,
    pub green_move_chance: f64,
    pub red_move_chance: f64,
    pub average_speed: f64,
    pub average_field_length: f64,
}

/// Outcome of one round
///
/// `moving` and `stationary` are in population order and reflect player
/// state after the round's moves were applied.
#[derive(Debug, Clone)]
pub struct RoundReport<'a> {
    pub round: u64,
    pub phase: LightPhase,
    pub moving: Vec<&'a Player>,
    pub stationary: Vec<&'a Player>,
    pub eliminated_this_round: usize,
    pub finished_this_round: usize,
    pub remaining_total: usize,
    pub finished_total: usize,
}

impl<'a> RoundReport<'a> {
    /// Players eliminated during this round
    pub fn eliminated(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.moving.iter().copied().filter(|p| p.is_eliminated())
    }

    /// Players that crossed the finish line during this round
    pub fn finished(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.moving.iter().copied().filter(|p| p.has_finished())
    }
}

/// Final categorization of the population after a run
#[derive(Debug, Clone)]
pub struct FinalReport<'a> {
    pub total_players: usize,
    pub end_reason: EndReason,
    pub stats: &'a GameStats,
    pub remaining: Vec<&'a Player>,
    pub finished: Vec<&'a Player>,
    pub eliminated: Vec<&'a Player>,
}

impl FinalReport<'_> {
    pub fn survival_rate(&self) -> f64 {
        rate(self.remaining.len(), self.total_players)
    }

    pub fn finish_rate(&self) -> f64 {
        rate(self.finished.len(), self.total_players)
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Port for presenting a run to a human or a log
///
/// The engine only calls a reporter when running verbose. Nothing a
/// reporter does feeds back into the simulation.
pub trait GameReporter {
    fn game_started(&mut self, _intro: &GameIntro) {}

    fn round_completed(&mut self, _report: &RoundReport<'_>) {}

    /// Called before the engine waits out the rest of the light phase
    fn waiting(&mut self, _duration: Duration) {}

    fn game_ended(&mut self, _report: &FinalReport<'_>) {}
}
