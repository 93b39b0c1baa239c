//! Reporter that writes the run to the `log` facade

use greenlight_ports::{FinalReport, GameIntro, GameReporter, RoundReport};
use log::{debug, info};
use std::time::Duration;

/// Default reporter: one info line per round, detail at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl GameReporter for LogReporter {
    fn game_started(&mut self, intro: &GameIntro) {
        info!(
            "Red Light, Green Light: {} players, {}s game, {}s lights (avg speed {:.2}, avg field {:.2})",
            intro.total_players,
            intro.game_duration,
            intro.light_duration,
            intro.average_speed,
            intro.average_field_length
        );
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) {
        info!(
            "Round {} [{}] moved={} stationary={} eliminated={} finished={} remaining={}",
            report.round,
            report.phase,
            report.moving.len(),
            report.stationary.len(),
            report.eliminated_this_round,
            report.finished_this_round,
            report.remaining_total
        );

        for player in report.eliminated() {
            debug!("Player {} eliminated at {:.2}", player.id(), player.position());
        }
        for player in report.finished() {
            debug!("Player {} crossed the finish line", player.id());
        }
    }

    fn waiting(&mut self, duration: Duration) {
        debug!("Waiting {:.2}s for the light to change", duration.as_secs_f64());
    }

    fn game_ended(&mut self, report: &FinalReport<'_>) {
        info!(
            "Game ended ({}): {} remaining, {} finished, {} eliminated of {} players",
            report.end_reason,
            report.remaining.len(),
            report.finished.len(),
            report.eliminated.len(),
            report.total_players
        );
        info!(
            "Survival rate {:.1}%, finish rate {:.1}%",
            report.survival_rate() * 100.0,
            report.finish_rate() * 100.0
        );
    }
}
