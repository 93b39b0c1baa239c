//! Console presentation of a game
//!
//! Formatting lives in free functions that return text so the layout can be
//! checked without capturing stdout. [`ConsoleReporter`] just prints it.

use greenlight_core::Player;
use greenlight_ports::{EndReason, FinalReport, GameIntro, GameReporter, RoundReport};
use std::fmt::Write;
use std::time::Duration;

/// Players listed per moving/stationary line
const ROUND_LIST_LIMIT: usize = 8;
/// Players listed per eliminated/finished line
const OUTCOME_LIST_LIMIT: usize = 5;
/// Rows in the winners and leaders tables
const TABLE_LIMIT: usize = 10;

const RULE_WIDTH: usize = 60;

/// Reporter that prints to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl GameReporter for ConsoleReporter {
    fn game_started(&mut self, intro: &GameIntro) {
        print!("{}", intro_banner(intro));
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) {
        print!("{}", round_summary(report));
    }

    fn waiting(&mut self, duration: Duration) {
        println!("⏳ Waiting {:.1} seconds...", duration.as_secs_f64());
    }

    fn game_ended(&mut self, report: &FinalReport<'_>) {
        print!("{}", final_summary(report));
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn intro_banner(intro: &GameIntro) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎮 Red Light, Green Light Starting!");
    let _ = writeln!(out, "👥 Total Players: {}", intro.total_players);
    let _ = writeln!(out, "⏱️  Game Duration: {} seconds", intro.game_duration);
    let _ = writeln!(out, "🔄 Light Duration: {} seconds", intro.light_duration);
    let _ = writeln!(out, "📊 Green Move Chance: {:.1}%", intro.green_move_chance * 100.0);
    let _ = writeln!(out, "📊 Red Move Chance: {:.1}%", intro.red_move_chance * 100.0);
    let _ = writeln!(out, "🏃 Average Speed: {:.2} units/round", intro.average_speed);
    let _ = writeln!(out, "📏 Average Field Length: {:.2} units", intro.average_field_length);
    let _ = writeln!(out, "{}", rule());
    out
}

/// `id(position)` entries, truncated to `limit` with a trailing ellipsis
fn player_list<F>(players: &[&Player], limit: usize, entry: F) -> String
where
    F: Fn(&Player) -> String,
{
    let shown: Vec<String> = players.iter().take(limit).map(|&p| entry(p)).collect();
    let more = if players.len() > limit { "..." } else { "" };
    format!("{}{}", shown.join(", "), more)
}

pub fn round_summary(report: &RoundReport<'_>) -> String {
    let mut out = String::new();
    let emoji = if report.phase.is_red() { "🔴" } else { "🟢" };
    let _ = writeln!(out, "\n{} Round {}: {} Light", emoji, report.round, report.phase);

    if report.moving.is_empty() {
        let _ = writeln!(out, "🏃 Moved (0): None");
    } else {
        let list = player_list(&report.moving, ROUND_LIST_LIMIT, |p| {
            let flag = if p.has_finished() { "🏁" } else { "" };
            format!("{}({:.1}){}", p.id(), p.position(), flag)
        });
        let _ = writeln!(out, "🏃 Moved ({}): {}", report.moving.len(), list);
    }

    if report.stationary.is_empty() {
        let _ = writeln!(out, "🛑 Static (0): None");
    } else {
        let list = player_list(&report.stationary, ROUND_LIST_LIMIT, |p| {
            format!("{}({:.1})", p.id(), p.position())
        });
        let _ = writeln!(out, "🛑 Static ({}): {}", report.stationary.len(), list);
    }

    if report.eliminated_this_round > 0 {
        let eliminated: Vec<&Player> = report.eliminated().collect();
        let list = player_list(&eliminated, OUTCOME_LIST_LIMIT, |p| {
            format!("{}({:.1})", p.id(), p.position())
        });
        let _ = writeln!(out, "💀 Eliminated ({}): {}", report.eliminated_this_round, list);
    } else {
        let _ = writeln!(out, "✅ Eliminated: None");
    }

    if report.finished_this_round > 0 {
        let finished: Vec<&Player> = report.finished().collect();
        let list = player_list(&finished, OUTCOME_LIST_LIMIT, |p| {
            format!("{}({:.1})", p.id(), p.field_length())
        });
        let _ = writeln!(out, "🏁 Finished ({}): {}", report.finished_this_round, list);
    }

    let _ = writeln!(
        out,
        "👥 Remaining: {} players | 🏁 Finished: {} players",
        report.remaining_total, report.finished_total
    );
    out
}

/// Finishers ordered by finish round, ties by id
pub fn winners<'a>(finished: &[&'a Player]) -> Vec<&'a Player> {
    let mut winners = finished.to_vec();
    winners.sort_by_key(|p| (p.finish_round().unwrap_or(u64::MAX), p.id()));
    winners
}

/// Survivors ordered by position descending, ties by id descending
pub fn leaders<'a>(remaining: &[&'a Player]) -> Vec<&'a Player> {
    let mut leaders = remaining.to_vec();
    leaders.sort_by(|a, b| {
        b.position()
            .total_cmp(&a.position())
            .then_with(|| b.id().cmp(&a.id()))
    });
    leaders
}

fn end_notice(reason: EndReason) -> Option<&'static str> {
    match reason {
        EndReason::AllResolved => Some("💀 No players left on the field!"),
        EndReason::AllFinished => Some("🏁 All players finished!"),
        EndReason::TimeExpired => Some("⏰ Time is up!"),
        EndReason::Interrupted => Some("⏹️  Game interrupted"),
        EndReason::Failed => None,
    }
}

pub fn final_summary(report: &FinalReport<'_>) -> String {
    let stats = report.stats;
    let mut out = String::new();

    if let Some(notice) = end_notice(report.end_reason) {
        let _ = writeln!(out, "\n{}", notice);
    }

    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "🏁 GAME SUMMARY");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "🔢 Total Rounds: {}", stats.total_rounds);
    let _ = writeln!(out, "⏱️  Game Duration: {:.1} seconds", stats.game_duration);
    let _ = writeln!(out, "👥 Starting Players: {}", report.total_players);
    let _ = writeln!(out, "🙂 Surviving Players: {}", report.remaining.len());
    let _ = writeln!(out, "🏁 Finished Players: {}", report.finished.len());
    let _ = writeln!(out, "💀 Eliminated Players: {}", report.eliminated.len());
    let _ = writeln!(out, "📊 Survival Rate: {:.1}%", report.survival_rate() * 100.0);
    let _ = writeln!(out, "📊 Finish Rate: {:.1}%", report.finish_rate() * 100.0);

    let winners = winners(&report.finished);
    if !winners.is_empty() {
        let _ = writeln!(out, "\n🏆 WINNERS (Finished Players):");
        for (i, p) in winners.iter().take(TABLE_LIMIT).enumerate() {
            let _ = writeln!(
                out,
                "  {}. Player {} - Finished Round {} (Speed: {:.2}, Field: {:.1})",
                i + 1,
                p.id(),
                p.finish_round().unwrap_or_default(),
                p.speed(),
                p.field_length()
            );
        }
        if winners.len() > TABLE_LIMIT {
            let _ = writeln!(out, "  ... and {} more", winners.len() - TABLE_LIMIT);
        }
    }

    let leaders = leaders(&report.remaining);
    if !leaders.is_empty() {
        let _ = writeln!(out, "\n🏃 LEADERS (Still Playing):");
        for (i, p) in leaders.iter().take(TABLE_LIMIT).enumerate() {
            let _ = writeln!(
                out,
                "  {}. Player {} - Position {:.1}/{:.1} ({:.1}%) (Speed: {:.2})",
                i + 1,
                p.id(),
                p.position(),
                p.field_length(),
                p.progress() * 100.0,
                p.speed()
            );
        }
        if leaders.len() > TABLE_LIMIT {
            let _ = writeln!(out, "  ... and {} more", leaders.len() - TABLE_LIMIT);
        }
    }

    let _ = writeln!(out, "\n📈 MOVEMENT STATISTICS:");
    let _ = writeln!(out, "  🟢 Green Light Moves: {}", stats.green_light_moves);
    let _ = writeln!(out, "  🔴 Red Light Moves: {}", stats.red_light_moves);
    let _ = writeln!(out, "  💀 Red Light Eliminations: {}", stats.red_light_eliminations);
    let _ = writeln!(out, "  🏁 Total Finishers: {}", stats.total_finishers);
    let _ = writeln!(out, "  🏃 Average Speed: {:.2} units/round", stats.average_speed);
    let _ = writeln!(out, "  📏 Average Field Length: {:.2} units", stats.average_field_length);
    if let Some(rate) = stats.red_light_elimination_rate() {
        let _ = writeln!(out, "  ⚠️  Red Light Elimination Rate: {:.1}%", rate * 100.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenlight_core::{GameStats, LightPhase, PlayerId};

    fn ids(players: &[&Player]) -> Vec<PlayerId> {
        players.iter().map(|p| p.id()).collect()
    }

    fn player(seq: u32, speed: f64, field_length: f64) -> Player {
        Player::with_track(PlayerId::new(seq), speed, field_length)
    }

    fn advanced(seq: u32, steps: u64) -> Player {
        let mut p = player(seq, 1.0, 10.0);
        for round in 1..=steps {
            p.attempt_move(LightPhase::Green, round);
        }
        p
    }

    #[test]
    fn test_winners_sorted_by_round_then_id() {
        let a = advanced(4, 10);
        let b = advanced(2, 10);
        let mut c = player(1, 2.0, 10.0);
        for round in 1..=5 {
            c.attempt_move(LightPhase::Green, round);
        }

        let sorted = winners(&[&a, &b, &c]);

        assert_eq!(ids(&sorted), vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(4)]);
    }

    #[test]
    fn test_leaders_sorted_by_position_then_id_desc() {
        let a = advanced(1, 3);
        let b = advanced(2, 5);
        let c = advanced(3, 3);

        let sorted = leaders(&[&a, &b, &c]);

        assert_eq!(ids(&sorted), vec![PlayerId::new(2), PlayerId::new(3), PlayerId::new(1)]);
    }

    #[test]
    fn test_round_summary_truncates_lists() {
        let players: Vec<Player> = (1..=10).map(|i| advanced(i, 1)).collect();
        let refs: Vec<&Player> = players.iter().collect();
        let report = RoundReport {
            round: 3,
            phase: LightPhase::Green,
            moving: refs.clone(),
            stationary: Vec::new(),
            eliminated_this_round: 0,
            finished_this_round: 0,
            remaining_total: 10,
            finished_total: 0,
        };

        let text = round_summary(&report);

        assert!(text.contains("🟢 Round 3: Green Light"));
        assert!(text.contains("🏃 Moved (10): 001(1.0), 002(1.0)"));
        assert!(text.contains("008(1.0)..."));
        assert!(!text.contains("009(1.0)"));
        assert!(text.contains("🛑 Static (0): None"));
        assert!(text.contains("✅ Eliminated: None"));
        assert!(text.contains("👥 Remaining: 10 players | 🏁 Finished: 0 players"));
    }

    #[test]
    fn test_round_summary_lists_outcomes() {
        let mut caught = player(1, 1.0, 10.0);
        caught.attempt_move(LightPhase::Red, 2);
        let mut home = player(2, 2.0, 3.0);
        home.attempt_move(LightPhase::Green, 1);
        home.attempt_move(LightPhase::Red, 2);
        let still = player(3, 1.0, 10.0);

        let report = RoundReport {
            round: 2,
            phase: LightPhase::Red,
            moving: vec![&caught, &home],
            stationary: vec![&still],
            eliminated_this_round: 1,
            finished_this_round: 1,
            remaining_total: 1,
            finished_total: 1,
        };

        let text = round_summary(&report);

        assert!(text.contains("🔴 Round 2: Red Light"));
        assert!(text.contains("002(3.0)🏁"));
        assert!(text.contains("🛑 Static (1): 003(0.0)"));
        assert!(text.contains("💀 Eliminated (1): 001(1.0)"));
        assert!(text.contains("🏁 Finished (1): 002(3.0)"));
    }

    #[test]
    fn test_final_summary_sections() {
        let finished = advanced(1, 10);
        let running = advanced(2, 4);
        let mut out = player(3, 1.0, 10.0);
        out.eliminate(2);

        let stats = GameStats {
            total_rounds: 12,
            red_light_moves: 4,
            red_light_eliminations: 1,
            ..GameStats::default()
        };
        let report = FinalReport {
            total_players: 3,
            end_reason: EndReason::TimeExpired,
            stats: &stats,
            remaining: vec![&running],
            finished: vec![&finished],
            eliminated: vec![&out],
        };

        let text = final_summary(&report);

        assert!(text.contains("⏰ Time is up!"));
        assert!(text.contains("🔢 Total Rounds: 12"));
        assert!(text.contains("📊 Survival Rate: 33.3%"));
        assert!(text.contains("1. Player 001 - Finished Round 10"));
        assert!(text.contains("1. Player 002 - Position 4.0/10.0 (40.0%)"));
        assert!(text.contains("Red Light Elimination Rate: 25.0%"));
    }

    #[test]
    fn test_final_summary_without_red_moves() {
        let stats = GameStats::default();
        let report = FinalReport {
            total_players: 0,
            end_reason: EndReason::Failed,
            stats: &stats,
            remaining: Vec::new(),
            finished: Vec::new(),
            eliminated: Vec::new(),
        };

        let text = final_summary(&report);

        assert!(!text.contains("Elimination Rate"));
        assert!(!text.contains("WINNERS"));
        assert!(!text.contains("LEADERS"));
        assert!(text.contains("📊 Finish Rate: 0.0%"));
    }
}
