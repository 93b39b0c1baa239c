use serde::{Deserialize, Serialize};

use super::{LightPhase, Player};
use crate::values::Timestamp;

/// Aggregate counters for one simulation run
///
/// Counters are written by the engine driving the run; everything else
/// only reads a snapshot. Serializes flat, one field per statistic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_rounds: u64,
    pub total_eliminations: u64,
    pub total_finishers: u64,
    pub green_light_moves: u64,
    pub red_light_moves: u64,
    pub red_light_eliminations: u64,
    /// Seconds between `start_time` and `end_time`; 0 until the timer ends
    pub game_duration: f64,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub average_speed: f64,
    pub average_field_length: f64,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timer(&mut self, now: Timestamp) {
        self.start_time = Some(now);
    }

    /// Record the end marker and derive the duration from the start marker
    pub fn end_timer(&mut self, now: Timestamp) {
        self.end_time = Some(now);
        if let Some(start) = self.start_time {
            let elapsed = now - start;
            self.game_duration = elapsed
                .to_std()
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
        }
    }

    /// Compute population-wide average speed and field length
    pub fn record_population(&mut self, players: &[Player]) {
        if players.is_empty() {
            return;
        }
        let n = players.len() as f64;
        self.average_speed = players.iter().map(Player::speed).sum::<f64>() / n;
        self.average_field_length = players.iter().map(Player::field_length).sum::<f64>() / n;
    }

    pub fn record_moves(&mut self, phase: LightPhase, count: u64) {
        match phase {
            LightPhase::Green => self.green_light_moves += count,
            LightPhase::Red => self.red_light_moves += count,
        }
    }

    pub fn record_elimination(&mut self, phase: LightPhase) {
        self.total_eliminations += 1;
        if phase.is_red() {
            self.red_light_eliminations += 1;
        }
    }

    pub fn record_finish(&mut self) {
        self.total_finishers += 1;
    }

    /// Share of red-light moves that ended in elimination
    pub fn red_light_elimination_rate(&self) -> Option<f64> {
        if self.red_light_moves == 0 {
            None
        } else {
            Some(self.red_light_eliminations as f64 / self.red_light_moves as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::PlayerId;
    use chrono::{Duration, Utc};

    #[test]
    fn test_stats_start_zeroed() {
        let stats = GameStats::new();

        assert_eq!(stats.total_rounds, 0);
        assert_eq!(stats.total_eliminations, 0);
        assert_eq!(stats.total_finishers, 0);
        assert_eq!(stats.green_light_moves, 0);
        assert_eq!(stats.red_light_moves, 0);
        assert_eq!(stats.red_light_eliminations, 0);
        assert_eq!(stats.game_duration, 0.0);
        assert!(stats.start_time.is_none());
        assert!(stats.end_time.is_none());
    }

    #[test]
    fn test_timer_duration() {
        let mut stats = GameStats::new();
        let start = Utc::now();

        stats.start_timer(start);
        assert_eq!(stats.game_duration, 0.0);

        stats.end_timer(start + Duration::milliseconds(2500));
        assert!((stats.game_duration - 2.5).abs() < 1e-9);
        assert_eq!(stats.start_time, Some(start));
    }

    #[test]
    fn test_end_timer_without_start_keeps_zero_duration() {
        let mut stats = GameStats::new();
        stats.end_timer(Utc::now());

        assert_eq!(stats.game_duration, 0.0);
        assert!(stats.end_time.is_some());
    }

    #[test]
    fn test_record_population_averages() {
        let players = vec![
            Player::with_track(PlayerId::new(1), 1.0, 10.0),
            Player::with_track(PlayerId::new(2), 2.0, 12.0),
        ];
        let mut stats = GameStats::new();

        stats.record_population(&players);

        assert!((stats.average_speed - 1.5).abs() < 1e-12);
        assert!((stats.average_field_length - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_phase_counters() {
        let mut stats = GameStats::new();

        stats.record_moves(LightPhase::Green, 4);
        stats.record_moves(LightPhase::Red, 2);
        stats.record_elimination(LightPhase::Red);
        stats.record_finish();

        assert_eq!(stats.green_light_moves, 4);
        assert_eq!(stats.red_light_moves, 2);
        assert_eq!(stats.total_eliminations, 1);
        assert_eq!(stats.red_light_eliminations, 1);
        assert_eq!(stats.total_finishers, 1);
        assert_eq!(stats.red_light_elimination_rate(), Some(0.5));
    }

    #[test]
    fn test_serializes_flat() {
        let mut stats = GameStats::new();
        stats.total_rounds = 12;
        stats.average_speed = 1.25;

        let value = serde_json::to_value(&stats).unwrap();
        let map = value.as_object().unwrap();

        for key in [
            "total_rounds",
            "total_eliminations",
            "total_finishers",
            "green_light_moves",
            "red_light_moves",
            "red_light_eliminations",
            "game_duration",
            "start_time",
            "end_time",
            "average_speed",
            "average_field_length",
        ] {
            assert!(map.contains_key(key), "missing {key}");
        }
        assert!(map.values().all(|v| !v.is_object() && !v.is_array()));
        assert_eq!(map["total_rounds"], 12);
        assert_eq!(map["average_speed"], 1.25);
    }
}
