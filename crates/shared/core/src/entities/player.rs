use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::LightPhase;
use crate::values::PlayerId;

/// Distance covered per successful move, drawn once per track
pub const SPEED_RANGE: Range<f64> = 0.5..2.0;

/// Distance to the finish line, drawn once per track
pub const FIELD_LENGTH_RANGE: Range<f64> = 8.0..15.0;

/// Result of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Advanced without finishing
    Moved,
    /// Crossed the finish line on this move
    Finished,
    /// Caught moving on red
    Eliminated,
    /// Player was already eliminated or finished; nothing changed
    Ignored,
}

impl MoveOutcome {
    /// True for moves that did not eliminate the player
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Finished)
    }
}

/// A contestant and their race state
///
/// State only changes through [`Player::attempt_move`], [`Player::eliminate`]
/// and [`Player::reset`]. Once eliminated or finished the player is frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    position: f64,
    speed: f64,
    field_length: f64,
    eliminated: bool,
    elimination_round: Option<u64>,
    reached_finish: bool,
    finish_round: Option<u64>,
    total_moves: u64,
    successful_moves: u64,
}

impl Player {
    /// Create a player with zeroed progress and an undrawn track
    pub fn new(id: PlayerId) -> Self {
        Self::with_track(id, 0.0, 0.0)
    }

    /// Create a player with an explicit speed and field length
    pub fn with_track(id: PlayerId, speed: f64, field_length: f64) -> Self {
        Self {
            id,
            position: 0.0,
            speed,
            field_length,
            eliminated: false,
            elimination_round: None,
            reached_finish: false,
            finish_round: None,
            total_moves: 0,
            successful_moves: 0,
        }
    }

    /// Create a player and draw their track from `rng`
    pub fn random<R: Rng>(id: PlayerId, rng: &mut R) -> Self {
        let mut player = Self::new(id);
        player.draw_track(rng);
        player
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn field_length(&self) -> f64 {
        self.field_length
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn elimination_round(&self) -> Option<u64> {
        self.elimination_round
    }

    pub fn has_finished(&self) -> bool {
        self.reached_finish
    }

    pub fn finish_round(&self) -> Option<u64> {
        self.finish_round
    }

    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    pub fn successful_moves(&self) -> u64 {
        self.successful_moves
    }

    /// Neither eliminated nor finished
    pub fn is_remaining(&self) -> bool {
        !self.eliminated && !self.reached_finish
    }

    /// Fraction of the field covered, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.field_length > 0.0 {
            self.position / self.field_length
        } else {
            0.0
        }
    }

    /// Attempt one move during `phase`.
    ///
    /// Reaching the finish line is checked before the phase, so a move that
    /// crosses the line on red still finishes.
    pub fn attempt_move(&mut self, phase: LightPhase, round: u64) -> MoveOutcome {
        if !self.is_remaining() {
            return MoveOutcome::Ignored;
        }

        self.position += self.speed;
        self.total_moves += 1;

        if self.position >= self.field_length {
            self.position = self.field_length;
            self.reached_finish = true;
            self.finish_round = Some(round);
            self.successful_moves += 1;
            return MoveOutcome::Finished;
        }

        if phase.is_red() {
            self.eliminate(round);
            return MoveOutcome::Eliminated;
        }

        self.successful_moves += 1;
        MoveOutcome::Moved
    }

    /// Mark the player eliminated at `round`.
    ///
    /// Returns false and leaves the player untouched if they are already
    /// eliminated or finished.
    pub fn eliminate(&mut self, round: u64) -> bool {
        if !self.is_remaining() {
            return false;
        }
        self.eliminated = true;
        self.elimination_round = Some(round);
        true
    }

    /// Clear all progress and draw a fresh track
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        *self = Self::new(self.id);
        self.draw_track(rng);
    }

    fn draw_track<R: Rng>(&mut self, rng: &mut R) {
        self.speed = rng.gen_range(SPEED_RANGE);
        self.field_length = rng.gen_range(FIELD_LENGTH_RANGE);
    }
}
