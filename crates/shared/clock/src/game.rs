use chrono::{DateTime, Duration, Utc};
use greenlight_core::Timestamp;
use greenlight_ports::{Clock, ClockError, ClockResult};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::TimeScale;

/// Anchor pair used to derive simulated time from wall time
#[derive(Debug, Clone, Copy)]
struct ClockState {
    /// Wall time at the last re-anchor
    anchor_real: Timestamp,
    /// Simulated time at the last re-anchor
    anchor_sim: Timestamp,
    scale: TimeScale,
}

impl ClockState {
    /// Simulated time at `real_now`, saturating at the calendar's end
    fn sim_time(&self, real_now: Timestamp) -> Timestamp {
        let real_elapsed = real_now - self.anchor_real;

        let sim_elapsed = match self.scale {
            TimeScale::Normal => Some(real_elapsed),
            TimeScale::Fast(multiplier) => real_elapsed.checked_mul(clamp_factor(multiplier)),
            TimeScale::Slow(0) | TimeScale::Fixed => Some(Duration::zero()),
            TimeScale::Slow(divisor) => real_elapsed.checked_div(clamp_factor(divisor)),
        };

        sim_elapsed
            .and_then(|elapsed| self.anchor_sim.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

fn clamp_factor(factor: u32) -> i32 {
    i32::try_from(factor).unwrap_or(i32::MAX)
}

/// Scale factor as the i32 chrono multiplies and divides by
fn checked_factor(factor: u32) -> ClockResult<i32> {
    i32::try_from(factor)
        .map_err(|_| ClockError::OutOfRange(format!("time scale factor {factor} is too large")))
}

/// Simulation clock that paces a game
///
/// Simulated time is derived from wall time through the current
/// [`TimeScale`]. Changing the scale re-anchors the clock so simulated time
/// never jumps.
pub struct GameClock {
    state: RwLock<ClockState>,
}

impl GameClock {
    /// Create a new game clock
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    /// * `scale` - How simulated time relates to wall time
    pub fn new(initial_time: Option<Timestamp>, scale: TimeScale) -> Arc<Self> {
        let real_now = Utc::now();

        Arc::new(Self {
            state: RwLock::new(ClockState {
                anchor_real: real_now,
                anchor_sim: initial_time.unwrap_or(real_now),
                scale,
            }),
        })
    }

    /// A frozen clock that only moves through [`GameClock::sleep`] or [`GameClock::advance`]
    pub fn fixed() -> Arc<Self> {
        Self::new(None, TimeScale::Fixed)
    }

    pub fn time_scale(&self) -> TimeScale {
        self.state.read().scale
    }

    /// Set the time scale, keeping the current simulated time
    pub fn set_time_scale(&self, scale: TimeScale) {
        let mut state = self.state.write();
        let real_now = Utc::now();
        state.anchor_sim = state.sim_time(real_now);
        state.anchor_real = real_now;
        state.scale = scale;
    }

    /// Advance the simulated time by a specified duration
    pub fn advance(&self, duration: Duration) {
        self.state.write().anchor_sim += duration;
    }

    /// Wait out `duration` of simulated time.
    ///
    /// Real clocks sleep for the scaled wall duration; a fixed clock advances
    /// immediately.
    pub async fn sleep(&self, duration: Duration) -> ClockResult<()> {
        let real_duration = match self.time_scale() {
            TimeScale::Normal => duration,
            TimeScale::Fast(0) | TimeScale::Slow(0) => return Err(ClockError::ZeroDivisor),
            TimeScale::Fast(multiplier) => duration / checked_factor(multiplier)?,
            TimeScale::Slow(divisor) => {
                duration.checked_mul(checked_factor(divisor)?).ok_or_else(|| {
                    ClockError::OutOfRange(format!("{duration} slowed by {divisor}"))
                })?
            }
            TimeScale::Fixed => {
                self.advance(duration);
                return Ok(());
            }
        };

        let real_duration = real_duration
            .to_std()
            .map_err(|e| ClockError::OutOfRange(e.to_string()))?;
        tokio::time::sleep(real_duration).await;
        Ok(())
    }
}

impl Clock for GameClock {
    fn now(&self) -> Timestamp {
        self.state.read().sim_time(Utc::now())
    }

    fn name(&self) -> &str {
        "GameClock"
    }
}
