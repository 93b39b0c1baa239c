//! Green Light Clock Infrastructure
//!
//! Provides the time source that paces a game. A single [`GameClock`]
//! answers "what time is it" and "wait out this light phase", scaled by a
//! [`TimeScale`]:
//!
//! ```text
//! Normal   wall-clock time, sleeps for real
//! Fast(n)  n simulated seconds per real second
//! Slow(n)  one simulated second per n real seconds
//! Fixed    frozen; sleeping only advances the clock
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use greenlight_clock::{GameClock, TimeScale};
//! use chrono::Duration;
//!
//! let clock = GameClock::new(None, TimeScale::Fixed);
//! let before = clock.now();
//! clock.sleep(Duration::seconds(2)).await?;   // returns immediately
//! assert_eq!(clock.now() - before, Duration::seconds(2));
//! ```

mod game;
mod scale;

pub use game::GameClock;
pub use scale::{ParseTimeScaleError, TimeScale};

// Re-export the Clock trait for convenience
pub use greenlight_ports::Clock;
