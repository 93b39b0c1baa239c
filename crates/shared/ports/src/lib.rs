//! Green Light Ports
//!
//! Port definitions (traits) for the Green Light simulation.
//! These define the boundaries between the game engine and its collaborators.

mod clock;
mod error;
mod reporter;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
pub use reporter::{EndReason, FinalReport, GameIntro, GameReporter, RoundReport};
