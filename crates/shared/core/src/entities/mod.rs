mod light_phase;
mod player;
mod stats;

pub use light_phase::LightPhase;
pub use player::{FIELD_LENGTH_RANGE, MoveOutcome, Player, SPEED_RANGE};
pub use stats::GameStats;
