//! Green Light Core Domain
//!
//! Pure domain types for the Red Light, Green Light simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    FIELD_LENGTH_RANGE, GameStats, LightPhase, MoveOutcome, Player, SPEED_RANGE,
};
pub use values::{PlayerId, Timestamp};
