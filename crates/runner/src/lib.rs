//! Greenlight Runner - command-line front end for the game engine
//!
//! - **CLI**: flags layered over an optional JSON scenario file
//! - **Console**: round-by-round and final summaries on stdout
//! - **Session**: runs one game, stops it on shutdown, exports statistics
//!
//! ```text
//!   flags + scenario.json
//!            │
//!            ▼
//!     ScenarioConfig ──► Game::start ──► ConsoleReporter
//!                            │
//!                 Ctrl-C ──► interrupt
//!                            │
//!                            ▼
//!                   greenlight_stats.json
//! ```

pub mod cli;
pub mod console;
pub mod session;

pub use cli::Cli;
pub use console::ConsoleReporter;
pub use session::{RunnerError, SessionOutcome, run_session};
