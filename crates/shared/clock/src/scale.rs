use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Time scale modes for a game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeScale {
    /// Real-time (1:1 ratio with wall clock)
    #[default]
    Normal,
    /// Accelerated time (multiplier applied to elapsed time)
    Fast(u32),
    /// Decelerated time (divisor applied to elapsed time)
    Slow(u32),
    /// Fixed time (only advances when explicitly moved)
    Fixed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time scale {0:?} (expected normal, fixed, fast:<n> or slow:<n>)")]
pub struct ParseTimeScaleError(pub String);

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeScale::Normal => f.write_str("normal"),
            TimeScale::Fast(n) => write!(f, "fast:{n}"),
            TimeScale::Slow(n) => write!(f, "slow:{n}"),
            TimeScale::Fixed => f.write_str("fixed"),
        }
    }
}

impl FromStr for TimeScale {
    type Err = ParseTimeScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let err = || ParseTimeScaleError(s.to_string());

        match lower.split_once(':') {
            None => match lower.as_str() {
                "normal" => Ok(TimeScale::Normal),
                "fixed" => Ok(TimeScale::Fixed),
                _ => Err(err()),
            },
            Some((kind, factor)) => {
                // Factors must fit the i32 that chrono durations scale by
                let factor = factor
                    .parse::<i32>()
                    .ok()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(err)?;
                match kind {
                    "fast" => Ok(TimeScale::Fast(factor)),
                    "slow" => Ok(TimeScale::Slow(factor)),
                    _ => Err(err()),
                }
            }
        }
    }
}

impl TryFrom<String> for TimeScale {
    type Error = ParseTimeScaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeScale> for String {
    fn from(scale: TimeScale) -> Self {
        scale.to_string()
    }
}
