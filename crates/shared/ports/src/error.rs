use thiserror::Error;

/// Errors raised while pacing simulated time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Time scale divisor cannot be zero")]
    ZeroDivisor,

    #[error("Duration out of range: {0}")]
    OutOfRange(String),
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
