use thiserror::Error;

/// Errors produced by the scheduler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    /// Quality rating outside the accepted 1..=5 range.
    #[error("Invalid quality {0}: must be between 1 and 5")]
    InvalidQuality(i64),
    /// Scheduler parameters that would break interval growth.
    #[error("Invalid scheduler config: {0}")]
    InvalidConfig(String),
}
