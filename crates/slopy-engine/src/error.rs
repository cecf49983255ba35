//! Error types for slopy-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
