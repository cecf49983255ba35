//! Error types for schedule store operations.

use slopy_engine::ScheduleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid store document.
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A day or range argument was rejected by the engine parsers.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A writer panicked while holding the lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Convenience alias used throughout slopy-store.
pub type Result<T> = std::result::Result<T, StoreError>;
