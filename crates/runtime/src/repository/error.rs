//! Error types raised by event log implementations.

use thiserror::Error;

/// Errors surfaced by event log implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("event store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("log already exists: {0}")]
    LogAlreadyExists(String),

    #[error("truncated entry at offset {offset}: expected {expected} bytes, found {actual}")]
    PartialWrite {
        offset: u64,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
