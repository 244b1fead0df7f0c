//! Failures of the action log and world snapshot stores.

use thiserror::Error;

use park_core::{ErrorSeverity, GameError, StateError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A log entry could not be turned into (or back from) its bincode frame.
    #[error("action log frame rejected: {0}")]
    Frame(String),

    #[error("no action log frame starts at offset {offset}")]
    NoFrameAt { offset: u64 },

    #[error("action log {0} already exists; open it to append")]
    LogAlreadyExists(String),

    /// The log ends inside a frame, typically after a crash mid-append.
    #[error("action log frame at offset {offset} is truncated: expected {expected} bytes, found {actual}")]
    TruncatedFrame {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    #[error("world snapshot is not valid JSON: {0}")]
    SnapshotJson(#[from] serde_json::Error),

    #[error("world snapshot is inconsistent: {0}")]
    InvalidSnapshot(#[from] StateError),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        use RepositoryError::*;
        match self {
            Io(_) => ErrorSeverity::Recoverable,
            LogAlreadyExists(_) => ErrorSeverity::Validation,
            Frame(_) | NoFrameAt { .. } | TruncatedFrame { .. } => ErrorSeverity::Validation,
            SnapshotJson(_) | InvalidSnapshot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RepositoryError::*;
        match self {
            Io(_) => "REPOSITORY_IO",
            Frame(_) => "REPOSITORY_FRAME",
            NoFrameAt { .. } => "REPOSITORY_NO_FRAME_AT",
            LogAlreadyExists(_) => "REPOSITORY_LOG_ALREADY_EXISTS",
            TruncatedFrame { .. } => "REPOSITORY_TRUNCATED_FRAME",
            SnapshotJson(_) => "REPOSITORY_SNAPSHOT_JSON",
            InvalidSnapshot(_) => "REPOSITORY_INVALID_SNAPSHOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
