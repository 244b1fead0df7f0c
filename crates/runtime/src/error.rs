//! Errors surfaced by the runtime.
//!
//! Gameplay rejections are [`ActionResult`](park_core::ActionResult)s and
//! never appear here; these are failures of the plumbing around them.
use thiserror::Error;

use park_core::{ErrorSeverity, GameError, SerialiseError, StateError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action payload rejected: {0}")]
    Serialise(#[from] SerialiseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("world state error: {0}")]
    State(#[from] StateError),

    #[error("tick {tick} is behind the current tick {current}")]
    StaleTick { tick: u32, current: u32 },

    #[error("logging already initialised")]
    LoggingInitialised,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            Serialise(err) => err.severity(),
            State(err) => err.severity(),
            StaleTick { .. } => ErrorSeverity::Validation,
            Repository(_) => ErrorSeverity::Recoverable,
            LoggingInitialised => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            Serialise(_) => "RUNTIME_SERIALISE",
            Repository(_) => "RUNTIME_REPOSITORY",
            State(_) => "RUNTIME_STATE",
            StaleTick { .. } => "RUNTIME_STALE_TICK",
            LoggingInitialised => "RUNTIME_LOGGING_INITIALISED",
        }
    }
}
