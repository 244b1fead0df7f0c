//! Runtime orchestration for the park action protocol.
//!
//! This crate wraps the deterministic core in the plumbing a running session
//! needs: a dispatcher that sequences query and execute, an ordered queue for
//! replicated actions, the action log, and configuration and logging setup.
//!
//! Modules are organized by responsibility:
//! - [`dispatcher`] owns the authoritative state and runs actions
//! - [`queue`] orders actions by tick for deterministic replication
//! - [`repository`] persists the action log and world snapshots
//! - [`config`] and [`logging`] set up a session from the environment
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod queue;
pub mod repository;

pub use config::RuntimeConfig;
pub use dispatcher::{ActionDispatcher, DEFAULT_SURFACE_HEIGHT};
pub use error::{Result, RuntimeError};
pub use logging::LoggingGuard;
pub use queue::NetworkActionQueue;
pub use repository::{
    ACTION_LOG_FILE, ActionLogEntry, ActionRepository, FileActionLog, FileRepository,
    FileWorldRepository, InMemoryActionLog, RepositoryError, WorldRepository, WorldSnapshot,
};
