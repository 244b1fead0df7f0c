//! In-memory repository implementations for testing and development.

mod action_log;

pub use action_log::InMemoryActionLog;
