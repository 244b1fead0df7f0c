//! Data persisted by the repositories.

mod action_log;
mod snapshot;

pub use action_log::ActionLogEntry;
pub use snapshot::WorldSnapshot;
