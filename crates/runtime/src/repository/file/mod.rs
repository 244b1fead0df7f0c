//! File-backed repository implementations.

mod log;
mod world;

pub use log::{ACTION_LOG_FILE, FileActionLog, FileRepository};
pub use world::FileWorldRepository;
