//! Repository layer for session data
//!
//! Repositories persist what a session produces and consumes:
//! - The action log (every executed action, in order)
//! - World snapshots (the park plus the object definitions actions consult)

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{ACTION_LOG_FILE, FileActionLog, FileRepository, FileWorldRepository};
pub use memory::InMemoryActionLog;
pub use traits::{ActionRepository, WorldRepository};
pub use types::{ActionLogEntry, WorldSnapshot};
