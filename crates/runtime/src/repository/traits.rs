//! Repository contracts for the action log and world snapshots.

use super::Result;

pub use super::types::{ActionLogEntry, WorldSnapshot};

/// Repository for action log persistence
///
/// Provides append-only logging of executed actions. Entries are read back
/// sequentially by offset when a session is inspected or replayed.
///
/// # File Format
///
/// Each entry is stored as:
/// ```text
/// [u32 length][bincode serialized ActionLogEntry]
/// ```
pub trait ActionRepository: Send {
    /// Append an action log entry
    ///
    /// Returns the byte offset where the entry was written.
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64>;

    /// Read an action log entry at a specific byte offset
    ///
    /// Returns `None` if the offset is beyond the end of the log.
    /// Returns `Some((entry, next_offset))` where next_offset is the byte position after this entry.
    fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(ActionLogEntry, u64)>>;

    /// Flush buffered writes to their backing store
    fn flush(&mut self) -> Result<()>;

    /// Get the current size of the log in bytes
    fn size(&self) -> Result<u64>;

    /// Get the session ID associated with this log
    fn session_id(&self) -> &str;

    /// Every entry from the start of the log, in order.
    fn read_all(&self) -> Result<Vec<ActionLogEntry>> {
        let mut entries = Vec::new();
        let mut offset = 0;
        while let Some((entry, next)) = self.read_at_offset(offset)? {
            entries.push(entry);
            offset = next;
        }
        Ok(entries)
    }
}

/// Repository for whole-world snapshots, addressed by name.
pub trait WorldRepository: Send + Sync {
    fn save(&self, name: &str, snapshot: &WorldSnapshot) -> Result<()>;

    /// Returns `None` when no snapshot of that name exists.
    fn load(&self, name: &str) -> Result<Option<WorldSnapshot>>;

    fn exists(&self, name: &str) -> bool;
}
