//! In-memory ActionRepository implementation for tests and local runs.

use crate::repository::traits::ActionRepository;
use crate::repository::types::ActionLogEntry;
use crate::repository::{RepositoryError, Result};

/// Action log held in memory.
///
/// Offsets mirror the file format (`4 + payload` bytes per frame) so callers
/// can switch between the two without changing how they walk the log.
#[derive(Debug, Default)]
pub struct InMemoryActionLog {
    session_id: String,
    frames: Vec<(u64, Vec<u8>)>,
    size: u64,
}

impl InMemoryActionLog {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl ActionRepository for InMemoryActionLog {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        let bytes =
            bincode::serialize(entry).map_err(|e| RepositoryError::Frame(e.to_string()))?;
        let offset = self.size;
        self.size += 4 + bytes.len() as u64;
        self.frames.push((offset, bytes));
        Ok(offset)
    }

    fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(ActionLogEntry, u64)>> {
        if byte_offset >= self.size {
            return Ok(None);
        }
        let index = self
            .frames
            .binary_search_by_key(&byte_offset, |(offset, _)| *offset)
            .map_err(|_| {
                RepositoryError::NoFrameAt { offset: byte_offset }
            })?;
        let bytes = &self.frames[index].1;
        let entry = bincode::deserialize(bytes)
            .map_err(|e| RepositoryError::Frame(e.to_string()))?;
        Ok(Some((entry, byte_offset + 4 + bytes.len() as u64)))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.size)
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sequence: u64) -> ActionLogEntry {
        ActionLogEntry {
            sequence,
            tick: 7,
            command: 63,
            payload: vec![1, 2, 3],
        }
    }

    #[test]
    fn read_all_returns_entries_in_order() {
        let mut log = InMemoryActionLog::new("test");
        log.append(&entry(0)).unwrap();
        let second = log.append(&entry(1)).unwrap();

        assert_eq!(log.read_all().unwrap(), vec![entry(0), entry(1)]);
        assert_eq!(log.read_at_offset(second).unwrap().unwrap().0, entry(1));
        assert!(matches!(
            log.read_at_offset(second - 1),
            Err(RepositoryError::NoFrameAt { .. })
        ));
    }
}
