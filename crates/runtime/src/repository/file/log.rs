//! Append-only log file repository.
//!
//! [`FileRepository<T>`] stores any serializable type in a length-prefixed
//! append-only log. The action log is `FileRepository<ActionLogEntry>`.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::traits::ActionRepository;
use crate::repository::types::ActionLogEntry;
use crate::repository::{RepositoryError, Result};

/// Default file name of a session's action log.
pub const ACTION_LOG_FILE: &str = "actions.log";

/// Action log backed by a file.
pub type FileActionLog = FileRepository<ActionLogEntry>;

/// Generic file-based repository for append-only logs.
///
/// Stores items of type `T` in a file using the format:
/// ```text
/// [u32 length][bincode serialized T]
/// [u32 length][bincode serialized T]
/// ...
/// ```
pub struct FileRepository<T> {
    /// Session identifier (filename without path)
    session_id: String,
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next write
    current_offset: u64,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a new file repository.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();

        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename);
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;

        tracing::debug!("Created repository: {}", path.display());

        Ok(Self {
            session_id: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset: 0,
            _phantom: PhantomData,
        })
    }

    /// Open or create a file repository for appending.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let current_offset = file.metadata()?.len();

        tracing::debug!(
            "Opened/created repository: {} at offset {}",
            path.display(),
            current_offset
        );

        Ok(Self {
            session_id: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset,
            _phantom: PhantomData,
        })
    }

    /// Append an item to the log.
    ///
    /// Returns the byte offset where the item was written.
    pub fn append(&mut self, item: &T) -> Result<u64> {
        let offset = self.current_offset;

        let bytes =
            bincode::serialize(item).map_err(|e| RepositoryError::Frame(e.to_string()))?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| RepositoryError::Frame("entry exceeds 4 GiB".into()))?;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.current_offset += 4 + bytes.len() as u64;

        Ok(offset)
    }

    /// Read an item at a specific byte offset.
    ///
    /// Returns `None` if the offset is at or beyond the end of the file.
    /// A frame cut short by a crash is reported as
    /// [`RepositoryError::TruncatedFrame`].
    pub fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(T, u64)>> {
        // Separate reader; buffered writes are not visible until flushed.
        let file = File::open(&self.path)?;
        let file_size = file.metadata()?.len();

        if byte_offset >= file_size {
            return Ok(None);
        }

        let remaining = file_size - byte_offset;
        if remaining < 4 {
            return Err(RepositoryError::TruncatedFrame {
                offset: byte_offset,
                expected: 4,
                actual: remaining as usize,
            });
        }

        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(byte_offset))?;

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let available = remaining - 4;
        if (len as u64) > available {
            return Err(RepositoryError::TruncatedFrame {
                offset: byte_offset,
                expected: len,
                actual: available as usize,
            });
        }

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;

        let item = bincode::deserialize(&data)
            .map_err(|e| RepositoryError::Frame(e.to_string()))?;

        Ok(Some((item, byte_offset + 4 + len as u64)))
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get the current size of the log in bytes.
    pub fn size(&self) -> Result<u64> {
        Ok(self.current_offset)
    }

    /// Get the session ID (filename).
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(
                "Failed to flush repository '{}' on drop: {}",
                self.session_id,
                e
            );
        }
    }
}

impl ActionRepository for FileRepository<ActionLogEntry> {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        self.append(entry)
    }

    fn read_at_offset(&self, byte_offset: u64) -> Result<Option<(ActionLogEntry, u64)>> {
        self.read_at_offset(byte_offset)
    }

    fn flush(&mut self) -> Result<()> {
        self.flush()
    }

    fn size(&self) -> Result<u64> {
        self.size()
    }

    fn session_id(&self) -> &str {
        self.session_id()
    }
}
