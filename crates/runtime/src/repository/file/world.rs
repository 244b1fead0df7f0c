//! File-based [`WorldRepository`] implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::traits::WorldRepository;
use crate::repository::types::WorldSnapshot;
use crate::repository::{RepositoryError, Result};

/// Stores world snapshots as pretty-printed JSON, one `{name}.json` per
/// snapshot, so they can be edited by hand for test scenarios.
pub struct FileWorldRepository {
    base_dir: PathBuf,
}

impl FileWorldRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }

    /// Reads a snapshot from an arbitrary path.
    ///
    /// Hand-edited snapshots are checked before use so a broken map surfaces
    /// as [`RepositoryError::InvalidSnapshot`] rather than a panic mid-replay.
    pub fn read_path(path: impl AsRef<Path>) -> Result<WorldSnapshot> {
        let bytes = fs::read(path.as_ref())?;
        let snapshot: WorldSnapshot = serde_json::from_slice(&bytes)?;
        snapshot.state.validate()?;
        Ok(snapshot)
    }
}

impl WorldRepository for FileWorldRepository {
    fn save(&self, name: &str, snapshot: &WorldSnapshot) -> Result<()> {
        let path = self.snapshot_path(name);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved world '{}' to {}", name, path.display());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<WorldSnapshot>> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let snapshot = Self::read_path(&path)?;
        tracing::debug!("Loaded world '{}' from {}", name, path.display());
        Ok(Some(snapshot))
    }

    fn exists(&self, name: &str) -> bool {
        self.snapshot_path(name).exists()
    }
}
