//! Platform-specific directory utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use park_runtime::{ACTION_LOG_FILE, RuntimeConfig};

/// Data directory holding session directories.
///
/// `PARK_DATA_DIR` wins, then the platform convention:
/// - macOS: `~/Library/Application Support/park`
/// - Linux: `~/.local/share/park` (or `$XDG_DATA_HOME/park`)
/// - Windows: `%APPDATA%\park`
/// - Fallback: `./park_data`
pub fn data_dir() -> PathBuf {
    RuntimeConfig::from_env().resolved_data_dir()
}

/// Most recently modified session directory under `data_dir`.
pub fn find_latest_session(data_dir: &Path) -> Result<String> {
    let mut sessions = Vec::new();

    for entry in std::fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir()
            && path.join(ACTION_LOG_FILE).exists()
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            let modified = entry.metadata()?.modified()?;
            sessions.push((name.to_string(), modified));
        }
    }

    // Newest first
    sessions.sort_by(|a, b| b.1.cmp(&a.1));

    sessions
        .into_iter()
        .next()
        .map(|(name, _)| name)
        .ok_or_else(|| anyhow::anyhow!("No sessions with an action log in {}", data_dir.display()))
}

/// Resolves the action log to read.
///
/// An explicit `log` path (file or session directory) wins; otherwise the
/// named or latest session under the data directory is used.
pub fn action_log_path(
    log: Option<&Path>,
    session: Option<&str>,
    data_dir: Option<&Path>,
) -> Result<PathBuf> {
    let path = match log {
        Some(path) if path.is_dir() => path.join(ACTION_LOG_FILE),
        Some(path) => path.to_path_buf(),
        None => {
            let data_dir = data_dir.map_or_else(self::data_dir, Path::to_path_buf);
            let session = match session {
                Some(id) => id.to_string(),
                None => find_latest_session(&data_dir)?,
            };
            data_dir.join(session).join(ACTION_LOG_FILE)
        }
    };

    if !path.is_file() {
        anyhow::bail!("Action log not found: {}", path.display());
    }
    Ok(path)
}
