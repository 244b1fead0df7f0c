//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use park_core::{GameConfig, Money, NetworkMode};

/// Configuration required to run a dispatcher session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub network_mode: NetworkMode,
    pub starting_cash: Money,
    /// Append executed actions to `actions.log` in the session directory.
    pub enable_action_log: bool,
    pub session_id: Option<String>,
    /// Root for session directories. Platform data directory when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            network_mode: NetworkMode::None,
            starting_cash: Money(10_000),
            enable_action_log: false,
            session_id: None,
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PARK_NETWORK_MODE` - `none`, `client` or `server` (default: none)
    /// - `PARK_STARTING_CASH` - Park cash for fresh sessions (default: 10000)
    /// - `PARK_SANDBOX` - Ignore land ownership (default: false)
    /// - `PARK_EDITOR` - Scenario editor session (default: false)
    /// - `PARK_MAP_SIZE` - Map edge length in tiles (default: 64)
    /// - `PARK_MAX_TILE_ELEMENTS` - Global element budget (default: 196608)
    /// - `PARK_ACTION_LOG` - Persist executed actions (default: false)
    /// - `PARK_SESSION_ID` - Session directory name (default: none)
    /// - `PARK_DATA_DIR` - Root for session data (default: platform-specific)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = env::var("PARK_NETWORK_MODE")
            .ok()
            .and_then(|value| parse_network_mode(&value))
        {
            config.network_mode = mode;
        }
        if let Some(cash) = read_env::<i64>("PARK_STARTING_CASH") {
            config.starting_cash = Money(cash);
        }
        if let Some(sandbox) = read_env::<bool>("PARK_SANDBOX") {
            config.game.sandbox_mode = sandbox;
        }
        if let Some(editor) = read_env::<bool>("PARK_EDITOR") {
            config.game.editor_mode = editor;
        }
        if let Some(size) = read_env::<u32>("PARK_MAP_SIZE") {
            config.game.map_size = size.max(1);
        }
        if let Some(max) = read_env::<usize>("PARK_MAX_TILE_ELEMENTS") {
            config.game.max_tile_elements = max;
        }

        if let Some(enable) = read_env::<bool>("PARK_ACTION_LOG") {
            config.enable_action_log = enable;
        } else if env::var("PARK_ACTION_LOG").is_ok() {
            // Set without a value counts as enabled.
            config.enable_action_log = true;
        }

        config.session_id = env::var("PARK_SESSION_ID").ok();
        config.data_dir = env::var("PARK_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    /// Data root, falling back to the platform data directory.
    ///
    /// - macOS: `~/Library/Application Support/park`
    /// - Linux: `~/.local/share/park`
    /// - Windows: `%APPDATA%\park`
    /// - Fallback: `./park_data`
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "park")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./park_data"))
        })
    }

    /// Directory holding this session's files, if a session is named.
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.session_id
            .as_ref()
            .map(|id| self.resolved_data_dir().join(id))
    }
}

pub fn parse_network_mode(value: &str) -> Option<NetworkMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "single" => Some(NetworkMode::None),
        "client" => Some(NetworkMode::Client),
        "server" => Some(NetworkMode::Server),
        _ => None,
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_mode_names() {
        assert_eq!(parse_network_mode("Server"), Some(NetworkMode::Server));
        assert_eq!(parse_network_mode(" client "), Some(NetworkMode::Client));
        assert_eq!(parse_network_mode("none"), Some(NetworkMode::None));
        assert_eq!(parse_network_mode("host"), None);
    }

    #[test]
    fn session_dir_nests_under_data_dir() {
        let config = RuntimeConfig {
            session_id: Some("session_1".into()),
            data_dir: Some(PathBuf::from("/tmp/park")),
            ..RuntimeConfig::default()
        };
        assert_eq!(
            config.session_dir(),
            Some(PathBuf::from("/tmp/park/session_1"))
        );
        assert_eq!(RuntimeConfig::default().session_dir(), None);
    }
}
