//! Read-only context handed to actions.
//!
//! Oracles expose loaded object definitions. The [`GameEnv`] aggregate bundles
//! them with the session config so actions can reach everything they need
//! without coupling to concrete implementations.
mod error;
mod scenery;

pub use error::OracleError;
pub use scenery::{BannerEntry, SceneryCatalog, SceneryOracle};

use crate::config::GameConfig;
use crate::state::ObjectEntryIndex;

/// Session config plus the oracles required by the action pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    scenery: Option<&'a dyn SceneryOracle>,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, scenery: Option<&'a dyn SceneryOracle>) -> Self {
        Self { config, scenery }
    }

    pub fn with_scenery(config: &'a GameConfig, scenery: &'a dyn SceneryOracle) -> Self {
        Self::new(config, Some(scenery))
    }

    /// Environment with no oracles attached.
    pub fn bare(config: &'a GameConfig) -> Self {
        Self::new(config, None)
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Returns the SceneryOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SceneryNotAvailable` if no scenery oracle was provided.
    pub fn scenery(&self) -> Result<&'a dyn SceneryOracle, OracleError> {
        self.scenery.ok_or(OracleError::SceneryNotAvailable)
    }

    /// Looks up a banner definition.
    ///
    /// # Errors
    ///
    /// Fails if the scenery oracle is missing or does not know `entry`.
    pub fn banner_entry(&self, entry: ObjectEntryIndex) -> Result<BannerEntry, OracleError> {
        self.scenery()?
            .banner_entry(entry)
            .ok_or(OracleError::BannerEntryNotFound(entry))
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("scenery", &self.scenery.is_some())
            .finish()
    }
}
