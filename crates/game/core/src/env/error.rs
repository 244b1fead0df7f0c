//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ObjectEntryIndex;

/// Errors that occur when accessing oracle data.
///
/// Oracle errors indicate that required game data is unavailable. Actions
/// that can run without an oracle (banner refunds default to zero) treat the
/// missing oracle as "no data" instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// SceneryOracle is not available in the environment.
    #[error("SceneryOracle not available")]
    SceneryNotAvailable,

    /// No banner object is registered under the given entry.
    #[error("banner entry {0} not found")]
    BannerEntryNotFound(ObjectEntryIndex),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::SceneryNotAvailable => ErrorSeverity::Fatal,
            OracleError::BannerEntryNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::SceneryNotAvailable => "ORACLE_SCENERY_NOT_AVAILABLE",
            OracleError::BannerEntryNotFound(_) => "ORACLE_BANNER_ENTRY_NOT_FOUND",
        }
    }
}
