//! State management errors.
//!
//! Errors related to world state operations, element storage, and capacity limits.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BannerIndex, TileCoordsXY};

/// Errors that occur during world state operations.
///
/// These errors indicate capacity limits, malformed element data, or encoding failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Global tile element budget is exhausted.
    #[error("No free tile elements (max: {max})")]
    NoFreeElements {
        /// Maximum number of elements the map may hold.
        max: usize,
    },

    /// Tile is outside the map.
    #[error("Tile {tile} is out of bounds (map size: {size}x{size})")]
    TileOutOfBounds {
        /// The invalid tile.
        tile: TileCoordsXY,
        /// Map size in tiles.
        size: u32,
    },

    /// Banner slot is already in use.
    #[error("Banner slot {index} is already in use")]
    BannerSlotInUse {
        /// The occupied slot.
        index: BannerIndex,
    },

    /// Banner index is null or beyond the table.
    #[error("Banner index {index} is out of range")]
    BannerIndexOutOfRange {
        /// The rejected index.
        index: BannerIndex,
    },

    /// Raw element record carries an unknown type tag.
    #[error("Unknown tile element type {0}")]
    UnknownElementType(u8),

    /// Raw element record carries an unknown entrance type.
    #[error("Unknown entrance type {0}")]
    UnknownEntranceType(u8),

    /// Deserialized map breaks a structural invariant.
    #[error("Malformed tile map: {0}")]
    MalformedMap(String),

    /// World state could not be encoded for checksumming.
    #[error("State encoding failed: {0}")]
    Encoding(String),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            NoFreeElements { .. } | BannerSlotInUse { .. } => ErrorSeverity::Recoverable,
            TileOutOfBounds { .. } | BannerIndexOutOfRange { .. } => ErrorSeverity::Validation,
            UnknownElementType(_) | UnknownEntranceType(_) | MalformedMap(_) => {
                ErrorSeverity::Validation
            }
            Encoding(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            NoFreeElements { .. } => "STATE_NO_FREE_ELEMENTS",
            TileOutOfBounds { .. } => "STATE_TILE_OUT_OF_BOUNDS",
            BannerSlotInUse { .. } => "STATE_BANNER_SLOT_IN_USE",
            BannerIndexOutOfRange { .. } => "STATE_BANNER_INDEX_OUT_OF_RANGE",
            UnknownElementType(_) => "STATE_UNKNOWN_ELEMENT_TYPE",
            UnknownEntranceType(_) => "STATE_UNKNOWN_ENTRANCE_TYPE",
            MalformedMap(_) => "STATE_MALFORMED_MAP",
            Encoding(_) => "STATE_ENCODING",
        }
    }
}
