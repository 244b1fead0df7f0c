//! Authoritative park state.
//!
//! This module owns the tile map, banner and ride tables, network session and
//! park finances. Actions read it through `&GameState` while querying and
//! mutate it only while executing.
mod error;
pub mod types;

use std::fmt;

pub use error::StateError;
pub use types::{
    Banner, BannerElement, BannerFlags, BannerIndex, BannerTable, COORDS_XY_HALF_TILE,
    COORDS_XY_STEP, COORDS_Z_STEP, CoordsXY, CoordsXYZ, CoordsXYZD, DIRECTION_DELTAS, Direction,
    ElementData, ElementType, EntranceElement, EntranceType, ExpenditureType, Finance, GroupId,
    INVALID_DIRECTION, InvalidatedRegion, InvalidationQueue, LAND_HEIGHT_STEP,
    LargeSceneryElement, MAX_BANNERS, MAX_ELEMENT_HEIGHT, MAX_STATIONS, Money, NUM_DIRECTIONS,
    NetworkGroup, NetworkMode, NetworkPlayer, NetworkState, ObjectEntryIndex, Ownership,
    PathElement, Permissions, PlayerFlags, PlayerId, Ride, RideId, RideStation, RideTable,
    SLOPE_ALL_CORNERS_UP, SLOPE_DOUBLE_HEIGHT, SLOPE_E_CORNER_DN, SLOPE_E_CORNER_UP, SLOPE_FLAT,
    SLOPE_N_CORNER_DN, SLOPE_N_CORNER_UP, SLOPE_S_CORNER_DN, SLOPE_S_CORNER_UP,
    SLOPE_W_CORNER_DN, SLOPE_W_CORNER_UP, SmallSceneryElement, SurfaceElement,
    TILE_ELEMENT_SIZE, TileCoordsXY, TileCoordsXYZD, TileElement, TileMap, TrackElement,
    WallElement, direction_valid,
};

use crate::config::GameConfig;

/// Canonical snapshot of the park.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Tile element stacks.
    pub map: TileMap,
    /// Banner records referenced from map elements.
    pub banners: BannerTable,
    /// Rides, tracked for station entrance/exit bookkeeping.
    pub rides: RideTable,
    /// Multiplayer session membership and permissions.
    pub network: NetworkState,
    /// Park cash and expenditure totals.
    pub finance: Finance,
    /// Regions awaiting a redraw. Presentation-only.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub invalidations: InvalidationQueue,
}

impl GameState {
    /// Creates a state around an existing map with empty tables.
    pub fn new(map: TileMap) -> Self {
        Self {
            map,
            banners: BannerTable::new(),
            rides: RideTable::new(),
            network: NetworkState::default(),
            finance: Finance::default(),
            invalidations: InvalidationQueue::default(),
        }
    }

    /// Creates a flat park sized and budgeted from `config`.
    pub fn flat(config: &GameConfig, surface_height: u8) -> Self {
        Self::new(TileMap::flat(
            config.map_size,
            surface_height,
            config.max_tile_elements,
        ))
    }

    /// True when a world location lies on the playable map.
    pub fn location_valid(&self, location: CoordsXY) -> bool {
        self.map.contains_coords(location)
    }

    /// Checks structural invariants a deserialized snapshot cannot guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MalformedMap`] if the tile stacks disagree with
    /// the map's declared size or element counts.
    pub fn validate(&self) -> Result<(), StateError> {
        self.map.validate()
    }

    /// Whether the park may build at `location` given land ownership.
    ///
    /// Editor and sandbox sessions may build anywhere. Otherwise the surface
    /// must be owned, or carry construction rights with `location.z` either
    /// below the surface or more than one land step above it.
    pub fn can_build_at(&self, location: CoordsXYZ, config: &GameConfig) -> bool {
        if config.editor_mode || config.sandbox_mode {
            return true;
        }
        let tile = location.xy().to_tile();
        let Some((_, surface, element)) = self.map.surface(tile) else {
            return false;
        };
        if surface.ownership.contains(Ownership::OWNED) {
            return true;
        }
        if surface.ownership.contains(Ownership::CONSTRUCTION_RIGHTS_OWNED) {
            let surface_z = element.base_z();
            return location.z < surface_z || location.z.saturating_sub(LAND_HEIGHT_STEP) > surface_z;
        }
        false
    }

    /// Deterministic digest of the replicated world (map, banners, rides).
    ///
    /// Peers compare checksums to detect desynchronisation.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Encoding`] if the world cannot be encoded.
    #[cfg(feature = "serde")]
    pub fn checksum(&self) -> Result<StateChecksum, StateError> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(&(&self.map, &self.banners, &self.rides))
            .map_err(|e| StateError::Encoding(e.to_string()))?;
        Ok(StateChecksum(Sha256::digest(&bytes).into()))
    }
}

/// SHA-256 digest of the replicated world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChecksum(pub [u8; 32]);

impl StateChecksum {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for StateChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(ownership: Ownership) -> GameState {
        let mut state = GameState::flat(&GameConfig::default(), 4);
        let tile = TileCoordsXY::new(5, 5);
        if let Some(TileElement {
            data: ElementData::Surface(surface),
            ..
        }) = state.map.element_at_mut(tile, 0)
        {
            surface.ownership = ownership;
        }
        state
    }

    #[test]
    fn owned_land_is_buildable() {
        let state = park(Ownership::OWNED);
        let config = GameConfig::default();
        assert!(state.can_build_at(CoordsXYZ::new(160, 160, 32), &config));
        assert!(!state.can_build_at(CoordsXYZ::new(192, 160, 32), &config));
    }

    #[test]
    fn construction_rights_only_above_or_below_surface() {
        let state = park(Ownership::CONSTRUCTION_RIGHTS_OWNED);
        let config = GameConfig::default();
        // Surface at height 4 → 32 world units.
        assert!(state.can_build_at(CoordsXYZ::new(160, 160, 16), &config));
        assert!(!state.can_build_at(CoordsXYZ::new(160, 160, 32), &config));
        assert!(!state.can_build_at(CoordsXYZ::new(160, 160, 48), &config));
        assert!(state.can_build_at(CoordsXYZ::new(160, 160, 56), &config));
    }

    #[test]
    fn sandbox_builds_anywhere() {
        let state = park(Ownership::empty());
        let config = GameConfig {
            sandbox_mode: true,
            ..GameConfig::default()
        };
        assert!(state.can_build_at(CoordsXYZ::new(160, 160, 32), &config));
    }

    #[test]
    fn checksum_ignores_invalidations() {
        let mut state = park(Ownership::OWNED);
        let before = state.checksum().unwrap();
        state.invalidations.invalidate_tile_full(TileCoordsXY::new(1, 1));
        assert_eq!(state.checksum().unwrap(), before);
        assert_eq!(before.to_hex().len(), 64);
    }

    #[test]
    fn checksum_survives_a_json_snapshot() {
        let mut state = park(Ownership::OWNED);
        state.rides.insert(RideId(3), Ride::new("coaster", 1));
        state.invalidations.invalidate_tile_full(TileCoordsXY::new(1, 1));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.checksum().unwrap(), state.checksum().unwrap());
        assert!(restored.invalidations.is_empty());
    }
}
