use super::common::{MAX_ELEMENT_HEIGHT, COORDS_Z_STEP, TileCoordsXY};

/// Tile region whose rendering is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InvalidatedRegion {
    pub tile: TileCoordsXY,
    /// Lowest affected height in world units.
    pub z_low: i32,
    /// Highest affected height in world units.
    pub z_high: i32,
}

/// Regions marked for visual refresh, drained by the presentation layer.
///
/// Not part of the checksummed world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvalidationQueue {
    regions: Vec<InvalidatedRegion>,
}

impl InvalidationQueue {
    pub fn invalidate_tile(&mut self, tile: TileCoordsXY, z_low: i32, z_high: i32) {
        self.regions.push(InvalidatedRegion {
            tile,
            z_low,
            z_high,
        });
    }

    /// Marks every height of a tile as stale.
    pub fn invalidate_tile_full(&mut self, tile: TileCoordsXY) {
        self.invalidate_tile(tile, 0, MAX_ELEMENT_HEIGHT * COORDS_Z_STEP);
    }

    pub fn regions(&self) -> &[InvalidatedRegion] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn drain(&mut self) -> Vec<InvalidatedRegion> {
        std::mem::take(&mut self.regions)
    }
}
