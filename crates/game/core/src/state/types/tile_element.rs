//! Tile elements: the entries stacked on every map tile.
//!
//! Every element shares a small header (heights, facing, occupied quadrants,
//! ghost flag) and carries kind-specific data in [`ElementData`]. Elements can
//! be flattened into a fixed 16-byte raw record, which is how a copied element
//! travels inside a tile paste command.

use bitflags::bitflags;

use super::banner::BannerIndex;
use super::common::{COORDS_Z_STEP, Direction, ObjectEntryIndex};
use super::ride::RideId;
use crate::state::StateError;

/// Size of a raw element record in bytes.
pub const TILE_ELEMENT_SIZE: usize = 16;

pub const SLOPE_FLAT: u8 = 0b0000_0000;
pub const SLOPE_N_CORNER_UP: u8 = 0b0000_0001;
pub const SLOPE_E_CORNER_UP: u8 = 0b0000_0010;
pub const SLOPE_S_CORNER_UP: u8 = 0b0000_0100;
pub const SLOPE_W_CORNER_UP: u8 = 0b0000_1000;
pub const SLOPE_ALL_CORNERS_UP: u8 = 0b0000_1111;
pub const SLOPE_DOUBLE_HEIGHT: u8 = 0b0001_0000;
pub const SLOPE_N_CORNER_DN: u8 = SLOPE_ALL_CORNERS_UP & !SLOPE_N_CORNER_UP;
pub const SLOPE_E_CORNER_DN: u8 = SLOPE_ALL_CORNERS_UP & !SLOPE_E_CORNER_UP;
pub const SLOPE_S_CORNER_DN: u8 = SLOPE_ALL_CORNERS_UP & !SLOPE_S_CORNER_UP;
pub const SLOPE_W_CORNER_DN: u8 = SLOPE_ALL_CORNERS_UP & !SLOPE_W_CORNER_UP;

bitflags! {
    /// Land ownership bits stored on a surface element.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Ownership: u8 {
        const CONSTRUCTION_RIGHTS_OWNED     = 1 << 4;
        const OWNED                         = 1 << 5;
        const CONSTRUCTION_RIGHTS_AVAILABLE = 1 << 6;
        const AVAILABLE                     = 1 << 7;
    }
}

/// Type tag of a tile element, as stored in byte 0 of the raw record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ElementType {
    Surface = 0,
    Path = 1,
    Track = 2,
    SmallScenery = 3,
    Entrance = 4,
    Wall = 5,
    LargeScenery = 6,
    Banner = 7,
    Corrupt = 8,
}

/// Which kind of entrance an entrance element is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EntranceType {
    RideEntrance = 0,
    RideExit = 1,
    ParkEntrance = 2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceElement {
    pub slope: u8,
    pub ownership: Ownership,
    /// One bit per edge: `0x8` west, `0x4` north, `0x2` east, `0x1` south.
    pub park_fences: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathElement {
    pub surface: ObjectEntryIndex,
    pub is_sloped: bool,
    pub slope_direction: Direction,
    /// Low nibble: connected edges. High nibble: connected corners.
    pub edges: u8,
    pub is_broken: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackElement {
    pub ride: RideId,
    pub track_type: u8,
    pub sequence: u8,
    pub has_chain: bool,
    pub block_brake_closed: bool,
    pub is_indestructible: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmallSceneryElement {
    pub entry: ObjectEntryIndex,
    pub quadrant: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceElement {
    pub entrance_type: EntranceType,
    pub ride: RideId,
    pub station: u8,
    pub sequence: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallElement {
    pub entry: ObjectEntryIndex,
    /// 0 = flat, 1 = sloped up, 2 = sloped down.
    pub slope: u8,
    pub animation_frame: u8,
    pub banner: BannerIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LargeSceneryElement {
    pub entry: ObjectEntryIndex,
    pub sequence: u8,
    pub banner: BannerIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerElement {
    pub index: BannerIndex,
    /// Edge of the tile the banner stands on.
    pub position: Direction,
    /// One bit per edge that guests may walk through.
    pub allowed_edges: u8,
}

/// Kind-specific payload of a tile element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementData {
    Surface(SurfaceElement),
    Path(PathElement),
    Track(TrackElement),
    SmallScenery(SmallSceneryElement),
    Entrance(EntranceElement),
    Wall(WallElement),
    LargeScenery(LargeSceneryElement),
    Banner(BannerElement),
    Corrupt,
}

/// One entry of a tile's element stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileElement {
    /// Bottom of the element in height units.
    pub base_height: u8,
    /// Top of the element in height units.
    pub clearance_height: u8,
    pub direction: Direction,
    pub occupied_quadrants: u8,
    /// Provisional preview element not yet confirmed by the player.
    pub is_ghost: bool,
    pub data: ElementData,
}

impl Default for TileElement {
    fn default() -> Self {
        Self::new(ElementData::Surface(SurfaceElement::default()), 0, 0)
    }
}

impl TileElement {
    pub const fn new(data: ElementData, base_height: u8, clearance_height: u8) -> Self {
        Self {
            base_height,
            clearance_height,
            direction: 0,
            occupied_quadrants: 0,
            is_ghost: false,
            data,
        }
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_quadrants(mut self, occupied_quadrants: u8) -> Self {
        self.occupied_quadrants = occupied_quadrants;
        self
    }

    #[must_use]
    pub const fn with_ghost(mut self, is_ghost: bool) -> Self {
        self.is_ghost = is_ghost;
        self
    }

    pub const fn element_type(&self) -> ElementType {
        match self.data {
            ElementData::Surface(_) => ElementType::Surface,
            ElementData::Path(_) => ElementType::Path,
            ElementData::Track(_) => ElementType::Track,
            ElementData::SmallScenery(_) => ElementType::SmallScenery,
            ElementData::Entrance(_) => ElementType::Entrance,
            ElementData::Wall(_) => ElementType::Wall,
            ElementData::LargeScenery(_) => ElementType::LargeScenery,
            ElementData::Banner(_) => ElementType::Banner,
            ElementData::Corrupt => ElementType::Corrupt,
        }
    }

    /// Base height in world units.
    pub const fn base_z(&self) -> i32 {
        self.base_height as i32 * COORDS_Z_STEP
    }

    /// Clearance height in world units.
    pub const fn clearance_z(&self) -> i32 {
        self.clearance_height as i32 * COORDS_Z_STEP
    }

    pub fn as_surface(&self) -> Option<&SurfaceElement> {
        match &self.data {
            ElementData::Surface(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn as_banner(&self) -> Option<&BannerElement> {
        match &self.data {
            ElementData::Banner(banner) => Some(banner),
            _ => None,
        }
    }

    pub fn as_entrance(&self) -> Option<&EntranceElement> {
        match &self.data {
            ElementData::Entrance(entrance) => Some(entrance),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&TrackElement> {
        match &self.data {
            ElementData::Track(track) => Some(track),
            _ => None,
        }
    }

    /// Banner record referenced by this element, if any.
    ///
    /// Banners, walls and large scenery may carry a banner index; a null index
    /// means no reference.
    pub fn banner_index(&self) -> Option<BannerIndex> {
        let index = match &self.data {
            ElementData::Banner(banner) => banner.index,
            ElementData::Wall(wall) => wall.banner,
            ElementData::LargeScenery(scenery) => scenery.banner,
            _ => return None,
        };
        (!index.is_null()).then_some(index)
    }

    /// Points the element at another banner record. No-op for kinds that
    /// cannot carry one.
    pub fn set_banner_index(&mut self, index: BannerIndex) {
        match &mut self.data {
            ElementData::Banner(banner) => banner.index = index,
            ElementData::Wall(wall) => wall.banner = index,
            ElementData::LargeScenery(scenery) => scenery.banner = index,
            _ => {}
        }
    }

    // ========================================================================
    // Raw record
    // ========================================================================

    /// Flattens the element into its 16-byte raw record.
    ///
    /// Layout: type, flags, direction, base height, clearance height,
    /// occupied quadrants, then ten bytes of kind-specific payload
    /// (multi-byte values big-endian).
    pub fn to_raw(&self) -> [u8; TILE_ELEMENT_SIZE] {
        let mut raw = [0u8; TILE_ELEMENT_SIZE];
        raw[0] = self.element_type() as u8;
        raw[1] = u8::from(self.is_ghost);
        raw[2] = self.direction;
        raw[3] = self.base_height;
        raw[4] = self.clearance_height;
        raw[5] = self.occupied_quadrants;

        let payload = &mut raw[6..];
        match &self.data {
            ElementData::Surface(surface) => {
                payload[0] = surface.slope;
                payload[1] = surface.ownership.bits();
                payload[2] = surface.park_fences;
            }
            ElementData::Path(path) => {
                payload[0] = u8::from(path.is_sloped) | (u8::from(path.is_broken) << 1);
                payload[1] = path.slope_direction;
                payload[2] = path.edges;
                payload[3..5].copy_from_slice(&path.surface.0.to_be_bytes());
            }
            ElementData::Track(track) => {
                payload[0..2].copy_from_slice(&track.ride.0.to_be_bytes());
                payload[2] = track.track_type;
                payload[3] = track.sequence;
                payload[4] = u8::from(track.has_chain)
                    | (u8::from(track.block_brake_closed) << 1)
                    | (u8::from(track.is_indestructible) << 2);
            }
            ElementData::SmallScenery(scenery) => {
                payload[0..2].copy_from_slice(&scenery.entry.0.to_be_bytes());
                payload[2] = scenery.quadrant;
            }
            ElementData::Entrance(entrance) => {
                payload[0] = entrance.entrance_type as u8;
                payload[1..3].copy_from_slice(&entrance.ride.0.to_be_bytes());
                payload[3] = entrance.station;
                payload[4] = entrance.sequence;
            }
            ElementData::Wall(wall) => {
                payload[0..2].copy_from_slice(&wall.entry.0.to_be_bytes());
                payload[2] = wall.slope;
                payload[3] = wall.animation_frame;
                payload[4..6].copy_from_slice(&wall.banner.0.to_be_bytes());
            }
            ElementData::LargeScenery(scenery) => {
                payload[0..2].copy_from_slice(&scenery.entry.0.to_be_bytes());
                payload[2] = scenery.sequence;
                payload[3..5].copy_from_slice(&scenery.banner.0.to_be_bytes());
            }
            ElementData::Banner(banner) => {
                payload[0..2].copy_from_slice(&banner.index.0.to_be_bytes());
                payload[2] = banner.position;
                payload[3] = banner.allowed_edges;
            }
            ElementData::Corrupt => {}
        }
        raw
    }

    /// Rebuilds an element from its raw record.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown type tags or unknown entrance types.
    pub fn from_raw(raw: &[u8; TILE_ELEMENT_SIZE]) -> Result<Self, StateError> {
        let element_type =
            ElementType::from_repr(raw[0]).ok_or(StateError::UnknownElementType(raw[0]))?;
        let p = &raw[6..];
        let u16_at = |offset: usize| u16::from_be_bytes([p[offset], p[offset + 1]]);

        let data = match element_type {
            ElementType::Surface => ElementData::Surface(SurfaceElement {
                slope: p[0],
                ownership: Ownership::from_bits_retain(p[1]),
                park_fences: p[2],
            }),
            ElementType::Path => ElementData::Path(PathElement {
                is_sloped: p[0] & 0b01 != 0,
                is_broken: p[0] & 0b10 != 0,
                slope_direction: p[1],
                edges: p[2],
                surface: ObjectEntryIndex(u16_at(3)),
            }),
            ElementType::Track => ElementData::Track(TrackElement {
                ride: RideId(u16_at(0)),
                track_type: p[2],
                sequence: p[3],
                has_chain: p[4] & 0b001 != 0,
                block_brake_closed: p[4] & 0b010 != 0,
                is_indestructible: p[4] & 0b100 != 0,
            }),
            ElementType::SmallScenery => ElementData::SmallScenery(SmallSceneryElement {
                entry: ObjectEntryIndex(u16_at(0)),
                quadrant: p[2],
            }),
            ElementType::Entrance => ElementData::Entrance(EntranceElement {
                entrance_type: EntranceType::from_repr(p[0])
                    .ok_or(StateError::UnknownEntranceType(p[0]))?,
                ride: RideId(u16_at(1)),
                station: p[3],
                sequence: p[4],
            }),
            ElementType::Wall => ElementData::Wall(WallElement {
                entry: ObjectEntryIndex(u16_at(0)),
                slope: p[2],
                animation_frame: p[3],
                banner: BannerIndex(u16_at(4)),
            }),
            ElementType::LargeScenery => ElementData::LargeScenery(LargeSceneryElement {
                entry: ObjectEntryIndex(u16_at(0)),
                sequence: p[2],
                banner: BannerIndex(u16_at(3)),
            }),
            ElementType::Banner => ElementData::Banner(BannerElement {
                index: BannerIndex(u16_at(0)),
                position: p[2],
                allowed_edges: p[3],
            }),
            ElementType::Corrupt => ElementData::Corrupt,
        };

        Ok(Self {
            base_height: raw[3],
            clearance_height: raw[4],
            direction: raw[2],
            occupied_quadrants: raw[5],
            is_ghost: raw[1] & 0b1 != 0,
            data,
        })
    }
}
