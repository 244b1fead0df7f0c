mod banner;
mod common;
mod finance;
mod invalidation;
mod network;
mod ride;
mod tile_element;
mod world;

pub use banner::{Banner, BannerFlags, BannerIndex, BannerTable, MAX_BANNERS};
pub use common::{
    COORDS_XY_HALF_TILE, COORDS_XY_STEP, COORDS_Z_STEP, CoordsXY, CoordsXYZ, CoordsXYZD,
    DIRECTION_DELTAS, Direction, INVALID_DIRECTION, LAND_HEIGHT_STEP, MAX_ELEMENT_HEIGHT, Money,
    NUM_DIRECTIONS, ObjectEntryIndex, TileCoordsXY, TileCoordsXYZD, direction_valid,
};
pub use finance::{ExpenditureType, Finance};
pub use invalidation::{InvalidatedRegion, InvalidationQueue};
pub use network::{
    GroupId, NetworkGroup, NetworkMode, NetworkPlayer, NetworkState, Permissions, PlayerFlags,
    PlayerId,
};
pub use ride::{MAX_STATIONS, Ride, RideId, RideStation, RideTable};
pub use tile_element::{
    BannerElement, ElementData, ElementType, EntranceElement, EntranceType, LargeSceneryElement,
    Ownership, PathElement, SLOPE_ALL_CORNERS_UP, SLOPE_DOUBLE_HEIGHT, SLOPE_E_CORNER_DN,
    SLOPE_E_CORNER_UP, SLOPE_FLAT, SLOPE_N_CORNER_DN, SLOPE_N_CORNER_UP, SLOPE_S_CORNER_DN,
    SLOPE_S_CORNER_UP, SLOPE_W_CORNER_DN, SLOPE_W_CORNER_UP, SmallSceneryElement,
    SurfaceElement, TILE_ELEMENT_SIZE, TileElement, TrackElement, WallElement,
};
pub use world::TileMap;
