use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Width of one tile in world units.
pub const COORDS_XY_STEP: i32 = 32;
/// Offset from a tile corner to its centre in world units.
pub const COORDS_XY_HALF_TILE: i32 = COORDS_XY_STEP / 2;
/// World units per element height unit.
pub const COORDS_Z_STEP: i32 = 8;
/// Height of one land step in world units.
pub const LAND_HEIGHT_STEP: i32 = 2 * COORDS_Z_STEP;
/// Highest base or clearance height an element may occupy (height units).
pub const MAX_ELEMENT_HEIGHT: i32 = 255;

/// Facing of an element, `0..4`. Anything else is invalid.
pub type Direction = u8;

pub const INVALID_DIRECTION: Direction = 0xFF;
pub const NUM_DIRECTIONS: u8 = 4;

/// Returns true for the four valid orientations.
#[inline]
pub const fn direction_valid(direction: Direction) -> bool {
    direction < NUM_DIRECTIONS
}

/// Neighbour offsets in world units, indexed by direction.
pub const DIRECTION_DELTAS: [CoordsXY; 4] = [
    CoordsXY { x: -COORDS_XY_STEP, y: 0 },
    CoordsXY { x: 0, y: COORDS_XY_STEP },
    CoordsXY { x: COORDS_XY_STEP, y: 0 },
    CoordsXY { x: 0, y: -COORDS_XY_STEP },
];

// ============================================================================
// World Coordinates
// ============================================================================

/// Horizontal location in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordsXY {
    pub x: i32,
    pub y: i32,
}

impl CoordsXY {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing this location.
    pub const fn to_tile(self) -> TileCoordsXY {
        TileCoordsXY {
            x: self.x.div_euclid(COORDS_XY_STEP),
            y: self.y.div_euclid(COORDS_XY_STEP),
        }
    }

    /// Location snapped to the north-west corner of its tile.
    pub const fn to_tile_start(self) -> Self {
        let tile = self.to_tile();
        Self {
            x: tile.x * COORDS_XY_STEP,
            y: tile.y * COORDS_XY_STEP,
        }
    }
}

impl Add for CoordsXY {
    type Output = CoordsXY;
    fn add(self, rhs: CoordsXY) -> CoordsXY {
        CoordsXY::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for CoordsXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Location in world units including height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordsXYZ {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CoordsXYZ {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn xy(self) -> CoordsXY {
        CoordsXY::new(self.x, self.y)
    }
}

impl fmt::Display for CoordsXYZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Location in world units with a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordsXYZD {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: Direction,
}

impl CoordsXYZD {
    pub const fn new(x: i32, y: i32, z: i32, direction: Direction) -> Self {
        Self { x, y, z, direction }
    }

    pub const fn xy(self) -> CoordsXY {
        CoordsXY::new(self.x, self.y)
    }

    pub const fn xyz(self) -> CoordsXYZ {
        CoordsXYZ::new(self.x, self.y, self.z)
    }
}

impl Default for CoordsXYZD {
    fn default() -> Self {
        Self::new(0, 0, 0, INVALID_DIRECTION)
    }
}

impl fmt::Display for CoordsXYZD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, dir {})",
            self.x, self.y, self.z, self.direction
        )
    }
}

// ============================================================================
// Tile Coordinates
// ============================================================================

/// Horizontal location in whole tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoordsXY {
    pub x: i32,
    pub y: i32,
}

impl TileCoordsXY {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn to_coords(self) -> CoordsXY {
        CoordsXY::new(self.x * COORDS_XY_STEP, self.y * COORDS_XY_STEP)
    }
}

impl fmt::Display for TileCoordsXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Tile location with height in element units and a facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoordsXYZD {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub direction: Direction,
}

impl TileCoordsXYZD {
    pub const fn new(tile: TileCoordsXY, z: i32, direction: Direction) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            z,
            direction,
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Index of an object definition (e.g. a banner type) in the loaded object list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectEntryIndex(pub u16);

impl fmt::Display for ObjectEntryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}", self.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Signed monetary amount. Negative values are refunds or income.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Div<i64> for Money {
    type Output = Money;
    fn div(self, rhs: i64) -> Money {
        Money(self.0 / rhs)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
