//! Planning of tile inspector edits.
//!
//! Each sub-operation is validated against the current tile stack and turned
//! into a [`TilePlan`] without touching the world. Applying the plan is the
//! only mutating step.

use tracing::error;

use super::TileModifyType;
use crate::action::{ActionResult, Status, StringId};
use crate::state::{
    BannerIndex, COORDS_Z_STEP, CoordsXY, DIRECTION_DELTAS, ElementData, EntranceElement,
    EntranceType, GameState, LAND_HEIGHT_STEP, MAX_ELEMENT_HEIGHT, Ownership, PathElement, RideId,
    SLOPE_ALL_CORNERS_UP, SLOPE_DOUBLE_HEIGHT, SLOPE_E_CORNER_DN, SLOPE_E_CORNER_UP, SLOPE_FLAT,
    SLOPE_N_CORNER_DN, SLOPE_N_CORNER_UP, SLOPE_S_CORNER_DN, SLOPE_S_CORNER_UP, SLOPE_W_CORNER_DN,
    SLOPE_W_CORNER_UP, TileCoordsXY, TileCoordsXYZD, TileElement, TrackElement,
};

/// Validated edit ready to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct TilePlan {
    pub edit: TileEdit,
    /// Station bookkeeping to keep in sync with an edited ride entrance or exit.
    pub station: Option<StationUpdate>,
}

impl TilePlan {
    fn new(edit: TileEdit) -> Self {
        Self {
            edit,
            station: None,
        }
    }

    fn with_station(mut self, station: Option<StationUpdate>) -> Self {
        self.station = station;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum TileEdit {
    /// Overwrite elements in place.
    Replace(Vec<(usize, TileElement)>),
    /// Drop an element and free the banner it referenced.
    Remove {
        index: usize,
        banner: Option<BannerIndex>,
    },
    Swap {
        first: usize,
        second: usize,
    },
    InsertAt {
        index: usize,
        element: TileElement,
    },
    /// Insert by height, optionally duplicating a banner record for it.
    Paste {
        element: TileElement,
        copy_banner: Option<BannerIndex>,
    },
    Sort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct StationUpdate {
    pub ride: RideId,
    pub station: u8,
    pub exit: bool,
    pub location: TileCoordsXYZD,
}

pub(super) fn invalid(tile: TileCoordsXY, reason: &'static str) -> ActionResult {
    error!(x = tile.x, y = tile.y, reason, "invalid tile modify parameters");
    ActionResult::error(Status::InvalidParameters, StringId::CantDoThis, StringId::None)
}

/// Read-only view of one tile while planning an edit.
pub(super) struct Inspector<'a> {
    state: &'a GameState,
    tile: TileCoordsXY,
    stack: &'a [TileElement],
}

impl<'a> Inspector<'a> {
    pub fn new(state: &'a GameState, tile: TileCoordsXY) -> Option<Self> {
        let stack = state.map.tile(tile)?;
        Some(Self { state, tile, stack })
    }

    fn invalid(&self, reason: &'static str) -> ActionResult {
        invalid(self.tile, reason)
    }

    fn element(&self, index: u32) -> Result<(usize, &'a TileElement), ActionResult> {
        let index = index as usize;
        self.stack
            .get(index)
            .map(|element| (index, element))
            .ok_or_else(|| {
                error!(x = self.tile.x, y = self.tile.y, index, "element index out of range");
                ActionResult::error(Status::InvalidParameters, StringId::CantDoThis, StringId::None)
            })
    }

    /// Copies the element at `index`, lets `edit` change the copy, and plans a
    /// replacement.
    fn modify<F>(&self, index: u32, edit: F) -> Result<TilePlan, ActionResult>
    where
        F: FnOnce(&mut TileElement) -> Result<(), ActionResult>,
    {
        let (index, element) = self.element(index)?;
        let mut element = *element;
        edit(&mut element)?;
        Ok(TilePlan::new(TileEdit::Replace(vec![(index, element)])))
    }

    pub fn plan(
        &self,
        setting: TileModifyType,
        value1: u32,
        value2: u32,
        paste: &TileElement,
    ) -> Result<TilePlan, ActionResult> {
        use TileModifyType::*;
        match setting {
            AnyRemove => self.remove(value1),
            AnySwap => self.swap(value1, value2),
            AnyInsertCorrupt => self.insert_corrupt(value1),
            AnyRotate => self.rotate(value1),
            AnyPaste => self.paste(paste),
            AnySort => Ok(TilePlan::new(TileEdit::Sort)),
            AnyBaseHeightOffset => self.base_height_offset(value1, value2 as i8),
            SurfaceShowParkFences => self.show_park_fences(value1 != 0),
            SurfaceToggleCorner => self.toggle_corner(value1),
            SurfaceToggleDiagonal => self.toggle_diagonal(),
            PathSetSlope => self.path(value1, |path| path.is_sloped = value2 != 0),
            PathSetBroken => self.path(value1, |path| path.is_broken = value2 != 0),
            PathToggleEdge => self.path_toggle_edge(value1, value2),
            EntranceMakeUsable => self.entrance_make_usable(value1),
            WallSetSlope => self.wall_set_slope(value1, value2),
            WallSetAnimationFrame => self.wall_animation_frame(value1, value2 as i8),
            TrackBaseHeightOffset => self.track_height_offset(value1, value2 as i8),
            TrackSetChain => self.track(value1, false, |track| track.has_chain = value2 != 0),
            TrackSetChainBlock => self.track(value1, true, |track| track.has_chain = value2 != 0),
            TrackSetBlockBrake => {
                self.track(value1, false, |track| track.block_brake_closed = value2 != 0)
            }
            TrackSetIndestructible => {
                self.track(value1, true, |track| track.is_indestructible = value2 != 0)
            }
            ScenerySetQuarterLocation => self.scenery_quarter_location(value1, value2),
            ScenerySetQuarterCollision => self.scenery_quarter_collision(value1, value2),
            BannerToggleBlockingEdge => self.banner_toggle_edge(value1, value2),
            CorruptClamp => self.corrupt_clamp(value1),
        }
    }

    // ------------------------------------------------------------------------
    // Any element
    // ------------------------------------------------------------------------

    fn remove(&self, index: u32) -> Result<TilePlan, ActionResult> {
        let (index, element) = self.element(index)?;
        Ok(TilePlan::new(TileEdit::Remove {
            index,
            banner: element.banner_index(),
        }))
    }

    fn swap(&self, first: u32, second: u32) -> Result<TilePlan, ActionResult> {
        let (first, _) = self.element(first)?;
        let (second, _) = self.element(second)?;
        Ok(TilePlan::new(TileEdit::Swap { first, second }))
    }

    /// Corrupt element placed directly below the selected one, at its height.
    fn insert_corrupt(&self, index: u32) -> Result<TilePlan, ActionResult> {
        let (index, selected) = self.element(index)?;
        if !self.state.map.has_free_elements(1) {
            return Err(no_free_elements());
        }
        let height = selected.base_height;
        Ok(TilePlan::new(TileEdit::InsertAt {
            index,
            element: TileElement::new(ElementData::Corrupt, height, height),
        }))
    }

    fn rotate(&self, index: u32) -> Result<TilePlan, ActionResult> {
        let (slot, original) = self.element(index)?;
        let mut element = *original;
        let mut station = None;

        match &mut element.data {
            ElementData::Path(path) => {
                if path.is_sloped {
                    path.slope_direction = (path.slope_direction + 1) & 3;
                }
                let edges = path.edges & 0x0F;
                let corners = path.edges >> 4;
                path.edges = rotate_nibble(edges) | (rotate_nibble(corners) << 4);
            }
            ElementData::Entrance(entrance) => {
                let direction = (original.direction + 1) & 3;
                element.direction = direction;
                station = self.station_sync(original, *entrance, |location| TileCoordsXYZD {
                    direction,
                    ..location
                });
            }
            ElementData::Track(_) | ElementData::SmallScenery(_) | ElementData::Wall(_) => {
                element.direction = (element.direction + 1) & 3;
            }
            ElementData::Banner(banner) => {
                banner.allowed_edges = rotate_nibble(banner.allowed_edges);
                banner.position = (banner.position + 1) & 3;
            }
            ElementData::Surface(_) | ElementData::LargeScenery(_) | ElementData::Corrupt => {}
        }

        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])).with_station(station))
    }

    fn paste(&self, element: &TileElement) -> Result<TilePlan, ActionResult> {
        if !self.state.map.has_free_elements(1) {
            return Err(no_free_elements());
        }
        let copy_banner = element.banner_index();
        if let Some(source) = copy_banner {
            if self.state.banners.get(source).is_none() {
                return Err(self.invalid("pasted banner does not resolve"));
            }
            if self.state.banners.next_free().is_none() {
                return Err(too_many_banners());
            }
        }
        Ok(TilePlan::new(TileEdit::Paste {
            element: *element,
            copy_banner,
        }))
    }

    fn base_height_offset(&self, index: u32, offset: i8) -> Result<TilePlan, ActionResult> {
        let (slot, original) = self.element(index)?;
        let element = offset_heights(original, offset)?;
        let station = match original.data {
            ElementData::Entrance(entrance) => {
                self.station_sync(original, entrance, |location| TileCoordsXYZD {
                    z: i32::from(element.base_height),
                    ..location
                })
            }
            _ => None,
        };
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])).with_station(station))
    }

    // ------------------------------------------------------------------------
    // Surface
    // ------------------------------------------------------------------------

    fn surface_index(&self) -> Result<(usize, &'a TileElement), ActionResult> {
        self.stack
            .iter()
            .enumerate()
            .find(|(_, element)| element.as_surface().is_some())
            .ok_or_else(|| self.invalid("tile has no surface"))
    }

    /// Fences face every owned neighbour of an unowned tile without a park
    /// entrance.
    fn show_park_fences(&self, show: bool) -> Result<TilePlan, ActionResult> {
        let (slot, element) = self.surface_index()?;
        let mut element = *element;
        let ElementData::Surface(surface) = &mut element.data else {
            return Err(self.invalid("tile has no surface"));
        };

        surface.park_fences = 0;
        let has_park_entrance = self.stack.iter().any(|other| {
            other
                .as_entrance()
                .is_some_and(|entrance| entrance.entrance_type == EntranceType::ParkEntrance)
        });
        if show && !surface.ownership.contains(Ownership::OWNED) && !has_park_entrance {
            const FENCE_BITS: [u8; 4] = [0x8, 0x1, 0x2, 0x4];
            let origin = self.tile.to_coords();
            for (delta, bit) in DIRECTION_DELTAS.iter().zip(FENCE_BITS) {
                if self.owned(origin + *delta) {
                    surface.park_fences |= bit;
                }
            }
        }
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])))
    }

    fn owned(&self, coords: CoordsXY) -> bool {
        self.state.map.contains_coords(coords)
            && self
                .state
                .map
                .surface(coords.to_tile())
                .is_some_and(|(_, surface, _)| surface.ownership.contains(Ownership::OWNED))
    }

    fn toggle_corner(&self, corner: u32) -> Result<TilePlan, ActionResult> {
        if corner >= 4 {
            return Err(self.invalid("corner index out of range"));
        }
        let (slot, element) = self.surface_index()?;
        let mut element = *element;
        let base = element.base_height;
        let ElementData::Surface(surface) = &mut element.data else {
            return Err(self.invalid("tile has no surface"));
        };

        let original = surface.slope;
        let double_height = original & SLOPE_DOUBLE_HEIGHT != 0;
        let mut slope = original ^ (1 << corner);

        if slope & SLOPE_ALL_CORNERS_UP == SLOPE_ALL_CORNERS_UP {
            slope = SLOPE_FLAT;
            if double_height {
                slope |= match original & SLOPE_ALL_CORNERS_UP {
                    SLOPE_S_CORNER_DN => SLOPE_N_CORNER_UP,
                    SLOPE_W_CORNER_DN => SLOPE_E_CORNER_UP,
                    SLOPE_N_CORNER_DN => SLOPE_S_CORNER_UP,
                    SLOPE_E_CORNER_DN => SLOPE_W_CORNER_UP,
                    _ => SLOPE_FLAT,
                };
            }
            let raised = i32::from(base) + LAND_HEIGHT_STEP / COORDS_Z_STEP;
            if raised > MAX_ELEMENT_HEIGHT {
                return Err(too_high());
            }
            surface.slope = slope;
            element.base_height = raised as u8;
            element.clearance_height = element
                .base_height
                .saturating_add(if double_height { 2 } else { 0 });
        } else {
            surface.slope = slope;
        }
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])))
    }

    fn toggle_diagonal(&self) -> Result<TilePlan, ActionResult> {
        let (slot, element) = self.surface_index()?;
        let mut element = *element;
        let base = element.base_height;
        let ElementData::Surface(surface) = &mut element.data else {
            return Err(self.invalid("tile has no surface"));
        };
        surface.slope ^= SLOPE_DOUBLE_HEIGHT;
        let raise = if surface.slope & SLOPE_DOUBLE_HEIGHT != 0 {
            4
        } else if surface.slope & SLOPE_ALL_CORNERS_UP != 0 {
            2
        } else {
            0
        };
        element.clearance_height = base.saturating_add(raise);
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])))
    }

    // ------------------------------------------------------------------------
    // Path, entrance, wall
    // ------------------------------------------------------------------------

    fn path<F>(&self, index: u32, edit: F) -> Result<TilePlan, ActionResult>
    where
        F: FnOnce(&mut PathElement),
    {
        self.modify(index, |element| match &mut element.data {
            ElementData::Path(path) => {
                edit(path);
                Ok(())
            }
            _ => Err(self.invalid("element is not a path")),
        })
    }

    fn path_toggle_edge(&self, index: u32, edge: u32) -> Result<TilePlan, ActionResult> {
        if edge >= 8 {
            return Err(self.invalid("path edge out of range"));
        }
        self.path(index, |path| path.edges ^= 1 << edge)
    }

    fn entrance_make_usable(&self, index: u32) -> Result<TilePlan, ActionResult> {
        let (slot, element) = self.element(index)?;
        let Some(entrance) = element.as_entrance() else {
            return Err(self.invalid("element is not an entrance"));
        };
        let exit = match entrance.entrance_type {
            EntranceType::RideEntrance => false,
            EntranceType::RideExit => true,
            EntranceType::ParkEntrance => {
                return Err(self.invalid("park entrances have no station"));
            }
        };
        let ride = self
            .state
            .rides
            .get(entrance.ride)
            .ok_or_else(|| self.invalid("entrance references a missing ride"))?;
        if ride.station(entrance.station).is_none() {
            return Err(self.invalid("entrance references a missing station"));
        }

        let update = StationUpdate {
            ride: entrance.ride,
            station: entrance.station,
            exit,
            location: TileCoordsXYZD::new(
                self.tile,
                i32::from(element.base_height),
                element.direction,
            ),
        };
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, *element)])).with_station(Some(update)))
    }

    /// Station update for an entrance or exit whose recorded location is this
    /// element, mapped through `adjust`.
    fn station_sync<F>(
        &self,
        element: &TileElement,
        entrance: EntranceElement,
        adjust: F,
    ) -> Option<StationUpdate>
    where
        F: FnOnce(TileCoordsXYZD) -> TileCoordsXYZD,
    {
        let exit = match entrance.entrance_type {
            EntranceType::RideEntrance => false,
            EntranceType::RideExit => true,
            EntranceType::ParkEntrance => return None,
        };
        let station = self.state.rides.get(entrance.ride)?.station(entrance.station)?;
        let recorded = if exit { station.exit } else { station.entrance }?;
        let here = recorded.x == self.tile.x
            && recorded.y == self.tile.y
            && recorded.z == i32::from(element.base_height);
        here.then(|| StationUpdate {
            ride: entrance.ride,
            station: entrance.station,
            exit,
            location: adjust(recorded),
        })
    }

    fn wall_set_slope(&self, index: u32, slope: u32) -> Result<TilePlan, ActionResult> {
        if slope > 2 {
            return Err(self.invalid("wall slope out of range"));
        }
        self.modify(index, |element| match &mut element.data {
            ElementData::Wall(wall) => {
                wall.slope = slope as u8;
                Ok(())
            }
            _ => Err(self.invalid("element is not a wall")),
        })
    }

    fn wall_animation_frame(&self, index: u32, offset: i8) -> Result<TilePlan, ActionResult> {
        self.modify(index, |element| match &mut element.data {
            ElementData::Wall(wall) => {
                wall.animation_frame = wall.animation_frame.wrapping_add(offset as u8) & 0x0F;
                Ok(())
            }
            _ => Err(self.invalid("element is not a wall")),
        })
    }

    // ------------------------------------------------------------------------
    // Track
    // ------------------------------------------------------------------------

    /// Indices of the selected track element and, for whole-block edits, every
    /// track element on the tile belonging to the same piece.
    fn track_block(&self, index: u32, whole_block: bool) -> Result<Vec<usize>, ActionResult> {
        let (slot, element) = self.element(index)?;
        let Some(track) = element.as_track() else {
            return Err(self.invalid("element is not track"));
        };
        if !whole_block {
            return Ok(vec![slot]);
        }
        Ok(self
            .stack
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                other.as_track().is_some_and(|other| {
                    other.ride == track.ride && other.track_type == track.track_type
                })
            })
            .map(|(i, _)| i)
            .collect())
    }

    fn track<F>(&self, index: u32, whole_block: bool, edit: F) -> Result<TilePlan, ActionResult>
    where
        F: Fn(&mut TrackElement),
    {
        let edits = self
            .track_block(index, whole_block)?
            .into_iter()
            .map(|slot| {
                let mut element = self.stack[slot];
                if let ElementData::Track(track) = &mut element.data {
                    edit(track);
                }
                (slot, element)
            })
            .collect();
        Ok(TilePlan::new(TileEdit::Replace(edits)))
    }

    fn track_height_offset(&self, index: u32, offset: i8) -> Result<TilePlan, ActionResult> {
        let edits = self
            .track_block(index, true)?
            .into_iter()
            .map(|slot| Ok((slot, offset_heights(&self.stack[slot], offset)?)))
            .collect::<Result<Vec<_>, ActionResult>>()?;
        Ok(TilePlan::new(TileEdit::Replace(edits)))
    }

    // ------------------------------------------------------------------------
    // Scenery, banner, corrupt
    // ------------------------------------------------------------------------

    fn scenery_quarter_location(&self, index: u32, quarter: u32) -> Result<TilePlan, ActionResult> {
        if quarter >= 4 {
            return Err(self.invalid("quarter out of range"));
        }
        self.modify(index, |element| match &mut element.data {
            ElementData::SmallScenery(scenery) => {
                scenery.quadrant = quarter as u8;
                element.occupied_quadrants = 1 << ((quarter + 2) & 3);
                Ok(())
            }
            _ => Err(self.invalid("element is not small scenery")),
        })
    }

    fn scenery_quarter_collision(&self, index: u32, quarter: u32) -> Result<TilePlan, ActionResult> {
        if quarter >= 4 {
            return Err(self.invalid("quarter out of range"));
        }
        self.modify(index, |element| {
            if !matches!(element.data, ElementData::SmallScenery(_)) {
                return Err(self.invalid("element is not small scenery"));
            }
            element.occupied_quadrants ^= 1 << quarter;
            Ok(())
        })
    }

    fn banner_toggle_edge(&self, index: u32, edge: u32) -> Result<TilePlan, ActionResult> {
        if edge >= 4 {
            return Err(self.invalid("banner edge out of range"));
        }
        self.modify(index, |element| match &mut element.data {
            ElementData::Banner(banner) => {
                banner.allowed_edges ^= 1 << edge;
                Ok(())
            }
            _ => Err(self.invalid("element is not a banner")),
        })
    }

    /// Flattens a corrupt element onto the base height of the one above it.
    fn corrupt_clamp(&self, index: u32) -> Result<TilePlan, ActionResult> {
        let (slot, element) = self.element(index)?;
        if !matches!(element.data, ElementData::Corrupt) {
            return Err(self.invalid("element is not corrupt"));
        }
        let Some(next) = self.stack.get(slot + 1) else {
            return Err(self.invalid("corrupt element is last on tile"));
        };
        let mut element = *element;
        element.base_height = next.base_height;
        element.clearance_height = next.base_height;
        Ok(TilePlan::new(TileEdit::Replace(vec![(slot, element)])))
    }
}

/// Rotates a four-bit edge mask one step clockwise.
fn rotate_nibble(bits: u8) -> u8 {
    ((bits << 1) | (bits >> 3)) & 0x0F
}

fn offset_heights(element: &TileElement, offset: i8) -> Result<TileElement, ActionResult> {
    let base = i32::from(element.base_height) + i32::from(offset);
    let clearance = i32::from(element.clearance_height) + i32::from(offset);
    if base < 0 || clearance < 0 {
        return Err(ActionResult::error(
            Status::TooLow,
            StringId::CantLowerElementHere,
            StringId::None,
        ));
    }
    if base > MAX_ELEMENT_HEIGHT || clearance > MAX_ELEMENT_HEIGHT {
        return Err(too_high());
    }
    let mut element = *element;
    element.base_height = base as u8;
    element.clearance_height = clearance as u8;
    Ok(element)
}

fn too_high() -> ActionResult {
    ActionResult::error(Status::TooHigh, StringId::CantRaiseElementHere, StringId::None)
}

pub(super) fn no_free_elements() -> ActionResult {
    ActionResult::error(Status::NoFreeElements, StringId::CantDoThis, StringId::None)
}

pub(super) fn too_many_banners() -> ActionResult {
    ActionResult::error(
        Status::Unknown,
        StringId::TooManyBannersInGame,
        StringId::None,
    )
}
