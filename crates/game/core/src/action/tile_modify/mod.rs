//! Tile inspector edits.
//!
//! [`TileModifyAction`] applies one of the low-level element edits exposed by
//! the in-game tile inspector: reordering, removing or pasting raw elements,
//! and adjusting kind-specific fields. Every edit is planned against the
//! current tile stack first; only `execute` applies the plan.
mod inspector;

use inspector::{Inspector, TileEdit, TilePlan, invalid, no_free_elements, too_many_banners};

use super::{
    ActionEnvelope, ActionFlags, ActionResult, GameAction, GameCommand, ParameterVisitor, Status,
    StringId,
};
use crate::env::GameEnv;
use crate::serialise::{DataSerialiser, Serialisable, SerialiseError};
use crate::state::{CoordsXY, CoordsXYZ, GameState, TileCoordsXY, TileElement};

/// Tile inspector sub-operation. `value1` usually selects the element index
/// within the tile stack and `value2` carries the operation's argument.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::FromRepr,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TileModifyType {
    #[default]
    AnyRemove,
    AnySwap,
    AnyInsertCorrupt,
    AnyRotate,
    AnyPaste,
    AnySort,
    AnyBaseHeightOffset,
    SurfaceShowParkFences,
    SurfaceToggleCorner,
    SurfaceToggleDiagonal,
    PathSetSlope,
    PathSetBroken,
    PathToggleEdge,
    EntranceMakeUsable,
    WallSetSlope,
    WallSetAnimationFrame,
    TrackBaseHeightOffset,
    TrackSetChain,
    TrackSetChainBlock,
    TrackSetBlockBrake,
    TrackSetIndestructible,
    ScenerySetQuarterLocation,
    ScenerySetQuarterCollision,
    BannerToggleBlockingEdge,
    CorruptClamp,
}

impl Serialisable for TileModifyType {
    fn encode(&self, out: &mut Vec<u8>) {
        (*self as u8).encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        let raw = u8::decode(stream)?;
        Self::from_repr(raw).ok_or(SerialiseError::InvalidValue {
            kind: "tile modify type",
            value: u32::from(raw),
        })
    }

    fn log(&self) -> String {
        let name: &'static str = self.into();
        name.to_owned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileModifyAction {
    envelope: ActionEnvelope,
    location: CoordsXY,
    setting: TileModifyType,
    value1: u32,
    value2: u32,
    paste_element: TileElement,
}

impl TileModifyAction {
    pub fn new(location: CoordsXY, setting: TileModifyType, value1: u32, value2: u32) -> Self {
        Self {
            envelope: ActionEnvelope::default(),
            location,
            setting,
            value1,
            value2,
            paste_element: TileElement::default(),
        }
    }

    /// Paste of a raw element onto the tile at `location`.
    pub fn paste(location: CoordsXY, element: TileElement) -> Self {
        Self {
            paste_element: element,
            ..Self::new(location, TileModifyType::AnyPaste, 0, 0)
        }
    }

    pub fn location(&self) -> CoordsXY {
        self.location
    }

    pub fn setting(&self) -> TileModifyType {
        self.setting
    }

    fn tile(&self) -> TileCoordsXY {
        self.location.to_tile()
    }

    fn plan(&self, state: &GameState) -> Result<(ActionResult, TilePlan), ActionResult> {
        if !state.location_valid(self.location) {
            return Err(ActionResult::error(
                Status::InvalidParameters,
                StringId::CantDoThis,
                StringId::LandNotOwnedByPark,
            ));
        }
        let tile = self.tile();
        let position = CoordsXYZ::new(self.location.x, self.location.y, state.map.surface_z(tile));
        let inspector =
            Inspector::new(state, tile).ok_or_else(|| invalid(tile, "tile is not loaded"))?;

        inspector
            .plan(self.setting, self.value1, self.value2, &self.paste_element)
            .map(|plan| (ActionResult::ok().with_position(position), plan))
            .map_err(|result| result.with_position(position))
    }

    fn apply(&self, plan: TilePlan, state: &mut GameState) -> Result<(), ActionResult> {
        let tile = self.tile();
        match plan.edit {
            TileEdit::Replace(edits) => {
                for (index, element) in edits {
                    if let Some(slot) = state.map.element_at_mut(tile, index) {
                        *slot = element;
                    }
                }
            }
            TileEdit::Remove { index, banner } => {
                if let Some(banner) = banner {
                    state.banners.remove(banner);
                }
                state.map.remove(tile, index);
            }
            TileEdit::Swap { first, second } => {
                state.map.swap(tile, first, second);
            }
            TileEdit::InsertAt { index, element } => {
                state
                    .map
                    .insert_at(tile, index, element)
                    .map_err(|_| no_free_elements())?;
            }
            TileEdit::Paste {
                element,
                copy_banner,
            } => {
                let mut copy = match copy_banner {
                    Some(source) => Some(
                        state
                            .banners
                            .get(source)
                            .cloned()
                            .ok_or_else(|| invalid(tile, "pasted banner does not resolve"))?,
                    ),
                    None => None,
                };
                let slot = state
                    .map
                    .insert(tile, element)
                    .map_err(|_| no_free_elements())?;
                if let Some(mut banner) = copy.take() {
                    banner.position = tile;
                    let Some(index) = state.banners.create(banner) else {
                        state.map.remove(tile, slot);
                        return Err(too_many_banners());
                    };
                    if let Some(pasted) = state.map.element_at_mut(tile, slot) {
                        pasted.set_banner_index(index);
                    }
                }
            }
            TileEdit::Sort => {
                if let Some(stack) = state.map.tile_mut(tile) {
                    stack.sort_by_key(|element| (element.base_height, element.clearance_height));
                }
            }
        }

        if let Some(update) = plan.station {
            let station = state
                .rides
                .get_mut(update.ride)
                .and_then(|ride| ride.station_mut(update.station));
            if let Some(station) = station {
                if update.exit {
                    station.exit = Some(update.location);
                } else {
                    station.entrance = Some(update.location);
                }
            }
        }

        state.invalidations.invalidate_tile_full(tile);
        Ok(())
    }
}

impl GameAction for TileModifyAction {
    fn action_type(&self) -> GameCommand {
        GameCommand::ModifyTile
    }

    fn envelope(&self) -> &ActionEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ActionEnvelope {
        &mut self.envelope
    }

    fn action_flags(&self) -> ActionFlags {
        ActionFlags::empty() | ActionFlags::ALLOW_WHILE_PAUSED
    }

    fn serialise_parameters(&mut self, stream: &mut DataSerialiser) -> Result<(), SerialiseError> {
        stream.serialise("location", &mut self.location)?;
        stream.serialise("setting", &mut self.setting)?;
        stream.serialise("value1", &mut self.value1)?;
        stream.serialise("value2", &mut self.value2)?;
        stream.serialise("paste_element", &mut self.paste_element)
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        visitor.visit_coords_xy("location", self.location);
        visitor.visit_int("setting", i64::from(self.setting as u8));
        visitor.visit_int("value1", i64::from(self.value1));
        visitor.visit_int("value2", i64::from(self.value2));
        visitor.visit_element("paste_element", &self.paste_element);
    }

    fn query(&self, state: &GameState, _env: &GameEnv<'_>) -> ActionResult {
        match self.plan(state) {
            Ok((result, _)) => result,
            Err(result) => result,
        }
    }

    fn execute(&self, state: &mut GameState, _env: &GameEnv<'_>) -> ActionResult {
        let (result, plan) = match self.plan(state) {
            Ok(planned) => planned,
            Err(result) => return result,
        };
        let position = result.position;
        match self.apply(plan, state) {
            Ok(()) => result,
            Err(failed) => ActionResult { position, ..failed },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{BANNER_KIND, Park, SURFACE_HEIGHT, set_ownership};
    use crate::state::{
        Banner, BannerIndex, CoordsXYZD, ElementData, EntranceElement, EntranceType, MAX_BANNERS,
        ObjectEntryIndex, Ownership, PathElement, Ride, RideId, SLOPE_DOUBLE_HEIGHT, SLOPE_FLAT,
        SLOPE_N_CORNER_DN, SLOPE_S_CORNER_UP, SmallSceneryElement, SurfaceElement,
        TileCoordsXYZD, TileMap, TrackElement, WallElement,
    };

    const TILE: TileCoordsXY = TileCoordsXY::new(5, 5);
    const AT: CoordsXY = CoordsXY::new(160, 160);

    fn run(park: &mut Park, action: &TileModifyAction) -> ActionResult {
        let env = GameEnv::with_scenery(&park.config, &park.scenery);
        action.execute(&mut park.state, &env)
    }

    fn path(height: u8) -> TileElement {
        TileElement::new(ElementData::Path(PathElement::default()), height, height + 2)
    }

    fn surface(park: &Park) -> SurfaceElement {
        park.stack(TILE)[0]
            .as_surface()
            .copied()
            .expect("surface at bottom")
    }

    fn set_slope(park: &mut Park, slope: u8) {
        if let Some(TileElement {
            data: ElementData::Surface(surface),
            ..
        }) = park.state.map.element_at_mut(TILE, 0)
        {
            surface.slope = slope;
        }
    }

    fn ride_exit(park: &mut Park, direction: u8) -> usize {
        park.state.rides.insert(RideId(1), Ride::new("coaster", 1));
        let exit = TileElement::new(
            ElementData::Entrance(EntranceElement {
                entrance_type: EntranceType::RideExit,
                ride: RideId(1),
                station: 0,
                sequence: 0,
            }),
            SURFACE_HEIGHT,
            SURFACE_HEIGHT + 4,
        )
        .with_direction(direction);
        park.insert(TILE, exit)
    }

    fn station_exit(park: &Park) -> Option<TileCoordsXYZD> {
        park.state
            .rides
            .get(RideId(1))
            .and_then(|ride| ride.station(0))
            .and_then(|station| station.exit)
    }

    #[test]
    fn off_map_location_is_rejected() {
        let park = Park::new();
        let action = TileModifyAction::new(CoordsXY::new(-32, 0), TileModifyType::AnySort, 0, 0);

        let result = action.query(&park.state, &park.env());
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(result.error_title, StringId::CantDoThis);
        assert_eq!(result.error_message, StringId::LandNotOwnedByPark);
    }

    #[test]
    fn query_reports_surface_position_without_mutating() {
        let mut park = Park::new();
        park.insert(TILE, path(6));
        let before = park.state.checksum().unwrap();

        let action = TileModifyAction::new(AT, TileModifyType::AnyRemove, 1, 0);
        let result = action.query(&park.state, &park.env());
        assert!(result.is_ok());
        assert_eq!(result.position, Some(CoordsXYZ::new(160, 160, 32)));
        assert_eq!(park.state.checksum().unwrap(), before);
        assert!(park.state.invalidations.is_empty());
    }

    #[test]
    fn remove_frees_the_banner_record() {
        let mut park = Park::new();
        let index = park.place_banner(CoordsXYZD::new(160, 160, 48, 0), false);

        let result = run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnyRemove, 1, 0));
        assert!(result.is_ok());
        assert_eq!(park.stack(TILE).len(), 1);
        assert!(park.state.banners.get(index).is_none());
        assert!(!park.state.invalidations.is_empty());
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut park = Park::new();
        let before = park.stack(TILE);

        let result = run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnySwap, 0, 5));
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(result.position, Some(CoordsXYZ::new(160, 160, 32)));
        assert_eq!(park.stack(TILE), before);
    }

    #[test]
    fn swap_then_sort_restores_height_order() {
        let mut park = Park::new();
        park.insert(TILE, path(6));

        run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnySwap, 0, 1));
        assert!(park.stack(TILE)[0].as_surface().is_none());

        run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnySort, 0, 0));
        let stack = park.stack(TILE);
        assert!(stack[0].as_surface().is_some());
        assert_eq!(stack[1].base_height, 6);
    }

    #[test]
    fn insert_corrupt_lands_below_selected_element() {
        let mut park = Park::new();
        park.insert(TILE, path(6));
        let count = park.state.map.element_count();

        let action = TileModifyAction::new(AT, TileModifyType::AnyInsertCorrupt, 1, 0);
        assert!(run(&mut park, &action).is_ok());

        let stack = park.stack(TILE);
        assert_eq!(stack[1].data, ElementData::Corrupt);
        assert_eq!(stack[1].base_height, 6);
        assert_eq!(stack[1].clearance_height, 6);
        assert!(matches!(stack[2].data, ElementData::Path(_)));
        assert_eq!(park.state.map.element_count(), count + 1);
    }

    #[test]
    fn corrupt_clamp_takes_height_of_next_element() {
        let mut park = Park::new();
        park.insert(TILE, TileElement::new(ElementData::Corrupt, 5, 5));
        park.insert(TILE, path(8));

        let clamp = TileModifyAction::new(AT, TileModifyType::CorruptClamp, 1, 0);
        assert!(run(&mut park, &clamp).is_ok());
        let stack = park.stack(TILE);
        assert_eq!((stack[1].base_height, stack[1].clearance_height), (8, 8));

        let not_corrupt = TileModifyAction::new(AT, TileModifyType::CorruptClamp, 2, 0);
        assert_eq!(run(&mut park, &not_corrupt).status, Status::InvalidParameters);
    }

    #[test]
    fn rotate_turns_banner_edges_and_position() {
        let mut park = Park::new();
        park.place_banner(CoordsXYZD::new(160, 160, 48, 0), false);
        let toggle = TileModifyAction::new(AT, TileModifyType::BannerToggleBlockingEdge, 1, 1);
        run(&mut park, &toggle);

        run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnyRotate, 1, 0));
        let banner = *park.stack(TILE)[1].as_banner().expect("banner element");
        assert_eq!(banner.allowed_edges, 0b1011);
        assert_eq!(banner.position, 1);
    }

    #[test]
    fn paste_copies_banner_record_to_new_tile() {
        let mut park = Park::new();
        let source = park.place_banner(CoordsXYZD::new(160, 160, 48, 0), false);
        let element = park.stack(TILE)[1];
        let target = TileCoordsXY::new(6, 6);

        let result = run(
            &mut park,
            &TileModifyAction::paste(CoordsXY::new(192, 192), element),
        );
        assert!(result.is_ok());
        assert_eq!(park.state.banners.len(), 2);

        let pasted = park.stack(target)[1];
        let copy = pasted.banner_index().expect("pasted banner index");
        assert_ne!(copy, source);
        let banner = park.state.banners.get(copy).expect("copied record");
        assert_eq!(banner.position, target);
        assert_eq!(banner.kind, BANNER_KIND);
    }

    #[test]
    fn paste_fails_when_banner_table_is_full() {
        let mut park = Park::new();
        park.place_banner(CoordsXYZD::new(160, 160, 48, 0), false);
        let element = park.stack(TILE)[1];
        while park
            .state
            .banners
            .create(Banner::new(BANNER_KIND, TILE))
            .is_some()
        {}
        assert_eq!(park.state.banners.len(), MAX_BANNERS);

        let result = run(&mut park, &TileModifyAction::paste(AT, element));
        assert_eq!(result.status, Status::Unknown);
        assert_eq!(result.error_title, StringId::TooManyBannersInGame);
        assert_eq!(park.stack(TILE).len(), 2);
    }

    #[test]
    fn paste_fails_without_element_budget() {
        let mut park = Park::new();
        park.state.map = TileMap::flat(32, SURFACE_HEIGHT, 0);

        let result = run(&mut park, &TileModifyAction::paste(AT, path(6)));
        assert_eq!(result.status, Status::NoFreeElements);
        assert_eq!(park.stack(TILE).len(), 1);
    }

    #[test]
    fn base_height_offset_is_bounded() {
        let mut park = Park::new();
        let lower = TileModifyAction::new(
            AT,
            TileModifyType::AnyBaseHeightOffset,
            0,
            u32::from(-5i8 as u8),
        );
        let result = run(&mut park, &lower);
        assert_eq!(result.status, Status::TooLow);
        assert_eq!(result.error_title, StringId::CantLowerElementHere);

        let raise = TileModifyAction::new(AT, TileModifyType::AnyBaseHeightOffset, 0, 2);
        assert!(run(&mut park, &raise).is_ok());
        let stack = park.stack(TILE);
        assert_eq!((stack[0].base_height, stack[0].clearance_height), (6, 6));
    }

    #[test]
    fn raising_last_corner_flattens_one_step_higher() {
        let mut park = Park::new();
        set_slope(&mut park, SLOPE_N_CORNER_DN);

        let action = TileModifyAction::new(AT, TileModifyType::SurfaceToggleCorner, 0, 0);
        assert!(run(&mut park, &action).is_ok());
        assert_eq!(surface(&park).slope, SLOPE_FLAT);
        assert_eq!(park.stack(TILE)[0].base_height, SURFACE_HEIGHT + 2);
    }

    #[test]
    fn toggle_corner_on_flat_land_raises_one_corner() {
        let mut park = Park::new();
        let action = TileModifyAction::new(AT, TileModifyType::SurfaceToggleCorner, 2, 0);
        assert!(run(&mut park, &action).is_ok());
        assert_eq!(surface(&park).slope, SLOPE_S_CORNER_UP);
        assert_eq!(park.stack(TILE)[0].base_height, SURFACE_HEIGHT);

        let bad = TileModifyAction::new(AT, TileModifyType::SurfaceToggleCorner, 4, 0);
        assert_eq!(run(&mut park, &bad).status, Status::InvalidParameters);
    }

    #[test]
    fn toggle_diagonal_adjusts_clearance() {
        let mut park = Park::new();
        let action = TileModifyAction::new(AT, TileModifyType::SurfaceToggleDiagonal, 0, 0);
        run(&mut park, &action);
        assert_eq!(surface(&park).slope, SLOPE_DOUBLE_HEIGHT);
        assert_eq!(park.stack(TILE)[0].clearance_height, SURFACE_HEIGHT + 4);

        run(&mut park, &action);
        assert_eq!(park.stack(TILE)[0].clearance_height, SURFACE_HEIGHT);
    }

    #[test]
    fn park_fences_face_owned_neighbours() {
        let mut park = Park::new();
        set_ownership(&mut park.state, TILE, Ownership::empty());
        set_ownership(&mut park.state, TileCoordsXY::new(4, 5), Ownership::empty());

        let show = TileModifyAction::new(AT, TileModifyType::SurfaceShowParkFences, 1, 0);
        assert!(run(&mut park, &show).is_ok());
        // West neighbour (4, 5) is unowned.
        assert_eq!(surface(&park).park_fences, 0x1 | 0x2 | 0x4);

        let hide = TileModifyAction::new(AT, TileModifyType::SurfaceShowParkFences, 0, 0);
        run(&mut park, &hide);
        assert_eq!(surface(&park).park_fences, 0);
    }

    #[test]
    fn owned_tile_gets_no_fences() {
        let mut park = Park::new();
        let show = TileModifyAction::new(AT, TileModifyType::SurfaceShowParkFences, 1, 0);
        run(&mut park, &show);
        assert_eq!(surface(&park).park_fences, 0);
    }

    #[test]
    fn path_edits_require_a_path() {
        let mut park = Park::new();
        park.insert(TILE, path(6));

        run(&mut park, &TileModifyAction::new(AT, TileModifyType::PathSetSlope, 1, 1));
        run(&mut park, &TileModifyAction::new(AT, TileModifyType::PathToggleEdge, 1, 6));
        let ElementData::Path(edited) = park.stack(TILE)[1].data else {
            panic!("expected path");
        };
        assert!(edited.is_sloped);
        assert_eq!(edited.edges, 1 << 6);

        let wrong = TileModifyAction::new(AT, TileModifyType::PathSetBroken, 0, 1);
        assert_eq!(run(&mut park, &wrong).status, Status::InvalidParameters);
    }

    #[test]
    fn make_usable_records_station_exit() {
        let mut park = Park::new();
        let slot = ride_exit(&mut park, 2);
        assert_eq!(station_exit(&park), None);

        let action =
            TileModifyAction::new(AT, TileModifyType::EntranceMakeUsable, slot as u32, 0);
        assert!(run(&mut park, &action).is_ok());
        assert_eq!(
            station_exit(&park),
            Some(TileCoordsXYZD::new(TILE, i32::from(SURFACE_HEIGHT), 2))
        );
    }

    #[test]
    fn moving_a_recorded_exit_keeps_station_in_sync() {
        let mut park = Park::new();
        let slot = ride_exit(&mut park, 2) as u32;
        run(
            &mut park,
            &TileModifyAction::new(AT, TileModifyType::EntranceMakeUsable, slot, 0),
        );

        run(&mut park, &TileModifyAction::new(AT, TileModifyType::AnyRotate, slot, 0));
        assert_eq!(park.stack(TILE)[slot as usize].direction, 3);
        assert_eq!(station_exit(&park).map(|exit| exit.direction), Some(3));

        let raise = TileModifyAction::new(AT, TileModifyType::AnyBaseHeightOffset, slot, 2);
        run(&mut park, &raise);
        assert_eq!(
            station_exit(&park).map(|exit| exit.z),
            Some(i32::from(SURFACE_HEIGHT) + 2)
        );
    }

    #[test]
    fn chain_block_edits_every_element_of_the_piece() {
        let mut park = Park::new();
        let track = |track_type| {
            TileElement::new(
                ElementData::Track(TrackElement {
                    ride: RideId(1),
                    track_type,
                    ..TrackElement::default()
                }),
                6,
                8,
            )
        };
        park.insert(TILE, track(3));
        park.insert(TILE, track(3));
        park.insert(TILE, track(9));

        let single = TileModifyAction::new(AT, TileModifyType::TrackSetChain, 1, 1);
        run(&mut park, &single);
        let chained = |park: &Park| {
            park.stack(TILE)[1..]
                .iter()
                .map(|element| element.as_track().is_some_and(|track| track.has_chain))
                .collect::<Vec<_>>()
        };
        assert_eq!(chained(&park), [true, false, false]);

        let block = TileModifyAction::new(AT, TileModifyType::TrackSetChainBlock, 2, 1);
        run(&mut park, &block);
        assert_eq!(chained(&park), [true, true, false]);
    }

    #[test]
    fn scenery_quarter_location_and_collision() {
        let mut park = Park::new();
        let scenery = TileElement::new(
            ElementData::SmallScenery(SmallSceneryElement {
                entry: ObjectEntryIndex(7),
                quadrant: 0,
            }),
            4,
            6,
        );
        park.insert(TILE, scenery);

        let locate = TileModifyAction::new(AT, TileModifyType::ScenerySetQuarterLocation, 1, 1);
        run(&mut park, &locate);
        let element = park.stack(TILE)[1];
        assert_eq!(element.occupied_quadrants, 1 << 3);

        let collide = TileModifyAction::new(AT, TileModifyType::ScenerySetQuarterCollision, 1, 0);
        run(&mut park, &collide);
        assert_eq!(park.stack(TILE)[1].occupied_quadrants, (1 << 3) | 1);
    }

    #[test]
    fn wall_animation_frame_wraps() {
        let mut park = Park::new();
        let wall = TileElement::new(
            ElementData::Wall(WallElement {
                entry: ObjectEntryIndex(2),
                slope: 0,
                animation_frame: 15,
                banner: BannerIndex::NULL,
            }),
            4,
            8,
        );
        park.insert(TILE, wall);

        run(
            &mut park,
            &TileModifyAction::new(AT, TileModifyType::WallSetAnimationFrame, 1, 1),
        );
        let ElementData::Wall(wall) = park.stack(TILE)[1].data else {
            panic!("expected wall");
        };
        assert_eq!(wall.animation_frame, 0);

        let steep = TileModifyAction::new(AT, TileModifyType::WallSetSlope, 1, 3);
        assert_eq!(run(&mut park, &steep).status, Status::InvalidParameters);
    }

    #[test]
    fn setting_decodes_by_discriminant() {
        let mut stream = DataSerialiser::reader(vec![TileModifyType::CorruptClamp as u8]);
        assert_eq!(
            TileModifyType::decode(&mut stream).unwrap(),
            TileModifyType::CorruptClamp
        );
        assert_eq!(TileModifyType::AnySwap.log(), "any_swap");

        let mut stream = DataSerialiser::reader(vec![200]);
        assert!(matches!(
            TileModifyType::decode(&mut stream),
            Err(SerialiseError::InvalidValue { value: 200, .. })
        ));
    }
}
