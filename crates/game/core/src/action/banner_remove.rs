//! Removal of a banner standing on a tile edge.

use tracing::error;

use super::{
    ActionEnvelope, ActionResult, CommandFlags, GameAction, GameCommand, ParameterVisitor, Status,
    StringId,
};
use crate::env::GameEnv;
use crate::serialise::{DataSerialiser, SerialiseError};
use crate::state::{
    BannerIndex, COORDS_XY_HALF_TILE, CoordsXYZ, CoordsXYZD, ExpenditureType, GameState,
    LAND_HEIGHT_STEP, Money, TileCoordsXY,
};

/// Removes the banner at an exact location and facing, refunding three
/// quarters of its placement price.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BannerRemoveAction {
    envelope: ActionEnvelope,
    location: CoordsXYZD,
}

/// Banner resolved by validation.
struct Target {
    tile: TileCoordsXY,
    element: usize,
    banner: BannerIndex,
}

impl BannerRemoveAction {
    pub fn new(location: CoordsXYZD) -> Self {
        Self {
            envelope: ActionEnvelope::default(),
            location,
        }
    }

    pub fn location(&self) -> CoordsXYZD {
        self.location
    }

    fn base_result(&self) -> ActionResult {
        ActionResult::ok()
            .with_expenditure(ExpenditureType::Landscaping)
            .with_position(CoordsXYZ::new(
                self.location.x.saturating_add(COORDS_XY_HALF_TILE),
                self.location.y.saturating_add(COORDS_XY_HALF_TILE),
                self.location.z,
            ))
    }

    fn invalid(&self, base: &ActionResult) -> ActionResult {
        base.clone().fail(
            Status::InvalidParameters,
            StringId::CantRemoveThis,
            StringId::None,
        )
    }

    /// First banner element on the tile at the exact height and facing.
    ///
    /// Ghost banners only match when the action itself is a ghost.
    fn find_banner_element(&self, state: &GameState) -> Option<(usize, BannerIndex)> {
        let allow_ghost = self.envelope.flags.contains(CommandFlags::GHOST);
        state
            .map
            .find_element(self.location.xy().to_tile(), |element| {
                element.base_z() == self.location.z
                    && (allow_ghost || !element.is_ghost)
                    && element
                        .as_banner()
                        .is_some_and(|banner| banner.position == self.location.direction)
            })
            .and_then(|(index, element)| Some((index, element.as_banner()?.index)))
    }

    /// Checks shared by query and execute. On success returns the priced
    /// result and the banner to remove.
    fn validate(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Result<(ActionResult, Target), ActionResult> {
        let base = self.base_result();
        let loc = self.location;

        // Wire coordinates are unchecked; nothing off the map reaches the lookup.
        if !state.location_valid(loc.xy()) {
            return Err(base.fail(
                Status::NotOwned,
                StringId::CantRemoveThis,
                StringId::LandNotOwnedByPark,
            ));
        }
        let below = CoordsXYZ::new(loc.x, loc.y, loc.z.saturating_sub(LAND_HEIGHT_STEP));
        if !state.can_build_at(below, env.config()) {
            return Err(base.fail(
                Status::NotOwned,
                StringId::CantRemoveThis,
                StringId::LandNotOwnedByPark,
            ));
        }

        let Some((element, index)) = self.find_banner_element(state) else {
            error!(
                x = loc.x,
                y = loc.y,
                z = loc.z,
                direction = loc.direction,
                "invalid banner location"
            );
            return Err(self.invalid(&base));
        };

        if !index.in_range() {
            error!(index = %index, "invalid banner index");
            return Err(self.invalid(&base));
        }

        let Some(banner) = state.banners.get(index) else {
            error!(index = %index, "banner index does not resolve");
            return Err(self.invalid(&base));
        };

        let cost = env
            .banner_entry(banner.kind)
            .map(|entry| -(entry.price * 3 / 4))
            .unwrap_or(Money::ZERO);

        Ok((
            base.with_cost(cost),
            Target {
                tile: loc.xy().to_tile(),
                element,
                banner: index,
            },
        ))
    }
}

impl GameAction for BannerRemoveAction {
    fn action_type(&self) -> GameCommand {
        GameCommand::RemoveBanner
    }

    fn envelope(&self) -> &ActionEnvelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut ActionEnvelope {
        &mut self.envelope
    }

    fn serialise_parameters(&mut self, stream: &mut DataSerialiser) -> Result<(), SerialiseError> {
        stream.serialise("location", &mut self.location)
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        visitor.visit_coords_xyzd("location", self.location);
    }

    fn query(&self, state: &GameState, env: &GameEnv<'_>) -> ActionResult {
        match self.validate(state, env) {
            Ok((result, _)) => result,
            Err(result) => result,
        }
    }

    fn execute(&self, state: &mut GameState, env: &GameEnv<'_>) -> ActionResult {
        let (result, target) = match self.validate(state, env) {
            Ok(validated) => validated,
            Err(result) => return result,
        };

        state.banners.remove(target.banner);
        state
            .invalidations
            .invalidate_tile(target.tile, self.location.z, self.location.z.saturating_add(32));
        let removed = state.map.remove(target.tile, target.element);
        debug_assert!(removed.is_some(), "validated banner element vanished");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::testing::{Park, set_ownership};
    use crate::state::{Ownership, TileCoordsXY};

    const BANNER_AT: CoordsXYZD = CoordsXYZD::new(160, 160, 48, 0);

    #[test]
    fn query_prices_refund_at_three_quarters() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);

        let result = BannerRemoveAction::new(BANNER_AT).query(&park.state, &park.env());
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.cost, Money(-75));
        assert_eq!(result.position, Some(CoordsXYZ::new(176, 176, 48)));
        assert_eq!(result.expenditure, Some(ExpenditureType::Landscaping));
    }

    #[test]
    fn wrong_facing_is_invalid_and_leaves_world_untouched() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);
        let before = park.state.checksum().unwrap();

        let action = BannerRemoveAction::new(CoordsXYZD::new(160, 160, 48, 2));
        assert_eq!(
            action.query(&park.state, &park.env()).status,
            Status::InvalidParameters
        );
        let env = GameEnv::with_scenery(&park.config, &park.scenery);
        assert_eq!(
            action.execute(&mut park.state, &env).status,
            Status::InvalidParameters
        );
        assert_eq!(park.state.checksum().unwrap(), before);
    }

    #[test]
    fn unowned_land_fails_before_lookup() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);
        set_ownership(&mut park.state, TileCoordsXY::new(5, 5), Ownership::empty());

        let result = BannerRemoveAction::new(BANNER_AT).query(&park.state, &park.env());
        assert_eq!(result.status, Status::NotOwned);
        assert_eq!(result.error_title, StringId::CantRemoveThis);
        assert_eq!(result.error_message, StringId::LandNotOwnedByPark);
    }

    #[test]
    fn unowned_land_without_a_banner_is_not_owned() {
        let mut park = Park::new();
        set_ownership(&mut park.state, TileCoordsXY::new(5, 5), Ownership::empty());
        assert_eq!(park.stack(TileCoordsXY::new(5, 5)).len(), 1);

        // A lookup would report InvalidParameters; ownership decides first.
        let result = BannerRemoveAction::new(BANNER_AT).query(&park.state, &park.env());
        assert_eq!(result.status, Status::NotOwned);
        assert_eq!(result.position, Some(CoordsXYZ::new(176, 176, 48)));
    }

    #[test]
    fn extreme_wire_coordinates_fail_without_panicking() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);

        for location in [
            CoordsXYZD::new(i32::MAX, 0, 48, 0),
            CoordsXYZD::new(0, i32::MAX, 48, 0),
            CoordsXYZD::new(i32::MIN, i32::MIN, i32::MIN, 0),
        ] {
            let action = Action::from(BannerRemoveAction::new(location));
            let decoded = Action::decode(&action.encode().unwrap()).unwrap();
            assert_eq!(decoded.query(&park.state, &park.env()).status, Status::NotOwned);
        }

        let before = park.state.checksum().unwrap();
        for z in [i32::MIN, i32::MAX] {
            let action = BannerRemoveAction::new(CoordsXYZD::new(160, 160, z, 0));
            assert_eq!(
                action.query(&park.state, &park.env()).status,
                Status::InvalidParameters
            );
            let env = GameEnv::with_scenery(&park.config, &park.scenery);
            assert!(!action.execute(&mut park.state, &env).is_ok());
        }
        assert_eq!(park.state.checksum().unwrap(), before);
    }

    #[test]
    fn decoded_action_queries_identically() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);

        for location in [
            BANNER_AT,
            CoordsXYZD::new(160, 160, 48, 2),
            CoordsXYZD::new(-32, 0, 48, 0),
        ] {
            let action = Action::from(BannerRemoveAction::new(location));
            let decoded = Action::decode(&action.encode().unwrap()).unwrap();
            assert_eq!(
                decoded.query(&park.state, &park.env()),
                action.query(&park.state, &park.env())
            );
        }
    }

    #[test]
    fn execute_matches_query_then_second_execute_fails() {
        let mut park = Park::new();
        let index = park.place_banner(BANNER_AT, false);
        let action = BannerRemoveAction::new(BANNER_AT);

        let queried = action.query(&park.state, &park.env());
        let env = GameEnv::with_scenery(&park.config, &park.scenery);
        let executed = action.execute(&mut park.state, &env);
        assert_eq!(executed, queried);

        assert!(park.state.banners.get(index).is_none());
        assert_eq!(park.stack(TileCoordsXY::new(5, 5)).len(), 1);
        assert_eq!(
            park.state.invalidations.regions()[0].z_high - park.state.invalidations.regions()[0].z_low,
            32
        );

        assert_eq!(
            action.execute(&mut park.state, &env).status,
            Status::InvalidParameters
        );
    }

    #[test]
    fn ghost_banner_requires_ghost_flag() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, true);

        let mut action = BannerRemoveAction::new(BANNER_AT);
        assert_eq!(
            action.query(&park.state, &park.env()).status,
            Status::InvalidParameters
        );

        action.envelope_mut().flags = CommandFlags::GHOST;
        assert!(action.query(&park.state, &park.env()).is_ok());
    }

    #[test]
    fn dangling_banner_index_is_invalid() {
        let mut park = Park::new();
        let index = park.place_banner(BANNER_AT, false);
        park.state.banners.remove(index);

        let result = BannerRemoveAction::new(BANNER_AT).query(&park.state, &park.env());
        assert_eq!(result.status, Status::InvalidParameters);
    }

    #[test]
    fn unknown_banner_type_costs_nothing() {
        let mut park = Park::new();
        park.place_banner(BANNER_AT, false);
        let env = GameEnv::bare(&park.config);

        let result = BannerRemoveAction::new(BANNER_AT).query(&park.state, &env);
        assert!(result.is_ok());
        assert_eq!(result.cost, Money::ZERO);
    }
}
