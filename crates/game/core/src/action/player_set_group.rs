//! Moves a network player into another permission group.

use tracing::info;

use super::{
    ActionEnvelope, ActionFlags, ActionResult, GameAction, GameCommand, ParameterVisitor, Status,
    StringId,
};
use crate::env::GameEnv;
use crate::serialise::{DataSerialiser, SerialiseError};
use crate::state::{GameState, GroupId, NetworkMode, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetGroupAction {
    envelope: ActionEnvelope,
    target: PlayerId,
    group: GroupId,
}

impl Default for PlayerSetGroupAction {
    fn default() -> Self {
        Self::new(PlayerId::NONE, GroupId::NONE)
    }
}

impl PlayerSetGroupAction {
    pub fn new(target: PlayerId, group: GroupId) -> Self {
        Self {
            envelope: ActionEnvelope::default(),
            target,
            group,
        }
    }

    pub fn target(&self) -> PlayerId {
        self.target
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    fn validate(&self, state: &GameState) -> ActionResult {
        let network = &state.network;
        let Some(target) = network.player(self.target) else {
            return ActionResult::error(Status::InvalidParameters, StringId::CantDoThis, StringId::None);
        };
        if network.group(self.group).is_none() {
            return ActionResult::error(Status::InvalidParameters, StringId::CantDoThis, StringId::None);
        }
        if target.is_server() {
            return ActionResult::error(
                Status::Disallowed,
                StringId::CantChangeGroupThatTheHostBelongsTo,
                StringId::None,
            );
        }
        if self.group == GroupId::ADMIN {
            let issuer_is_admin = network
                .player(self.envelope.player)
                .is_some_and(|issuer| issuer.group == GroupId::ADMIN);
            if !issuer_is_admin {
                return ActionResult::error(
                    Status::Disallowed,
                    StringId::CantSetToThisGroup,
                    StringId::None,
                );
            }
        }
        ActionResult::ok()
    }
}

impl GameAction for PlayerSetGroupAction {
    fn action_type(&self) -> GameCommand {
        GameCommand::SetPlayerGroup
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
        stream.serialise("player_id", &mut self.target)?;
        stream.serialise("group_id", &mut self.group)
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        visitor.visit_int("player_id", i64::from(self.target.0));
        visitor.visit_int("group_id", i64::from(self.group.0));
    }

    fn query(&self, state: &GameState, _env: &GameEnv<'_>) -> ActionResult {
        self.validate(state)
    }

    fn execute(&self, state: &mut GameState, _env: &GameEnv<'_>) -> ActionResult {
        let result = self.validate(state);
        if !result.is_ok() {
            return result;
        }

        let mode = state.network.mode;
        let group_name = state
            .network
            .group(self.group)
            .map(|group| group.name.clone())
            .unwrap_or_default();
        let Some(player) = state.network.player_mut(self.target) else {
            return ActionResult::error(Status::InvalidParameters, StringId::CantDoThis, StringId::None);
        };
        player.group = self.group;
        let (name, key_hash) = (player.name.clone(), player.key_hash.clone());

        if mode == NetworkMode::Server && !key_hash.is_empty() {
            state.network.known_users.insert(key_hash, self.group);
        }

        info!(
            issuer = %self.envelope.player,
            player = %name,
            group = %group_name,
            "player group changed"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::Park;
    use crate::state::{NetworkPlayer, NetworkState, PlayerFlags};

    fn session(park: &mut Park) {
        let mut network = NetworkState::new(NetworkMode::Server);
        network.add_player(
            NetworkPlayer::new(PlayerId::HOST, "host", GroupId::ADMIN)
                .with_flags(PlayerFlags::IS_SERVER),
        );
        network.add_player(NetworkPlayer::new(PlayerId(1), "mod", GroupId::ADMIN));
        network.add_player(
            NetworkPlayer::new(PlayerId(2), "visitor", GroupId::GUEST).with_key_hash("ab12"),
        );
        network.add_player(NetworkPlayer::new(PlayerId(3), "builder", GroupId::USER));
        park.state.network = network;
    }

    fn issued_by(action: PlayerSetGroupAction, issuer: PlayerId) -> PlayerSetGroupAction {
        let mut action = action;
        action.envelope_mut().player = issuer;
        action
    }

    #[test]
    fn execute_assigns_group_and_records_known_user() {
        let mut park = Park::new();
        session(&mut park);
        let action = issued_by(PlayerSetGroupAction::new(PlayerId(2), GroupId::USER), PlayerId(1));

        let env = GameEnv::bare(&park.config);
        assert!(action.execute(&mut park.state, &env).is_ok());
        assert_eq!(
            park.state.network.player(PlayerId(2)).unwrap().group,
            GroupId::USER
        );
        assert_eq!(
            park.state.network.known_users.get("ab12"),
            Some(&GroupId::USER)
        );
    }

    #[test]
    fn unknown_player_or_group_is_invalid() {
        let mut park = Park::new();
        session(&mut park);
        let env = GameEnv::bare(&park.config);

        let missing_player = PlayerSetGroupAction::new(PlayerId(40), GroupId::USER);
        let result = missing_player.query(&park.state, &env);
        assert_eq!(result.status, Status::InvalidParameters);
        assert_eq!(result.error_title, StringId::CantDoThis);

        let missing_group = PlayerSetGroupAction::new(PlayerId(2), GroupId(9));
        assert_eq!(
            missing_group.query(&park.state, &env).status,
            Status::InvalidParameters
        );
    }

    #[test]
    fn host_group_cannot_change() {
        let mut park = Park::new();
        session(&mut park);
        let env = GameEnv::bare(&park.config);

        let action = issued_by(PlayerSetGroupAction::new(PlayerId::HOST, GroupId::USER), PlayerId(1));
        let result = action.query(&park.state, &env);
        assert_eq!(result.status, Status::Disallowed);
        assert_eq!(result.error_title, StringId::CantChangeGroupThatTheHostBelongsTo);
    }

    #[test]
    fn only_admins_grant_admin() {
        let mut park = Park::new();
        session(&mut park);
        let env = GameEnv::bare(&park.config);

        let by_user = issued_by(PlayerSetGroupAction::new(PlayerId(2), GroupId::ADMIN), PlayerId(3));
        let result = by_user.query(&park.state, &env);
        assert_eq!(result.status, Status::Disallowed);
        assert_eq!(result.error_title, StringId::CantSetToThisGroup);

        let by_admin = issued_by(PlayerSetGroupAction::new(PlayerId(2), GroupId::ADMIN), PlayerId(1));
        assert!(by_admin.query(&park.state, &env).is_ok());
    }

    #[test]
    fn allowed_while_paused() {
        assert!(PlayerSetGroupAction::default()
            .action_flags()
            .contains(ActionFlags::ALLOW_WHILE_PAUSED));
    }
}
