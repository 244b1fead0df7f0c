//! Game action protocol.
//!
//! Every player-initiated world mutation is a [`GameAction`]: a single-use
//! command with a pure [`query`](GameAction::query) phase that validates and
//! prices the change, and an [`execute`](GameAction::execute) phase that
//! re-validates against the current world and applies it. Actions stream
//! themselves through a [`DataSerialiser`] so a remote peer can rebuild and
//! replay them exactly.
//!
//! # Module Structure
//!
//! - `result`: [`ActionResult`] and [`Status`]
//! - `flags`: static [`ActionFlags`] and per-instance [`CommandFlags`]
//! - `envelope`: fields shared by every action on the wire
//! - `visitor`: parameter introspection
//! - `banner_remove`, `player_set_group`, `tile_modify`: concrete actions
mod banner_remove;
mod envelope;
mod flags;
mod player_set_group;
mod result;
mod string_id;
mod tile_modify;
mod visitor;

#[cfg(test)]
pub(crate) mod testing;

pub use banner_remove::BannerRemoveAction;
pub use envelope::ActionEnvelope;
pub use flags::{ActionFlags, CommandFlags};
pub use player_set_group::PlayerSetGroupAction;
pub use result::{ActionResult, Status};
pub use string_id::StringId;
pub use tile_modify::{TileModifyAction, TileModifyType};
pub use visitor::{ParameterList, ParameterVisitor};

use std::fmt;

use crate::env::GameEnv;
use crate::serialise::{DataSerialiser, SerialiseError};
use crate::state::{GameState, Permissions, PlayerId};

/// Stable wire tag naming an action type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::FromRepr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum GameCommand {
    RemoveBanner = 51,
    SetPlayerGroup = 63,
    ModifyTile = 75,
}

impl GameCommand {
    /// Permission a networked player's group must grant to issue the command.
    pub fn required_permission(self) -> Permissions {
        match self {
            GameCommand::RemoveBanner => Permissions::SCENERY,
            GameCommand::SetPlayerGroup => Permissions::SET_PLAYER_GROUP,
            GameCommand::ModifyTile => Permissions::MODIFY_TILE,
        }
    }

    pub fn as_snake_case(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_snake_case())
    }
}

/// Validate-then-execute command contract.
///
/// `query` must leave the world untouched; `execute` must re-run every check
/// `query` performs before mutating, since the world may have changed between
/// the two calls. Both report failures through [`ActionResult`].
pub trait GameAction: fmt::Debug {
    fn action_type(&self) -> GameCommand;

    fn envelope(&self) -> &ActionEnvelope;

    fn envelope_mut(&mut self) -> &mut ActionEnvelope;

    /// Static execution properties. Actions OR their own bits onto the base.
    fn action_flags(&self) -> ActionFlags {
        ActionFlags::empty()
    }

    /// Streams the action-specific parameters.
    fn serialise_parameters(&mut self, stream: &mut DataSerialiser) -> Result<(), SerialiseError>;

    /// Streams the envelope followed by the parameters.
    ///
    /// # Errors
    ///
    /// In read mode, fails on a truncated payload, a mismatching type tag, or
    /// a parameter outside its domain.
    fn serialise(&mut self, stream: &mut DataSerialiser) -> Result<(), SerialiseError> {
        let command = self.action_type();
        self.envelope_mut().serialise(command, stream)?;
        self.serialise_parameters(stream)
    }

    /// Exposes every streamed parameter to `visitor`, in stream order.
    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor);

    fn query(&self, state: &GameState, env: &GameEnv<'_>) -> ActionResult;

    fn execute(&self, state: &mut GameState, env: &GameEnv<'_>) -> ActionResult;

    fn flags(&self) -> CommandFlags {
        self.envelope().flags
    }

    fn player(&self) -> PlayerId {
        self.envelope().player
    }
}

/// Closed set of concrete actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    BannerRemove(BannerRemoveAction),
    PlayerSetGroup(PlayerSetGroupAction),
    TileModify(TileModifyAction),
}

macro_rules! delegate {
    ($self:expr, $action:ident => $body:expr) => {
        match $self {
            Action::BannerRemove($action) => $body,
            Action::PlayerSetGroup($action) => $body,
            Action::TileModify($action) => $body,
        }
    };
}

impl Action {
    /// Default-constructed action of the given type, ready to be read into.
    pub fn create(command: GameCommand) -> Self {
        match command {
            GameCommand::RemoveBanner => Self::BannerRemove(BannerRemoveAction::default()),
            GameCommand::SetPlayerGroup => Self::PlayerSetGroup(PlayerSetGroupAction::default()),
            GameCommand::ModifyTile => Self::TileModify(TileModifyAction::default()),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: CommandFlags) -> Self {
        self.envelope_mut().flags = flags;
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.envelope_mut().player = player;
        self
    }

    /// Wire form: envelope then parameters.
    ///
    /// # Errors
    ///
    /// Writing does not fail in practice; the error is the stream's.
    pub fn encode(&self) -> Result<Vec<u8>, SerialiseError> {
        let mut stream = DataSerialiser::writer();
        self.clone().serialise(&mut stream)?;
        Ok(stream.into_bytes())
    }

    /// Rebuilds an action from its wire form.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type tag, a truncated or malformed payload, or
    /// trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, SerialiseError> {
        let mut stream = DataSerialiser::reader(bytes);
        let tag = u32::from_be_bytes(stream.peek_array()?);
        let command = GameCommand::from_repr(tag).ok_or(SerialiseError::UnknownCommand(tag))?;
        let mut action = Self::create(command);
        action.serialise(&mut stream)?;
        stream.finish()?;
        Ok(action)
    }

    /// Envelope and parameters rendered as `name = value` pairs.
    pub fn describe(&self) -> String {
        let mut stream = DataSerialiser::logger();
        match self.clone().serialise(&mut stream) {
            Ok(()) => stream.log_line(),
            Err(err) => format!("<{err}>"),
        }
    }
}

impl GameAction for Action {
    fn action_type(&self) -> GameCommand {
        delegate!(self, action => action.action_type())
    }

    fn envelope(&self) -> &ActionEnvelope {
        delegate!(self, action => action.envelope())
    }

    fn envelope_mut(&mut self) -> &mut ActionEnvelope {
        delegate!(self, action => action.envelope_mut())
    }

    fn action_flags(&self) -> ActionFlags {
        delegate!(self, action => action.action_flags())
    }

    fn serialise_parameters(&mut self, stream: &mut DataSerialiser) -> Result<(), SerialiseError> {
        delegate!(self, action => action.serialise_parameters(stream))
    }

    fn accept_parameters(&self, visitor: &mut dyn ParameterVisitor) {
        delegate!(self, action => action.accept_parameters(visitor))
    }

    fn query(&self, state: &GameState, env: &GameEnv<'_>) -> ActionResult {
        delegate!(self, action => action.query(state, env))
    }

    fn execute(&self, state: &mut GameState, env: &GameEnv<'_>) -> ActionResult {
        delegate!(self, action => action.execute(state, env))
    }
}

impl From<BannerRemoveAction> for Action {
    fn from(action: BannerRemoveAction) -> Self {
        Self::BannerRemove(action)
    }
}

impl From<PlayerSetGroupAction> for Action {
    fn from(action: PlayerSetGroupAction) -> Self {
        Self::PlayerSetGroup(action)
    }
}

impl From<TileModifyAction> for Action {
    fn from(action: TileModifyAction) -> Self {
        Self::TileModify(action)
    }
}
