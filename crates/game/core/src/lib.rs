//! Deterministic park actions and the world state they operate on.
//!
//! `park-core` defines the game-action protocol shared by every peer: the
//! [`GameAction`] contract, the concrete actions, their wire serialisation and
//! the [`GameState`] they query and mutate. Queries never mutate; executing
//! the same action on identical states yields identical states, which peers
//! confirm by comparing [`StateChecksum`]s.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod serialise;
pub mod state;

pub use action::{
    Action, ActionEnvelope, ActionFlags, ActionResult, BannerRemoveAction, CommandFlags,
    GameAction, GameCommand, ParameterList, ParameterVisitor, PlayerSetGroupAction, Status,
    StringId, TileModifyAction, TileModifyType,
};
pub use config::GameConfig;
pub use env::{BannerEntry, GameEnv, OracleError, SceneryCatalog, SceneryOracle};
pub use error::{ErrorSeverity, GameError};
pub use serialise::{DataSerialiser, Serialisable, SerialiseError, StreamMode};
#[cfg(feature = "serde")]
pub use state::StateChecksum;
pub use state::{
    Banner, BannerIndex, BannerTable, CoordsXY, CoordsXYZ, CoordsXYZD, ExpenditureType, Finance,
    GameState, GroupId, Money, NetworkMode, NetworkPlayer, NetworkState, ObjectEntryIndex,
    PlayerId, Ride, RideId, StateError, TileCoordsXY, TileElement, TileMap,
};
