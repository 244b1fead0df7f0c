//! Network participants, permission groups, and the server's known-user store.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;

/// Identifier of a network participant. `-1` means "nobody".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub i32);

impl PlayerId {
    pub const NONE: Self = Self(-1);

    /// The host when running as a server, or the local player otherwise.
    pub const HOST: Self = Self(0);
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player #{}", self.0)
    }
}

/// Identifier of a permission group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupId(pub u8);

impl GroupId {
    /// Administrators. Only members may hand out this group.
    pub const ADMIN: Self = Self(0);
    pub const GUEST: Self = Self(1);
    pub const USER: Self = Self(2);
    /// Sentinel meaning "no group".
    pub const NONE: Self = Self(u8::MAX);
}

impl Default for GroupId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group #{}", self.0)
    }
}

bitflags! {
    /// Actions a group's members may issue.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Permissions: u32 {
        const CHAT                  = 1 << 0;
        const TERRAFORM             = 1 << 1;
        const SET_WATER_LEVEL       = 1 << 2;
        const TOGGLE_PAUSE          = 1 << 3;
        const CREATE_RIDE           = 1 << 4;
        const REMOVE_RIDE           = 1 << 5;
        const BUILD_RIDE            = 1 << 6;
        const RIDE_PROPERTIES       = 1 << 7;
        const SCENERY               = 1 << 8;
        const PATH                  = 1 << 9;
        const CLEAR_LANDSCAPE       = 1 << 10;
        const GUEST                 = 1 << 11;
        const STAFF                 = 1 << 12;
        const PARK_PROPERTIES       = 1 << 13;
        const PARK_FUNDING          = 1 << 14;
        const KICK_PLAYER           = 1 << 15;
        const MODIFY_GROUPS         = 1 << 16;
        const SET_PLAYER_GROUP      = 1 << 17;
        const CHEAT                 = 1 << 18;
        const MODIFY_TILE           = 1 << 19;
        const EDIT_SCENARIO_OPTIONS = 1 << 20;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFlags: u8 {
        /// Participant is hosting the session.
        const IS_SERVER = 1 << 0;
    }
}

/// Role of this peer in the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkMode {
    /// Single player; every permission is granted.
    #[default]
    None,
    Client,
    Server,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkPlayer {
    pub id: PlayerId,
    pub name: String,
    pub group: GroupId,
    pub flags: PlayerFlags,
    /// Hash of the player's public key; empty for unauthenticated players.
    pub key_hash: String,
}

impl NetworkPlayer {
    pub fn new(id: PlayerId, name: impl Into<String>, group: GroupId) -> Self {
        Self {
            id,
            name: name.into(),
            group,
            flags: PlayerFlags::empty(),
            key_hash: String::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PlayerFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_key_hash(mut self, key_hash: impl Into<String>) -> Self {
        self.key_hash = key_hash.into();
        self
    }

    pub fn is_server(&self) -> bool {
        self.flags.contains(PlayerFlags::IS_SERVER)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkGroup {
    pub id: GroupId,
    pub name: String,
    pub permissions: Permissions,
}

impl NetworkGroup {
    pub fn new(id: GroupId, name: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            id,
            name: name.into(),
            permissions,
        }
    }
}

/// Session membership as seen by this peer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkState {
    pub mode: NetworkMode,
    pub players: Vec<NetworkPlayer>,
    pub groups: Vec<NetworkGroup>,
    /// Group assigned to newly joining players.
    pub default_group: GroupId,
    /// Server-side record of key hash → group for returning players.
    pub known_users: BTreeMap<String, GroupId>,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new(NetworkMode::None)
    }
}

impl NetworkState {
    /// Creates a session with the stock admin, guest and user groups.
    pub fn new(mode: NetworkMode) -> Self {
        let user = Permissions::all()
            - Permissions::KICK_PLAYER
            - Permissions::MODIFY_GROUPS
            - Permissions::SET_PLAYER_GROUP
            - Permissions::CHEAT
            - Permissions::MODIFY_TILE
            - Permissions::EDIT_SCENARIO_OPTIONS;
        Self {
            mode,
            players: Vec::new(),
            groups: vec![
                NetworkGroup::new(GroupId::ADMIN, "Admin", Permissions::all()),
                NetworkGroup::new(GroupId::GUEST, "Guest", Permissions::CHAT),
                NetworkGroup::new(GroupId::USER, "User", user),
            ],
            default_group: GroupId::GUEST,
            known_users: BTreeMap::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&NetworkPlayer> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut NetworkPlayer> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&NetworkGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Adds a player, replacing any existing player with the same id.
    pub fn add_player(&mut self, player: NetworkPlayer) {
        self.players.retain(|existing| existing.id != player.id);
        self.players.push(player);
    }

    /// Whether `player` may issue actions requiring `permission`.
    ///
    /// Single player sessions allow everything; unknown players are denied.
    pub fn can_perform(&self, player: PlayerId, permission: Permissions) -> bool {
        if self.mode == NetworkMode::None {
            return true;
        }
        self.player(player)
            .and_then(|player| self.group(player.group))
            .is_some_and(|group| group.permissions.contains(permission))
    }
}
