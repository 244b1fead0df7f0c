#![allow(dead_code)]

use park_core::state::{BannerElement, ElementData, Ownership, PlayerFlags};
use park_core::{
    Banner, BannerEntry, CoordsXYZD, GameConfig, GameState, GroupId, Money, NetworkMode,
    NetworkPlayer, ObjectEntryIndex, PlayerId, SceneryCatalog, TileCoordsXY, TileElement,
};

pub const BANNER_KIND: ObjectEntryIndex = ObjectEntryIndex(4);
pub const BANNER_AT: CoordsXYZD = CoordsXYZD::new(160, 160, 48, 0);
pub const GUEST: PlayerId = PlayerId(1);
pub const ADMIN: PlayerId = PlayerId(2);

pub fn config() -> GameConfig {
    GameConfig::default().with_map_size(16)
}

pub fn scenery() -> SceneryCatalog {
    SceneryCatalog::new().with_banner(BANNER_KIND, BannerEntry::new("flag", Money(100)))
}

/// 16×16 owned park with one banner at [`BANNER_AT`] and three players.
pub fn park(mode: NetworkMode) -> GameState {
    let mut state = GameState::flat(&config(), 4);
    state.finance.cash = Money(5_000);
    state.network.mode = mode;

    for x in 0..16 {
        for y in 0..16 {
            if let Some(TileElement {
                data: ElementData::Surface(surface),
                ..
            }) = state.map.element_at_mut(TileCoordsXY::new(x, y), 0)
            {
                surface.ownership = Ownership::OWNED;
            }
        }
    }

    let tile = BANNER_AT.xy().to_tile();
    let index = state
        .banners
        .create(Banner::new(BANNER_KIND, tile))
        .expect("banner slot");
    let banner = TileElement::new(
        ElementData::Banner(BannerElement {
            index,
            position: BANNER_AT.direction,
            allowed_edges: 0b1111,
        }),
        6,
        8,
    );
    state.map.insert(tile, banner).expect("element budget");

    state.network.add_player(
        NetworkPlayer::new(PlayerId::HOST, "host", GroupId::ADMIN)
            .with_flags(PlayerFlags::IS_SERVER),
    );
    state
        .network
        .add_player(NetworkPlayer::new(GUEST, "guest", GroupId::GUEST).with_key_hash("c0ffee"));
    state
        .network
        .add_player(NetworkPlayer::new(ADMIN, "admin", GroupId::ADMIN));
    state
}
