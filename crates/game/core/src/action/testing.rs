//! Fixtures shared by the action unit tests.

use crate::config::GameConfig;
use crate::env::{BannerEntry, GameEnv, SceneryCatalog};
use crate::state::{
    Banner, BannerElement, BannerIndex, CoordsXYZD, ElementData, GameState, Money,
    ObjectEntryIndex, Ownership, TileCoordsXY, TileElement,
};

/// Banner object type priced at 100 in [`Park::new`].
pub const BANNER_KIND: ObjectEntryIndex = ObjectEntryIndex(4);

/// Surface height of the fixture map, in height units (z = 32).
pub const SURFACE_HEIGHT: u8 = 4;

pub struct Park {
    pub state: GameState,
    pub config: GameConfig,
    pub scenery: SceneryCatalog,
}

impl Park {
    /// 32×32 flat park where every tile is owned.
    pub fn new() -> Self {
        let config = GameConfig::default().with_map_size(32);
        let mut state = GameState::flat(&config, SURFACE_HEIGHT);
        for x in 0..32 {
            for y in 0..32 {
                set_ownership(&mut state, TileCoordsXY::new(x, y), Ownership::OWNED);
            }
        }
        let scenery = SceneryCatalog::new()
            .with_banner(BANNER_KIND, BannerEntry::new("flag", Money(100)));
        Self {
            state,
            config,
            scenery,
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::with_scenery(&self.config, &self.scenery)
    }

    /// Places a banner element and its record; returns the record's index.
    pub fn place_banner(&mut self, location: CoordsXYZD, ghost: bool) -> BannerIndex {
        let tile = location.xy().to_tile();
        let index = self
            .state
            .banners
            .create(Banner::new(BANNER_KIND, tile))
            .expect("banner table full");
        let height = (location.z / 8) as u8;
        let element = TileElement::new(
            ElementData::Banner(BannerElement {
                index,
                position: location.direction,
                allowed_edges: 0b1111,
            }),
            height,
            height + 2,
        )
        .with_ghost(ghost);
        self.state
            .map
            .insert(tile, element)
            .expect("element budget exhausted");
        index
    }

    pub fn insert(&mut self, tile: TileCoordsXY, element: TileElement) -> usize {
        self.state
            .map
            .insert(tile, element)
            .expect("element budget exhausted")
    }

    pub fn stack(&self, tile: TileCoordsXY) -> Vec<TileElement> {
        self.state.map.tile(tile).expect("tile on map").to_vec()
    }
}

pub fn set_ownership(state: &mut GameState, tile: TileCoordsXY, ownership: Ownership) {
    if let Some(TileElement {
        data: ElementData::Surface(surface),
        ..
    }) = state.map.element_at_mut(tile, 0)
    {
        surface.ownership = ownership;
    }
}
