/// Session settings that influence action validation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Land ownership is ignored; the park may build anywhere.
    pub sandbox_mode: bool,
    /// Scenario editor session. Also lifts ownership checks and enables
    /// editor-only actions.
    pub editor_mode: bool,
    /// Map edge length in tiles for freshly created parks.
    pub map_size: u32,
    /// Global tile element budget.
    pub max_tile_elements: usize,
}

impl GameConfig {
    pub const DEFAULT_MAP_SIZE: u32 = 64;
    pub const DEFAULT_MAX_TILE_ELEMENTS: usize = 0x30000;

    pub fn new() -> Self {
        Self {
            sandbox_mode: false,
            editor_mode: false,
            map_size: Self::DEFAULT_MAP_SIZE,
            max_tile_elements: Self::DEFAULT_MAX_TILE_ELEMENTS,
        }
    }

    #[must_use]
    pub fn with_sandbox_mode(mut self, sandbox_mode: bool) -> Self {
        self.sandbox_mode = sandbox_mode;
        self
    }

    #[must_use]
    pub fn with_editor_mode(mut self, editor_mode: bool) -> Self {
        self.editor_mode = editor_mode;
        self
    }

    #[must_use]
    pub fn with_map_size(mut self, map_size: u32) -> Self {
        self.map_size = map_size;
        self
    }

    #[must_use]
    pub fn with_max_tile_elements(mut self, max_tile_elements: usize) -> Self {
        self.max_tile_elements = max_tile_elements;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
