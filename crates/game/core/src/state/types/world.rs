//! Tile map: per-tile element stacks and lookups over them.

use super::common::{CoordsXY, TileCoordsXY};
use super::tile_element::{ElementData, SurfaceElement, TileElement};
use crate::state::StateError;

/// Square grid of tile element stacks.
///
/// Each stack is an ordered sequence, bottom-most first. The surface element
/// is normally the first entry. Lookups scan a stack in order and return the
/// first match. The map holds at most `max_elements` elements in total.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    size: u32,
    max_elements: usize,
    element_count: usize,
    tiles: Vec<Vec<TileElement>>,
}

impl TileMap {
    /// Creates a `size`×`size` map where every tile holds one flat surface at
    /// `surface_height` (height units).
    pub fn flat(size: u32, surface_height: u8, max_elements: usize) -> Self {
        let tile_count = (size as usize) * (size as usize);
        let surface = TileElement::new(
            ElementData::Surface(SurfaceElement::default()),
            surface_height,
            surface_height,
        );
        Self {
            size,
            max_elements: max_elements.max(tile_count),
            element_count: tile_count,
            tiles: vec![vec![surface]; tile_count],
        }
    }

    /// Map size in tiles along one edge.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    /// True when `count` more elements fit in the element budget.
    pub fn has_free_elements(&self, count: usize) -> bool {
        self.element_count + count <= self.max_elements
    }

    pub fn contains(&self, tile: TileCoordsXY) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.size && (tile.y as u32) < self.size
    }

    /// Checks the invariants a deserialized map cannot promise: one stack per
    /// tile and an element count that matches the stacks.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MalformedMap`] describing the first violation.
    pub fn validate(&self) -> Result<(), StateError> {
        let expected = (self.size as usize).saturating_mul(self.size as usize);
        if self.tiles.len() != expected {
            return Err(StateError::MalformedMap(format!(
                "{} tile stacks for a {}x{} map",
                self.tiles.len(),
                self.size,
                self.size
            )));
        }
        let counted: usize = self.tiles.iter().map(Vec::len).sum();
        if counted != self.element_count {
            return Err(StateError::MalformedMap(format!(
                "element count {} but stacks hold {counted}",
                self.element_count
            )));
        }
        if counted > self.max_elements {
            return Err(StateError::MalformedMap(format!(
                "{counted} elements exceed the budget of {}",
                self.max_elements
            )));
        }
        Ok(())
    }

    /// True when a world location lies on the map.
    pub fn contains_coords(&self, coords: CoordsXY) -> bool {
        coords.x >= 0 && coords.y >= 0 && self.contains(coords.to_tile())
    }

    fn slot(&self, tile: TileCoordsXY) -> Option<usize> {
        self.contains(tile)
            .then(|| tile.y as usize * self.size as usize + tile.x as usize)
    }

    /// Element stack of a tile, bottom-most first.
    pub fn tile(&self, tile: TileCoordsXY) -> Option<&[TileElement]> {
        let slot = self.slot(tile)?;
        self.tiles.get(slot).map(Vec::as_slice)
    }

    pub(crate) fn tile_mut(&mut self, tile: TileCoordsXY) -> Option<&mut Vec<TileElement>> {
        let slot = self.slot(tile)?;
        self.tiles.get_mut(slot)
    }

    /// The `index`-th element of a tile's stack.
    pub fn element_at(&self, tile: TileCoordsXY, index: usize) -> Option<&TileElement> {
        self.tile(tile)?.get(index)
    }

    pub fn element_at_mut(&mut self, tile: TileCoordsXY, index: usize) -> Option<&mut TileElement> {
        self.tile_mut(tile)?.get_mut(index)
    }

    /// First element of a tile's stack matching `predicate`, with its index.
    pub fn find_element<P>(&self, tile: TileCoordsXY, mut predicate: P) -> Option<(usize, &TileElement)>
    where
        P: FnMut(&TileElement) -> bool,
    {
        self.tile(tile)?
            .iter()
            .enumerate()
            .find(|(_, element)| predicate(element))
    }

    /// The tile's surface element.
    pub fn surface(&self, tile: TileCoordsXY) -> Option<(usize, &SurfaceElement, &TileElement)> {
        self.find_element(tile, |element| element.as_surface().is_some())
            .and_then(|(index, element)| Some((index, element.as_surface()?, element)))
    }

    /// Base height of the surface in world units, or 0 for tiles without one.
    pub fn surface_z(&self, tile: TileCoordsXY) -> i32 {
        self.surface(tile)
            .map(|(_, _, element)| element.base_z())
            .unwrap_or(0)
    }

    /// Inserts an element above every element whose base height is not
    /// higher than its own. Returns the stack index it landed on.
    ///
    /// # Errors
    ///
    /// Fails when the tile is off the map or the element budget is spent.
    pub fn insert(&mut self, tile: TileCoordsXY, element: TileElement) -> Result<usize, StateError> {
        let index = self
            .tile(tile)
            .ok_or(StateError::TileOutOfBounds {
                tile,
                size: self.size,
            })?
            .iter()
            .take_while(|existing| existing.base_height <= element.base_height)
            .count();
        self.insert_at(tile, index, element)?;
        Ok(index)
    }

    /// Inserts an element at an exact stack index (clamped to the stack length).
    ///
    /// # Errors
    ///
    /// Fails when the tile is off the map or the element budget is spent.
    pub fn insert_at(
        &mut self,
        tile: TileCoordsXY,
        index: usize,
        element: TileElement,
    ) -> Result<(), StateError> {
        if !self.has_free_elements(1) {
            return Err(StateError::NoFreeElements {
                max: self.max_elements,
            });
        }
        let size = self.size;
        let stack = self
            .tile_mut(tile)
            .ok_or(StateError::TileOutOfBounds { tile, size })?;
        let index = index.min(stack.len());
        stack.insert(index, element);
        self.element_count += 1;
        Ok(())
    }

    /// Removes and returns the `index`-th element of a tile.
    pub fn remove(&mut self, tile: TileCoordsXY, index: usize) -> Option<TileElement> {
        let stack = self.tile_mut(tile)?;
        if index >= stack.len() {
            return None;
        }
        let removed = stack.remove(index);
        self.element_count -= 1;
        Some(removed)
    }

    /// Swaps two elements of a tile. Returns false if either index is missing.
    pub fn swap(&mut self, tile: TileCoordsXY, first: usize, second: usize) -> bool {
        let Some(stack) = self.tile_mut(tile) else {
            return false;
        };
        if first >= stack.len() || second >= stack.len() {
            return false;
        }
        stack.swap(first, second);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BannerElement, BannerIndex};

    fn banner(height: u8, position: u8) -> TileElement {
        TileElement::new(
            ElementData::Banner(BannerElement {
                index: BannerIndex(0),
                position,
                allowed_edges: 0b1111,
            }),
            height,
            height + 2,
        )
    }

    #[test]
    fn insert_keeps_stack_ordered_by_base_height() {
        let mut map = TileMap::flat(4, 2, 64);
        let tile = TileCoordsXY::new(1, 1);

        assert_eq!(map.insert(tile, banner(10, 0)).unwrap(), 1);
        assert_eq!(map.insert(tile, banner(6, 1)).unwrap(), 1);
        assert_eq!(map.insert(tile, banner(10, 2)).unwrap(), 3);

        let heights: Vec<u8> = map.tile(tile).unwrap().iter().map(|e| e.base_height).collect();
        assert_eq!(heights, vec![2, 6, 10, 10]);
        assert_eq!(map.element_count(), 16 + 3);
    }

    #[test]
    fn find_element_returns_first_match() {
        let mut map = TileMap::flat(4, 2, 64);
        let tile = TileCoordsXY::new(0, 3);
        map.insert(tile, banner(6, 0)).unwrap();
        map.insert(tile, banner(6, 1)).unwrap();

        let (index, element) = map
            .find_element(tile, |element| element.as_banner().is_some())
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(element.as_banner().unwrap().position, 0);
    }

    #[test]
    fn element_budget_is_enforced() {
        let mut map = TileMap::flat(2, 2, 5);
        let tile = TileCoordsXY::new(0, 0);
        map.insert(tile, banner(4, 0)).unwrap();
        assert_eq!(
            map.insert(tile, banner(4, 1)),
            Err(StateError::NoFreeElements { max: 5 })
        );
    }

    #[test]
    fn off_map_tiles_are_rejected() {
        let map = TileMap::flat(4, 2, 64);
        assert!(map.tile(TileCoordsXY::new(4, 0)).is_none());
        assert!(!map.contains_coords(CoordsXY::new(-1, 0)));
        assert!(map.contains_coords(CoordsXY::new(127, 127)));
        assert!(!map.contains_coords(CoordsXY::new(128, 0)));
    }

    #[test]
    fn truncated_map_fails_validation_without_panicking() {
        let mut map = TileMap::flat(4, 2, 64);
        assert!(map.validate().is_ok());

        map.tiles.truncate(3);
        assert!(matches!(map.validate(), Err(StateError::MalformedMap(_))));
        assert!(map.tile(TileCoordsXY::new(3, 3)).is_none());
        assert!(map.element_at_mut(TileCoordsXY::new(3, 3), 0).is_none());

        let mut miscounted = TileMap::flat(4, 2, 64);
        miscounted.element_count = 1;
        assert!(matches!(miscounted.validate(), Err(StateError::MalformedMap(_))));
    }
}
