use std::fmt;

use bitflags::bitflags;

use super::common::{ObjectEntryIndex, TileCoordsXY};
use super::ride::RideId;
use crate::state::StateError;

/// Capacity of the banner table.
pub const MAX_BANNERS: usize = 250;

/// Slot of a banner record in the banner table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerIndex(pub u16);

impl BannerIndex {
    /// Sentinel meaning "no banner".
    pub const NULL: Self = Self(u16::MAX);

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }

    /// True when the index is not the sentinel and fits in the table.
    #[inline]
    pub const fn in_range(self) -> bool {
        !self.is_null() && (self.0 as usize) < MAX_BANNERS
    }
}

impl Default for BannerIndex {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for BannerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BannerFlags: u8 {
        const NO_ENTRY         = 1 << 0;
        const IS_LARGE_SCENERY = 1 << 1;
        const LINKED_TO_RIDE   = 1 << 2;
        const IS_WALL          = 1 << 3;
    }
}

/// Banner record referenced from the map by [`BannerIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Banner {
    /// Banner object type; resolves to a price through the scenery oracle.
    pub kind: ObjectEntryIndex,
    pub flags: BannerFlags,
    pub text: String,
    pub colour: u8,
    pub text_colour: u8,
    pub position: TileCoordsXY,
    pub ride: Option<RideId>,
}

impl Banner {
    pub fn new(kind: ObjectEntryIndex, position: TileCoordsXY) -> Self {
        Self {
            kind,
            position,
            ..Self::default()
        }
    }
}

/// Fixed-capacity table of banner records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerTable {
    slots: Vec<Option<Banner>>,
}

impl Default for BannerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BannerTable {
    pub fn new() -> Self {
        Self {
            slots: vec![None; MAX_BANNERS],
        }
    }

    /// Resolves an index; `None` for null, out-of-range, or free slots.
    pub fn get(&self, index: BannerIndex) -> Option<&Banner> {
        if !index.in_range() {
            return None;
        }
        self.slots.get(index.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, index: BannerIndex) -> Option<&mut Banner> {
        if !index.in_range() {
            return None;
        }
        self.slots.get_mut(index.0 as usize)?.as_mut()
    }

    /// Index of the first free slot, if any.
    pub fn next_free(&self) -> Option<BannerIndex> {
        self.slots
            .iter()
            .position(Option::is_none)
            .map(|slot| BannerIndex(slot as u16))
    }

    /// Stores a banner in the first free slot.
    pub fn create(&mut self, banner: Banner) -> Option<BannerIndex> {
        let index = self.next_free()?;
        self.slots[index.0 as usize] = Some(banner);
        Some(index)
    }

    /// Stores a banner at a specific slot.
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the slot is occupied.
    pub fn place(&mut self, index: BannerIndex, banner: Banner) -> Result<(), StateError> {
        if !index.in_range() {
            return Err(StateError::BannerIndexOutOfRange { index });
        }
        let slot = &mut self.slots[index.0 as usize];
        if slot.is_some() {
            return Err(StateError::BannerSlotInUse { index });
        }
        *slot = Some(banner);
        Ok(())
    }

    /// Frees a slot, returning the record that occupied it.
    pub fn remove(&mut self, index: BannerIndex) -> Option<Banner> {
        if !index.in_range() {
            return None;
        }
        self.slots.get_mut(index.0 as usize)?.take()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (BannerIndex, &Banner)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, banner)| Some((BannerIndex(slot as u16), banner.as_ref()?)))
    }
}
