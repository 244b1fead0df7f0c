use std::collections::BTreeMap;

use crate::state::{Money, ObjectEntryIndex};

/// Resolves scenery object definitions loaded for the park.
pub trait SceneryOracle: Send + Sync {
    /// Banner definition for an object entry, if one is loaded.
    fn banner_entry(&self, entry: ObjectEntryIndex) -> Option<BannerEntry>;
}

/// Banner object definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerEntry {
    pub name: String,
    /// Placement price.
    pub price: Money,
}

impl BannerEntry {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// In-memory [`SceneryOracle`] keyed by object entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneryCatalog {
    banners: BTreeMap<ObjectEntryIndex, BannerEntry>,
}

impl SceneryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_banner(mut self, entry: ObjectEntryIndex, banner: BannerEntry) -> Self {
        self.insert_banner(entry, banner);
        self
    }

    pub fn insert_banner(&mut self, entry: ObjectEntryIndex, banner: BannerEntry) {
        self.banners.insert(entry, banner);
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

impl SceneryOracle for SceneryCatalog {
    fn banner_entry(&self, entry: ObjectEntryIndex) -> Option<BannerEntry> {
        self.banners.get(&entry).cloned()
    }
}
