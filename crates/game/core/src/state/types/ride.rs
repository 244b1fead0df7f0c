use std::collections::BTreeMap;
use std::fmt;

use super::common::TileCoordsXYZD;

/// Maximum number of stations a ride may have.
pub const MAX_STATIONS: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideId(pub u16);

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ride {}", self.0)
    }
}

/// Known entrance and exit of one station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideStation {
    pub entrance: Option<TileCoordsXYZD>,
    pub exit: Option<TileCoordsXYZD>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ride {
    pub name: String,
    pub stations: Vec<RideStation>,
}

impl Ride {
    pub fn new(name: impl Into<String>, station_count: usize) -> Self {
        Self {
            name: name.into(),
            stations: vec![RideStation::default(); station_count.min(MAX_STATIONS)],
        }
    }

    pub fn station(&self, index: u8) -> Option<&RideStation> {
        self.stations.get(index as usize)
    }

    pub fn station_mut(&mut self, index: u8) -> Option<&mut RideStation> {
        self.stations.get_mut(index as usize)
    }
}

/// Rides keyed by id. Only station entrance/exit bookkeeping is modelled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideTable {
    rides: BTreeMap<RideId, Ride>,
}

impl RideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RideId, ride: Ride) -> Option<Ride> {
        self.rides.insert(id, ride)
    }

    pub fn get(&self, id: RideId) -> Option<&Ride> {
        self.rides.get(&id)
    }

    pub fn get_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.rides.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }
}
