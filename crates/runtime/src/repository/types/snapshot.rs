//! World snapshot file contents.

use serde::{Deserialize, Serialize};

use park_core::{GameState, SceneryCatalog};

/// A park together with the object definitions its actions consult.
///
/// Replaying an action log against the snapshot a session started from must
/// reproduce the session's final checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub state: GameState,
    #[serde(default)]
    pub scenery: SceneryCatalog,
}

impl WorldSnapshot {
    pub fn new(state: GameState, scenery: SceneryCatalog) -> Self {
        Self { state, scenery }
    }
}
