//! Action log entry type.
//!
//! Every action the dispatcher executes is appended to `actions.log` so a
//! session can be inspected or replayed against its starting world.

use serde::{Deserialize, Serialize};

use park_core::{Action, GameCommand, SerialiseError};

/// One executed action.
///
/// # Layout
///
/// Each entry is serialized using bincode and stored with a length prefix:
/// ```text
/// [u32 length][bincode serialized ActionLogEntry]
/// ```
///
/// The action itself is kept in its network wire form so the log replays
/// through exactly the same decoder peers use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Position in the log, starting at zero.
    pub sequence: u64,

    /// Simulation tick the action executed on.
    pub tick: u32,

    /// Raw command tag, kept for summaries that skip decoding.
    pub command: u32,

    /// Envelope and parameters as produced by [`Action::encode`].
    pub payload: Vec<u8>,
}

impl ActionLogEntry {
    /// Encodes `action` into a new entry.
    ///
    /// # Errors
    ///
    /// Propagates the stream error if the action cannot be encoded.
    pub fn new(sequence: u64, tick: u32, action: &Action) -> Result<Self, SerialiseError> {
        use park_core::GameAction;

        Ok(Self {
            sequence,
            tick,
            command: action.action_type() as u32,
            payload: action.encode()?,
        })
    }

    /// Command named by the entry's tag, if it is one this build knows.
    pub fn command(&self) -> Option<GameCommand> {
        GameCommand::from_repr(self.command)
    }

    /// Rebuilds the logged action.
    ///
    /// # Errors
    ///
    /// Fails if the payload no longer decodes.
    pub fn decode(&self) -> Result<Action, SerialiseError> {
        Action::decode(&self.payload)
    }
}
