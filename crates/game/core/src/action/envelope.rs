use super::{CommandFlags, GameCommand};
use crate::serialise::{DataSerialiser, SerialiseError};
use crate::state::PlayerId;

/// Fields every action carries in front of its parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEnvelope {
    /// Identifier assigned by the sender for matching replies.
    pub network_id: u32,
    pub flags: CommandFlags,
    /// Player that issued the action.
    pub player: PlayerId,
}

impl ActionEnvelope {
    /// Streams the envelope: type tag, network id, command flags, player.
    ///
    /// # Errors
    ///
    /// When reading, fails on a truncated payload or a type tag that does not
    /// name `command`.
    pub fn serialise(
        &mut self,
        command: GameCommand,
        stream: &mut DataSerialiser,
    ) -> Result<(), SerialiseError> {
        let mut tag = command as u32;
        stream.serialise("type", &mut tag)?;
        if tag != command as u32 {
            return Err(SerialiseError::TypeMismatch {
                expected: command as u32,
                found: tag,
            });
        }
        stream.serialise("network_id", &mut self.network_id)?;
        stream.serialise("flags", &mut self.flags)?;
        stream.serialise("player", &mut self.player)
    }
}
