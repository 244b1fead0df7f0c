use bitflags::bitflags;

use crate::serialise::{DataSerialiser, Serialisable, SerialiseError};

bitflags! {
    /// Static execution properties an action type declares.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u16 {
        /// May run while the game is paused.
        const ALLOW_WHILE_PAUSED = 1 << 0;
        /// Runs locally only and is never replicated.
        const CLIENT_ONLY        = 1 << 1;
        /// Only valid inside the scenario editor.
        const EDITOR_ONLY        = 1 << 2;
    }
}

bitflags! {
    /// Per-instance flags carried in the action envelope.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CommandFlags: u32 {
        const APPLY               = 1 << 0;
        /// Re-run from a replay log.
        const REPLAY              = 1 << 1;
        const ALLOW_DURING_PAUSED = 1 << 3;
        /// Validate and execute without charging the park.
        const NO_SPEND            = 1 << 5;
        /// Acts on provisional preview elements.
        const GHOST               = 1 << 6;
        const PATH_SCENERY        = 1 << 7;
        /// Arrived from (or was already sent to) the server.
        const NETWORKED           = 1 << 31;

        const _ = !0;
    }
}

impl Serialisable for CommandFlags {
    fn encode(&self, out: &mut Vec<u8>) {
        self.bits().encode(out);
    }

    fn decode(stream: &mut DataSerialiser) -> Result<Self, SerialiseError> {
        Ok(Self::from_bits_retain(u32::decode(stream)?))
    }
}
