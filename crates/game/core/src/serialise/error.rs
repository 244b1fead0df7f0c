use crate::error::{ErrorSeverity, GameError};
use crate::state::StateError;

/// Failures while reading or writing a [`DataSerialiser`](super::DataSerialiser).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SerialiseError {
    /// The payload ended before a field was complete.
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// The envelope names a different command than the action being read.
    #[error("command type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: u32, found: u32 },

    /// The envelope names no known command.
    #[error("unknown command type {0}")]
    UnknownCommand(u32),

    /// A field decoded to a value outside its domain.
    #[error("invalid {kind} value {value}")]
    InvalidValue { kind: &'static str, value: u32 },

    /// A raw tile element record could not be rebuilt.
    #[error("invalid tile element: {0}")]
    InvalidElement(#[from] StateError),

    /// Bytes were left over after the action was fully read.
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
}

impl GameError for SerialiseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SerialiseError::*;
        match self {
            UnexpectedEof { .. } => "SERIALISE_UNEXPECTED_EOF",
            TypeMismatch { .. } => "SERIALISE_TYPE_MISMATCH",
            UnknownCommand(_) => "SERIALISE_UNKNOWN_COMMAND",
            InvalidValue { .. } => "SERIALISE_INVALID_VALUE",
            InvalidElement(_) => "SERIALISE_INVALID_ELEMENT",
            TrailingBytes(_) => "SERIALISE_TRAILING_BYTES",
        }
    }
}
