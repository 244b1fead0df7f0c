//! Common error infrastructure for park-core.
//!
//! Infrastructure failures (state storage, oracles, the serialisation stream)
//! are `thiserror` enums implementing [`GameError`]. Gameplay rejections are not
//! errors: they travel as an [`ActionResult`](crate::action::ActionResult)
//! carrying a status and message identifiers.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: capacity or timing conditions that may clear later
/// - **Validation**: malformed input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable, the peer must resynchronise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: element budget exhausted, banner slot taken.
    Recoverable,

    /// Examples: unknown command tag, truncated payload.
    Validation,

    /// Examples: world state that fails to encode.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Examples: missing required oracle.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all park-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
