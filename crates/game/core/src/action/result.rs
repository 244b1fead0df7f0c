use std::fmt;

use super::StringId;
use crate::state::{CoordsXYZ, ExpenditureType, Money};

/// Outcome kind of a query or execute call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum Status {
    #[default]
    Ok,
    /// Malformed or stale reference. Always logged.
    InvalidParameters,
    Disallowed,
    GamePaused,
    InsufficientFunds,
    NotInEditorMode,
    /// Ownership or build-permission precondition failed.
    NotOwned,
    TooLow,
    TooHigh,
    NoClearance,
    ItemAlreadyPlaced,
    NotClosed,
    Broken,
    NoFreeElements,
    Unknown,
}

/// Result of a query or execute call.
///
/// Failures carry a title and a message identifier so a UI can render a
/// two-line error. Cost is signed; negative values are refunds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub status: Status,
    pub error_title: StringId,
    pub error_message: StringId,
    pub cost: Money,
    pub expenditure: Option<ExpenditureType>,
    /// Affected location for camera and UI feedback.
    pub position: Option<CoordsXYZ>,
}

impl ActionResult {
    /// Successful result with no cost or detail.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Failed result with a status and message identifiers.
    pub fn error(status: Status, title: StringId, message: StringId) -> Self {
        Self {
            status,
            error_title: title,
            error_message: message,
            ..Self::default()
        }
    }

    /// Turns `self` into a failure while keeping its position and expenditure.
    #[must_use]
    pub fn fail(self, status: Status, title: StringId, message: StringId) -> Self {
        Self {
            status,
            error_title: title,
            error_message: message,
            ..self
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: CoordsXYZ) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_expenditure(mut self, expenditure: ExpenditureType) -> Self {
        self.expenditure = Some(expenditure);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status: &'static str = self.status.into();
        if self.is_ok() {
            write!(f, "{status} (cost {})", self.cost)
        } else {
            write!(
                f,
                "{status}: {} / {}",
                self.error_title.key(),
                self.error_message.key()
            )
        }
    }
}
