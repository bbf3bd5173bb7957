//! Lifecycle status for asynchronous operations.

use serde::{Deserialize, Serialize};

/// The phase an asynchronous operation has reached.
///
/// This is a closed enumeration: every slice managed by the kickoff
/// pipeline is in exactly one of these phases at any point. No total order
/// is implied: transitions are driven purely by the events the driver
/// emits, not by a state machine internal to [`State`](crate::State).
///
/// Serialized as the lowercase strings `pending` / `success` / `fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation has been started but has not produced an outcome yet.
    Pending,

    /// The operation completed and its result was accepted.
    Success,

    /// The operation failed; the failure reason travels with the event.
    Fail,
}

impl Status {
    /// Check if this is the pending phase.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if this is the success phase.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Check if this is the fail phase.
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
        }
    }
}
