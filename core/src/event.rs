//! Lifecycle events dispatched by the driver and folded by the reducer.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// One discrete notification that an asynchronous operation reached a phase.
///
/// Each variant carries exactly the fields relevant to its phase, so a
/// `success` event cannot smuggle an error and a `fail` event cannot omit
/// one. The `kind` field namespaces events so many independent operations
/// can share one store: the reducer itself is agnostic to it, and the host
/// is responsible for routing an event only to the slice whose kind
/// matches.
///
/// Pending and fail events may carry no payload at all; that is the case
/// when the driver was started without a default response, and the slice's
/// carried data is left alone.
///
/// Serialized with an adjacent `status` tag, so the wire shape of a fail
/// event is `{"status":"fail","kind":…,"data":…,"error":…}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LifecycleEvent<T> {
    /// The operation was started.
    Pending {
        /// Operation identifier namespacing this event.
        kind: String,
        /// The formatted default response, when one was supplied.
        data: Option<T>,
    },

    /// The operation completed and produced a payload.
    Success {
        /// Operation identifier namespacing this event.
        kind: String,
        /// The formatted result of the operation.
        data: T,
    },

    /// The operation failed.
    Fail {
        /// Operation identifier namespacing this event.
        kind: String,
        /// The formatted default response, when one was supplied.
        data: Option<T>,
        /// The stringified failure reason.
        error: String,
    },
}

impl<T> LifecycleEvent<T> {
    /// Create a pending event.
    #[must_use]
    pub fn pending(kind: impl Into<String>, data: Option<T>) -> Self {
        Self::Pending {
            kind: kind.into(),
            data,
        }
    }

    /// Create a success event carrying the accepted payload.
    #[must_use]
    pub fn success(kind: impl Into<String>, data: T) -> Self {
        Self::Success {
            kind: kind.into(),
            data,
        }
    }

    /// Create a fail event carrying the failure reason.
    #[must_use]
    pub fn fail(kind: impl Into<String>, data: Option<T>, error: impl Into<String>) -> Self {
        Self::Fail {
            kind: kind.into(),
            data,
            error: error.into(),
        }
    }

    /// The operation identifier this event is addressed to.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Pending { kind, .. } | Self::Success { kind, .. } | Self::Fail { kind, .. } => {
                kind
            },
        }
    }

    /// The lifecycle phase this event notifies.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Pending { .. } => Status::Pending,
            Self::Success { .. } => Status::Success,
            Self::Fail { .. } => Status::Fail,
        }
    }

    /// The payload carried by this event, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Pending { data, .. } | Self::Fail { data, .. } => data.as_ref(),
        }
    }

    /// The failure reason, present only on fail events.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Fail { error, .. } => Some(error),
            Self::Pending { .. } | Self::Success { .. } => None,
        }
    }
}
