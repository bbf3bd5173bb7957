//! Immutable state snapshots and their selectors.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// One immutable snapshot of a store slice managed by the kickoff pipeline.
///
/// `data` holds either the last accepted payload or the caller-chosen seed;
/// `status` is the phase the slice is in; `error` is the failure reason when
/// `status` is [`Status::Fail`] and `None` otherwise.
///
/// A snapshot is created once via [`State::new`] and changed only by passing
/// it together with a [`LifecycleEvent`](crate::LifecycleEvent) through
/// [`reduce`](crate::reduce), which returns a new, independent snapshot.
/// The old snapshot remains valid and unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State<T> {
    /// The carried payload: the last accepted result, or the initial seed.
    pub data: T,

    /// The lifecycle phase this slice is in.
    pub status: Status,

    /// The failure reason, present when `status` is [`Status::Fail`].
    pub error: Option<String>,
}

impl<T> State<T> {
    /// Create the initial snapshot for a slice.
    ///
    /// The slice starts in [`Status::Pending`] with the caller-given seed as
    /// its payload and no error.
    ///
    /// # Examples
    ///
    /// ```
    /// use kickoff_core::{State, Status};
    ///
    /// let state = State::new(Vec::<String>::new());
    /// assert_eq!(state.status(), Status::Pending);
    /// assert!(state.data.is_empty());
    /// assert!(state.error.is_none());
    /// ```
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            data,
            status: Status::Pending,
            error: None,
        }
    }

    /// The status and error pair, as one projection.
    #[must_use]
    pub fn request(&self) -> Request<'_> {
        Request {
            status: self.status,
            error: self.error.as_deref(),
        }
    }

    /// The lifecycle phase alone.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// The carried payload alone.
    ///
    /// Meaningful after the slice has left [`Status::Pending`] in typical
    /// usage, though valid to call in any phase.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Whether the last applied event was a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the slice is awaiting an outcome.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// The failure descriptor: whether the slice failed, and why.
    #[must_use]
    pub fn failure(&self) -> Failure<'_> {
        Failure {
            failed: self.status.is_fail(),
            why: self.error.as_deref(),
        }
    }
}

/// The status/error projection of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// The lifecycle phase of the slice.
    pub status: Status,

    /// The failure reason, when there is one.
    pub error: Option<&'a str>,
}

/// The failure projection of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure<'a> {
    /// Whether the slice is in the fail phase.
    pub failed: bool,

    /// The failure reason carried by the slice, if any.
    pub why: Option<&'a str>,
}
