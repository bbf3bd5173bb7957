//! The pure reduction step folding lifecycle events into state snapshots.

use smallvec::{SmallVec, smallvec};

use crate::event::LifecycleEvent;
use crate::state::State;
use crate::status::Status;

/// Which lifecycle phases are allowed to replace the carried payload.
///
/// `status` and `error` always follow the incoming event; the policy only
/// governs `data`. The default policy replaces the payload on success
/// events alone, so pending and fail events update the phase while the last
/// accepted payload stays visible.
///
/// # Example
///
/// ```
/// use kickoff_core::{ReducerPolicy, Status};
///
/// // Default: only success replaces data.
/// let policy = ReducerPolicy::default();
/// assert!(policy.changes_data_on(Status::Success));
/// assert!(!policy.changes_data_on(Status::Fail));
///
/// // Also take the default response carried by pending events.
/// let eager = ReducerPolicy::default().with_status(Status::Pending);
/// assert!(eager.changes_data_on(Status::Pending));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerPolicy {
    change_data_on: SmallVec<[Status; 3]>,
}

impl ReducerPolicy {
    /// Create the default policy: only success events replace the payload.
    #[must_use]
    pub fn new() -> Self {
        Self {
            change_data_on: smallvec![Status::Success],
        }
    }

    /// Create a policy from an explicit set of phases.
    ///
    /// Duplicates are ignored. An empty set is valid: no event will ever
    /// replace the payload, only `status` and `error` move.
    #[must_use]
    pub fn change_data_on(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut policy = Self {
            change_data_on: SmallVec::new(),
        };
        for status in statuses {
            policy = policy.with_status(status);
        }
        policy
    }

    /// Add a phase to the set that replaces the payload.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        if !self.change_data_on.contains(&status) {
            self.change_data_on.push(status);
        }
        self
    }

    /// Whether events in the given phase replace the payload.
    #[must_use]
    pub fn changes_data_on(&self, status: Status) -> bool {
        self.change_data_on.contains(&status)
    }
}

impl Default for ReducerPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one lifecycle event into a new state snapshot.
///
/// Pure and total: no I/O, no side effects, and calling it any number of
/// times with the same arguments yields structurally equal results. Neither
/// input is mutated: the previous snapshot remains valid, which is what
/// lets this serve as the reduction step of an event-sourced store.
///
/// The new snapshot takes `status` and `error` from the event verbatim
/// (`error` is `Some` exactly for fail events, so a success event clears a
/// stale error). `data` is taken from the event iff the event's phase is in
/// the policy **and** the event carries a payload; otherwise the previous
/// payload is cloned forward.
///
/// The caller must only feed events whose `kind` matches the slice this
/// state belongs to; the reducer does not check.
///
/// # Examples
///
/// ```
/// use kickoff_core::{LifecycleEvent, ReducerPolicy, State, Status, reduce};
///
/// let policy = ReducerPolicy::default();
/// let state = State::new(0);
///
/// let state = reduce(&state, &LifecycleEvent::success("FETCH", 42), &policy);
/// assert_eq!(state.data, 42);
///
/// // Fail is not in the default policy: the payload stays.
/// let state = reduce(
///     &state,
///     &LifecycleEvent::fail("FETCH", None, "timeout"),
///     &policy,
/// );
/// assert_eq!(state.data, 42);
/// assert_eq!(state.status, Status::Fail);
/// assert_eq!(state.error.as_deref(), Some("timeout"));
/// ```
#[must_use]
pub fn reduce<T: Clone>(
    state: &State<T>,
    event: &LifecycleEvent<T>,
    policy: &ReducerPolicy,
) -> State<T> {
    let data = if policy.changes_data_on(event.status()) {
        event
            .data()
            .cloned()
            .unwrap_or_else(|| state.data.clone())
    } else {
        state.data.clone()
    };

    State {
        data,
        status: event.status(),
        error: event.error().map(str::to_owned),
    }
}

impl<T: Clone> State<T> {
    /// Fold an event into this snapshot under the default policy.
    ///
    /// Shorthand for [`reduce`] with [`ReducerPolicy::default`].
    #[must_use]
    pub fn apply(&self, event: &LifecycleEvent<T>) -> Self {
        reduce(self, event, &ReducerPolicy::default())
    }
}
