//! The injected host-store surface.
//!
//! The kickoff pipeline never owns a store. Whatever container the
//! application uses, it plugs in here: an [`EventSink`] that accepts
//! dispatched lifecycle events, and a [`StateReader`] that hands back a
//! snapshot of the host state. Continuation callbacks receive the same
//! handle, which is how dependent operations get chained.
//!
//! Kind-matching stays on the host side: a sink that fans events out to
//! slices must route each event by its `kind` before reducing.

use kickoff_core::LifecycleEvent;

/// Accepts lifecycle events dispatched by the driver.
///
/// Dispatch is synchronous and infallible from the driver's point of view:
/// a host that can lose events (closed channel, missing slice) decides for
/// itself whether to log or drop.
pub trait EventSink<T>: Send + Sync {
    /// Deliver one lifecycle event to the host store.
    fn dispatch(&self, event: LifecycleEvent<T>);
}

/// Hands back a snapshot of the host state.
///
/// The accessor is synchronous; hosts that keep state behind a lock take
/// and release it inside `read`.
pub trait StateReader: Send + Sync {
    /// The snapshot type the host exposes.
    type Snapshot;

    /// Read the current host state.
    fn read(&self) -> Self::Snapshot;
}

/// Adapter for hosts that expose plain functions instead of trait impls.
///
/// Wraps an event-dispatch closure and a state-accessor closure into the
/// [`EventSink`] + [`StateReader`] pair the driver consumes.
///
/// # Example
///
/// ```
/// use kickoff_core::LifecycleEvent;
/// use kickoff_runtime::{EventSink, FnHost, StateReader};
///
/// let host = FnHost::new(
///     |event: LifecycleEvent<String>| drop(event),
///     || 7_i64,
/// );
///
/// host.dispatch(LifecycleEvent::success("K", "hi".to_string()));
/// assert_eq!(host.read(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct FnHost<D, G> {
    dispatch: D,
    read: G,
}

impl<D, G> FnHost<D, G> {
    /// Wrap a dispatch closure and a state-accessor closure.
    #[must_use]
    pub const fn new(dispatch: D, read: G) -> Self {
        Self { dispatch, read }
    }
}

impl<T, D, G> EventSink<T> for FnHost<D, G>
where
    D: Fn(LifecycleEvent<T>) + Send + Sync,
    G: Send + Sync,
{
    fn dispatch(&self, event: LifecycleEvent<T>) {
        (self.dispatch)(event);
    }
}

impl<S, D, G> StateReader for FnHost<D, G>
where
    D: Send + Sync,
    G: Fn() -> S + Send + Sync,
{
    type Snapshot = S;

    fn read(&self) -> S {
        (self.read)()
    }
}
