//! # Kickoff Testing
//!
//! Testing utilities and helpers for the kickoff pipeline.
//!
//! This crate provides:
//! - A recording host double that captures dispatched lifecycle events
//! - A fluent Given-When-Then helper for reducer tests
//! - Tracing initialization for test binaries
//!
//! ## Example
//!
//! ```
//! use kickoff_core::LifecycleEvent;
//! use kickoff_runtime::{RunOptions, drive};
//! use kickoff_testing::RecordingHost;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let host: RecordingHost<u32> = RecordingHost::new();
//!
//! drive(
//!     host.clone(),
//!     "FETCH",
//!     async { Ok::<u32, std::io::Error>(42) },
//!     RunOptions::new(),
//! )
//! .await;
//!
//! let events = host.recorded();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1], LifecycleEvent::success("FETCH", 42));
//! # }
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod reduce_test;

/// Test doubles for the host-store seam.
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};

    use kickoff_core::LifecycleEvent;
    use kickoff_runtime::{EventSink, StateReader};

    /// A host double that records every dispatched event and serves a
    /// fixed snapshot.
    ///
    /// Clones share the same event log, so a test can hand one clone to
    /// the driver and keep another for assertions.
    ///
    /// # Example
    ///
    /// ```
    /// use kickoff_core::LifecycleEvent;
    /// use kickoff_runtime::EventSink;
    /// use kickoff_testing::RecordingHost;
    ///
    /// let host: RecordingHost<i32, &str> = RecordingHost::with_snapshot("host state");
    /// host.dispatch(LifecycleEvent::success("K", 1));
    ///
    /// assert_eq!(host.event_count(), 1);
    /// ```
    #[derive(Debug)]
    pub struct RecordingHost<T, S = ()> {
        events: Arc<Mutex<Vec<LifecycleEvent<T>>>>,
        snapshot: S,
    }

    impl<T> RecordingHost<T, ()> {
        /// A recording host with the unit snapshot.
        #[must_use]
        pub fn new() -> Self {
            Self::with_snapshot(())
        }
    }

    impl<T> Default for RecordingHost<T, ()> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T, S> RecordingHost<T, S> {
        /// A recording host serving the given snapshot from its state
        /// accessor.
        #[must_use]
        pub fn with_snapshot(snapshot: S) -> Self {
            Self {
                events: Arc::new(Mutex::new(Vec::new())),
                snapshot,
            }
        }

        /// The number of events dispatched so far.
        #[must_use]
        pub fn event_count(&self) -> usize {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// A copy of every event dispatched so far, in dispatch order.
        #[must_use]
        pub fn recorded(&self) -> Vec<LifecycleEvent<T>>
        where
            T: Clone,
        {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Drain the recorded events, leaving the log empty.
        #[must_use]
        pub fn take(&self) -> Vec<LifecycleEvent<T>> {
            std::mem::take(
                &mut *self
                    .events
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            )
        }
    }

    impl<T, S: Clone> Clone for RecordingHost<T, S> {
        fn clone(&self) -> Self {
            Self {
                events: Arc::clone(&self.events),
                snapshot: self.snapshot.clone(),
            }
        }
    }

    impl<T: Send, S: Send + Sync> EventSink<T> for RecordingHost<T, S> {
        fn dispatch(&self, event: LifecycleEvent<T>) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }

    impl<T: Send, S: Clone + Send + Sync> StateReader for RecordingHost<T, S> {
        type Snapshot = S;

        fn read(&self) -> S {
            self.snapshot.clone()
        }
    }
}

/// Initialize tracing for tests.
///
/// Installs an env-filtered fmt subscriber writing through the test
/// writer. Safe to call from every test; repeated calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kickoff=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

// Re-export commonly used items
pub use mocks::RecordingHost;
pub use reduce_test::ReduceTest;

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::LifecycleEvent;
    use kickoff_runtime::{EventSink, StateReader};

    #[test]
    fn recording_host_clones_share_one_log() {
        let host: RecordingHost<i32> = RecordingHost::new();
        let clone = host.clone();

        clone.dispatch(LifecycleEvent::pending("K", None));
        clone.dispatch(LifecycleEvent::success("K", 3));

        assert_eq!(host.event_count(), 2);
        assert_eq!(host.recorded()[1], LifecycleEvent::success("K", 3));

        let drained = host.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(clone.event_count(), 0);
    }

    #[test]
    fn recording_host_serves_its_snapshot() {
        let host: RecordingHost<i32, i64> = RecordingHost::with_snapshot(99);
        assert_eq!(host.read(), 99);
    }
}
