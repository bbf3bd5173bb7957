//! # Fetch Demo
//!
//! A minimal host store wired to the kickoff pipeline.
//!
//! The kickoff crates deliberately own no store; they consume an event
//! sink and a state accessor. This demo supplies the host side: a
//! [`FetchStore`] that keeps one [`State`] slice per operation kind,
//! routes each dispatched event to the slice whose kind matches, and folds
//! it in with [`reduce`].
//!
//! ## Example
//!
//! ```
//! use fetch_demo::FetchStore;
//! use kickoff_core::{LifecycleEvent, Status};
//! use kickoff_runtime::EventSink;
//!
//! let store: FetchStore<String> = FetchStore::new();
//! store.register("GREETING", String::new());
//!
//! store.dispatch(LifecycleEvent::success("GREETING", "hello".to_string()));
//!
//! let slice = store.state("GREETING").unwrap();
//! assert_eq!(slice.status(), Status::Success);
//! assert_eq!(slice.data, "hello");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use kickoff_core::{LifecycleEvent, ReducerPolicy, State, reduce};
use kickoff_runtime::{EventSink, StateReader};
use thiserror::Error;

/// Errors that can occur when querying the demo store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchStoreError {
    /// No slice has been registered under the requested kind.
    #[error("no slice registered for kind: {0}")]
    UnknownSlice(String),
}

/// A small multi-slice host store.
///
/// Keeps one [`State`] per operation kind behind an `RwLock`, and applies
/// [`reduce`] under its policy whenever an event for a registered kind is
/// dispatched. Events addressed to unregistered kinds are logged and
/// dropped; this store chooses not to fail the dispatcher.
///
/// Clones share the same slices, so one clone can be handed to the driver
/// while another serves queries.
#[derive(Debug)]
pub struct FetchStore<T> {
    slices: Arc<RwLock<HashMap<String, State<T>>>>,
    policy: ReducerPolicy,
}

impl<T: Clone> FetchStore<T> {
    /// A store reducing under the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(ReducerPolicy::default())
    }

    /// A store reducing under a custom policy.
    #[must_use]
    pub fn with_policy(policy: ReducerPolicy) -> Self {
        Self {
            slices: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }

    /// Register a slice under a kind, seeded pending.
    ///
    /// Replaces any existing slice of the same kind with a fresh one.
    pub fn register(&self, kind: impl Into<String>, seed: T) {
        self.slices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind.into(), State::new(seed));
    }

    /// A snapshot of the slice registered under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchStoreError::UnknownSlice`] if no slice has been
    /// registered under that kind.
    pub fn state(&self, kind: &str) -> Result<State<T>, FetchStoreError> {
        self.slices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .cloned()
            .ok_or_else(|| FetchStoreError::UnknownSlice(kind.to_string()))
    }
}

impl<T: Clone> Default for FetchStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FetchStore<T> {
    fn clone(&self) -> Self {
        Self {
            slices: Arc::clone(&self.slices),
            policy: self.policy.clone(),
        }
    }
}

impl<T: Clone + Send + Sync> EventSink<T> for FetchStore<T> {
    fn dispatch(&self, event: LifecycleEvent<T>) {
        let mut slices = self.slices.write().unwrap_or_else(PoisonError::into_inner);
        match slices.get_mut(event.kind()) {
            Some(slice) => *slice = reduce(slice, &event, &self.policy),
            None => {
                tracing::warn!(kind = event.kind(), "event for unregistered kind dropped");
            },
        }
    }
}

impl<T: Clone + Send + Sync> StateReader for FetchStore<T> {
    type Snapshot = HashMap<String, State<T>>;

    fn read(&self) -> Self::Snapshot {
        self.slices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// What the fake greeting endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// The rendered greeting line.
    pub message: String,
}

/// Errors produced by the fake endpoints.
#[derive(Error, Debug)]
pub enum EndpointError {
    /// The service did not answer.
    #[error("greeting service unreachable")]
    Unreachable,
}

/// A fake endpoint that answers after a short delay.
///
/// # Errors
///
/// Never fails; the signature matches a real network call.
pub async fn fetch_greeting(name: &str) -> Result<Greeting, EndpointError> {
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    Ok(Greeting {
        message: format!("hello, {name}"),
    })
}

/// A fake endpoint that is always down.
///
/// # Errors
///
/// Always returns [`EndpointError::Unreachable`].
pub async fn flaky_greeting() -> Result<Greeting, EndpointError> {
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    Err(EndpointError::Unreachable)
}
