//! # Kickoff Core
//!
//! Pure types for representing asynchronous request lifecycles in a
//! centralized, immutable state store.
//!
//! This crate is the leaf of the kickoff pipeline. It knows nothing about
//! async runtimes, dispatch transports, or stores. It defines the data
//! model and the pure reduction step that folds lifecycle events into state
//! snapshots.
//!
//! ## Core Concepts
//!
//! - **[`Status`]**: the three lifecycle phases (`pending`, `success`, `fail`)
//! - **[`State`]**: an immutable snapshot of one store slice, the carried
//!   payload plus the phase that produced it
//! - **[`LifecycleEvent`]**: one discrete notification that an operation
//!   reached a phase, namespaced by a `kind` so many independent operations
//!   can share one store
//! - **[`ReducerPolicy`]** and **[`reduce`]**: which phases may replace the
//!   carried payload, and the pure fold itself
//!
//! ## Architecture Principles
//!
//! - Snapshots are never mutated in place: [`reduce`] returns a new
//!   [`State`] and leaves its inputs untouched
//! - Illegal states are unrepresentable: a `success` event cannot carry an
//!   error, a `fail` event cannot omit one
//! - Kind-matching is the host's job: [`reduce`] is agnostic to
//!   [`LifecycleEvent::kind`] and must only be fed events addressed to the
//!   slice being updated
//!
//! ## Example
//!
//! ```
//! use kickoff_core::{LifecycleEvent, ReducerPolicy, State, Status, reduce};
//!
//! let initial: State<i64> = State::new(0);
//! assert_eq!(initial.status(), Status::Pending);
//!
//! let policy = ReducerPolicy::default();
//! let loaded = reduce(
//!     &initial,
//!     &LifecycleEvent::success("FETCH", 42),
//!     &policy,
//! );
//!
//! assert_eq!(loaded.data, 42);
//! assert!(loaded.is_success());
//! // The old snapshot is still valid and unchanged.
//! assert_eq!(initial.data, 0);
//! ```

pub use serde::{Deserialize, Serialize};

mod event;
mod reducer;
mod state;
mod status;

pub use event::LifecycleEvent;
pub use reducer::{ReducerPolicy, reduce};
pub use state::{Failure, Request, State};
pub use status::Status;
