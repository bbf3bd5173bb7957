//! # Kickoff Runtime
//!
//! The imperative half of the kickoff pipeline: the lifecycle driver that
//! turns one asynchronous operation into a deterministic sequence of
//! [`LifecycleEvent`](kickoff_core::LifecycleEvent)s, and the suspension
//! wrapper that schedules it without blocking the caller.
//!
//! The host store stays external. This crate consumes it through two small
//! seams, an event sink and a state accessor, and never reimplements
//! dispatch, subscription, or reduction registration.
//!
//! ## Core Components
//!
//! - **[`EventSink`] / [`StateReader`]**: the injected host-store surface
//! - **[`kickoff`] / [`drive`]**: the lifecycle driver
//!   (pending → success|fail, exactly once each)
//! - **[`RunOptions`]**: per-run configuration, fully defaulted at
//!   construction and resolved once at the run boundary
//! - **[`wrap`] / [`Thunk`]**: schedule an async procedure, return
//!   immediately, discard its result
//!
//! ## Example
//!
//! ```no_run
//! use kickoff_core::LifecycleEvent;
//! use kickoff_runtime::{FnHost, RunOptions, kickoff};
//!
//! # async fn endpoint() -> Result<u64, std::io::Error> { Ok(42) }
//! # fn example() {
//! let host = FnHost::new(
//!     |event: LifecycleEvent<u64>| println!("{event:?}"),
//!     || (),
//! );
//!
//! // Dispatches pending now, success or fail when the endpoint settles.
//! kickoff("FETCH", endpoint(), RunOptions::new()).call(host);
//! # }
//! ```

mod driver;
mod host;
mod thunk;

pub use driver::{Report, RunOptions, drive, kickoff};
pub use host::{EventSink, FnHost, StateReader};
pub use thunk::{Thunk, wrap};
