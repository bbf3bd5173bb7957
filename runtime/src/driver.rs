//! The lifecycle driver: one asynchronous operation in, a deterministic
//! event sequence out.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use kickoff_core::LifecycleEvent;

use crate::host::EventSink;
use crate::thunk::{Thunk, wrap};

/// Type alias for the pure result transform applied before emission.
type Format<R, T> = Box<dyn Fn(R) -> T + Send>;

/// Type alias for phase continuation callbacks.
type Continuation<H, P> = Box<dyn FnOnce(&H, P) + Send>;

/// The observability sink invoked when an operation fails.
///
/// Receives the operation `kind` and the stringified failure reason. The
/// default sink logs through `tracing::error!`; [`Report::silent`] is the
/// literal no-op for hosts that handle failures entirely through the fail
/// event.
#[derive(Clone)]
pub struct Report(Arc<dyn Fn(&str, &str) + Send + Sync>);

impl Report {
    /// Wrap a custom reporting function.
    #[must_use]
    pub fn new(report: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(report))
    }

    /// A sink that reports nowhere.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(|_, _| {})
    }

    fn call(&self, kind: &str, error: &str) {
        (self.0)(kind, error);
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(|kind, error| {
            tracing::error!(kind = kind, error = error, "kickoff operation failed");
        })
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Report(<sink>)")
    }
}

/// Per-run configuration for [`kickoff`] and [`drive`].
///
/// Every field has an explicit default at construction: identity `format`
/// (when the raw and stored types coincide), no default response, no
/// continuations, the tracing [`Report`] sink. Options are resolved exactly
/// once at the run boundary, so nothing downstream ever sees a
/// partially-defaulted configuration.
///
/// # Type Parameters
///
/// - `R`: the raw type the operation produces
/// - `T`: the stored type, after `format`
/// - `H`: the host handle continuations receive
///
/// # Example
///
/// ```
/// use kickoff_runtime::{FnHost, RunOptions};
/// # use kickoff_core::LifecycleEvent;
/// # type Host = FnHost<fn(LifecycleEvent<usize>), fn()>;
///
/// let options: RunOptions<Vec<u8>, usize, Host> =
///     RunOptions::formatted(|raw: Vec<u8>| raw.len())
///         .with_default_response(Vec::new())
///         .on_success(|_host, len| println!("stored {len} bytes"));
/// ```
pub struct RunOptions<R, T, H> {
    format: Format<R, T>,
    default_response: Option<R>,
    on_pending: Option<Continuation<H, Option<T>>>,
    on_success: Option<Continuation<H, T>>,
    on_fail: Option<Continuation<H, Option<T>>>,
    report: Report,
}

impl<T: 'static, H> RunOptions<T, T, H> {
    /// Options with the identity transform: the operation's result is
    /// stored as-is.
    #[must_use]
    pub fn new() -> Self {
        Self::formatted(std::convert::identity)
    }
}

impl<T: 'static, H> Default for RunOptions<T, T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, T, H> RunOptions<R, T, H> {
    /// Options with an explicit transform from the raw result to the
    /// stored payload.
    ///
    /// The transform must be pure; it is applied to the default response
    /// (if any) when the run starts and to the raw result on success.
    #[must_use]
    pub fn formatted(format: impl Fn(R) -> T + Send + 'static) -> Self {
        Self {
            format: Box::new(format),
            default_response: None,
            on_pending: None,
            on_success: None,
            on_fail: None,
            report: Report::default(),
        }
    }

    /// Seed value carried (formatted) in the pending and fail events.
    ///
    /// `Some(value)` always counts as present; a zero or empty default is
    /// carried like any other.
    #[must_use]
    pub fn with_default_response(mut self, response: R) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Continuation invoked right after the pending event is dispatched.
    ///
    /// Receives the host handle and the formatted seed, in the same task
    /// that dispatched the event.
    #[must_use]
    pub fn on_pending(mut self, callback: impl FnOnce(&H, Option<T>) + Send + 'static) -> Self {
        self.on_pending = Some(Box::new(callback));
        self
    }

    /// Continuation invoked right after the success event is dispatched.
    ///
    /// Receives the host handle and the formatted payload. This is the
    /// hook for chaining operations that depend on a success.
    #[must_use]
    pub fn on_success(mut self, callback: impl FnOnce(&H, T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Continuation invoked right after the fail event is dispatched.
    ///
    /// Receives the host handle and the formatted seed.
    #[must_use]
    pub fn on_fail(mut self, callback: impl FnOnce(&H, Option<T>) + Send + 'static) -> Self {
        self.on_fail = Some(Box::new(callback));
        self
    }

    /// Replace the failure report sink.
    #[must_use]
    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Resolve the options into their fully-populated run form.
    ///
    /// Applies `format` to the default response once, so the seed is
    /// computed before the pending event and shared with the fail event.
    fn resolve(self) -> Resolved<R, T, H> {
        let seed = self.default_response.map(&self.format);
        Resolved {
            format: self.format,
            seed,
            on_pending: self.on_pending,
            on_success: self.on_success,
            on_fail: self.on_fail,
            report: self.report,
        }
    }
}

impl<R, T, H> std::fmt::Debug for RunOptions<R, T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOptions")
            .field("default_response", &self.default_response.is_some())
            .field("on_pending", &self.on_pending.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .finish_non_exhaustive()
    }
}

/// Internal: options after the one-time resolution at the run boundary.
struct Resolved<R, T, H> {
    format: Format<R, T>,
    seed: Option<T>,
    on_pending: Option<Continuation<H, Option<T>>>,
    on_success: Option<Continuation<H, T>>,
    on_fail: Option<Continuation<H, Option<T>>>,
    report: Report,
}

/// Drive one asynchronous operation through its lifecycle.
///
/// The fixed sequence, with no branching on external state:
///
/// 1. dispatch `Pending { seed }` and invoke `on_pending`
/// 2. await the operation (the sole suspension point)
/// 3. on `Ok`: dispatch `Success { format(result) }`, invoke `on_success`
/// 4. on `Err`: dispatch `Fail { seed, reason }`, invoke `on_fail`, and
///    report the failure through the [`Report`] sink
///
/// The pending event is dispatched exactly once before either outcome, and
/// exactly one of success/fail is dispatched, exactly once. Failures are
/// captured, never re-thrown. There is no retry, no cancellation, and no
/// timeout: the operation is awaited to completion unconditionally, and a
/// run that never resolves leaves its slice pending forever.
///
/// Continuations run synchronously in this task, immediately after their
/// event. An operation that panics tears down the task after the pending
/// event; nothing supervises it (see [`wrap`]).
pub async fn drive<H, R, T, E, Fut>(
    host: H,
    kind: impl Into<String> + Send,
    operation: Fut,
    options: RunOptions<R, T, H>,
) where
    H: EventSink<T>,
    T: Clone,
    E: Display,
    Fut: Future<Output = Result<R, E>>,
{
    let kind = kind.into();
    let resolved = options.resolve();
    let seed = resolved.seed;

    tracing::debug!(kind = kind.as_str(), "dispatching pending");
    metrics::counter!("kickoff.pending").increment(1);
    host.dispatch(LifecycleEvent::pending(kind.clone(), seed.clone()));
    if let Some(callback) = resolved.on_pending {
        callback(&host, seed.clone());
    }

    match operation.await {
        Ok(raw) => {
            let payload = (resolved.format)(raw);
            tracing::debug!(kind = kind.as_str(), "dispatching success");
            metrics::counter!("kickoff.success").increment(1);
            host.dispatch(LifecycleEvent::success(kind, payload.clone()));
            if let Some(callback) = resolved.on_success {
                callback(&host, payload);
            }
        },
        Err(why) => {
            let error = why.to_string();
            metrics::counter!("kickoff.fail").increment(1);
            host.dispatch(LifecycleEvent::fail(kind.clone(), seed.clone(), error.clone()));
            if let Some(callback) = resolved.on_fail {
                callback(&host, seed);
            }
            resolved.report.call(&kind, &error);
        },
    }
}

/// Kick off an asynchronous operation and load its lifecycle into the host
/// store.
///
/// This is [`drive`] packaged as a deferred effect: the returned
/// [`Thunk`] schedules the driver onto the runtime when the host hands its
/// handle over, and returns immediately. Each invocation manages exactly
/// one externally-supplied operation; callers wanting a retry start a new
/// run.
///
/// # Example
///
/// ```no_run
/// use kickoff_core::LifecycleEvent;
/// use kickoff_runtime::{FnHost, RunOptions, kickoff};
///
/// # async fn load_profile() -> Result<String, std::io::Error> {
/// #     Ok("profile".to_string())
/// # }
/// # fn example() {
/// let host = FnHost::new(|event: LifecycleEvent<String>| drop(event), || ());
///
/// kickoff(
///     "PROFILE",
///     load_profile(),
///     RunOptions::new().with_default_response(String::new()),
/// )
/// .call(host);
/// # }
/// ```
#[must_use = "a thunk does nothing until the host calls it"]
pub fn kickoff<H, R, T, E, Fut>(
    kind: impl Into<String> + Send + 'static,
    operation: Fut,
    options: RunOptions<R, T, H>,
) -> Thunk<H>
where
    H: EventSink<T> + Send + 'static,
    R: Send + 'static,
    T: Clone + Send + 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    wrap(move |host: H| drive(host, kind, operation, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_resolve_formats_the_default_response_once() {
        let options: RunOptions<i32, String, ()> =
            RunOptions::formatted(|raw: i32| format!("#{raw}"))
                .with_default_response(7);

        let resolved = options.resolve();
        assert_eq!(resolved.seed.as_deref(), Some("#7"));
    }

    #[test]
    fn options_without_default_response_have_no_seed() {
        let options: RunOptions<i32, i32, ()> = RunOptions::new();
        let resolved = options.resolve();
        assert!(resolved.seed.is_none());
    }

    #[test]
    fn zero_counts_as_a_present_default_response() {
        let options: RunOptions<i32, i32, ()> = RunOptions::new().with_default_response(0);
        let resolved = options.resolve();
        assert_eq!(resolved.seed, Some(0));
    }

    #[test]
    fn debug_shows_which_hooks_are_set() {
        let options: RunOptions<i32, i32, ()> =
            RunOptions::new().on_success(|_host, _payload| {});
        let rendered = format!("{options:?}");
        assert!(rendered.contains("on_success: true"));
        assert!(rendered.contains("on_pending: false"));
    }
}
