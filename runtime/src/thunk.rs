//! The suspension wrapper: schedule an async procedure, return immediately.

use std::future::Future;

/// A deferred effect waiting for the host's handle.
///
/// Produced by [`wrap`] (and by [`kickoff`](crate::kickoff), which builds
/// on it). The host runtime executes it by handing over its handle via
/// [`Thunk::call`]; the wrapped procedure is then spawned onto the tokio
/// runtime and runs to completion on its own.
pub struct Thunk<H> {
    task: Box<dyn FnOnce(H) + Send>,
}

impl<H> Thunk<H> {
    /// Hand the host handle over and schedule the wrapped procedure.
    ///
    /// Returns as soon as the procedure is spawned; it does not wait for
    /// the procedure to run, let alone finish.
    pub fn call(self, host: H) {
        (self.task)(host);
    }
}

impl<H> std::fmt::Debug for Thunk<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thunk(<deferred>)")
    }
}

/// Adapt a single-shot async procedure into the host's deferred-effect
/// shape.
///
/// The returned [`Thunk`] is a synchronous handle: calling it spawns the
/// procedure onto the tokio runtime and discards the join handle. The
/// eventual result is dropped, and nothing supervises the task: errors
/// inside the procedure are the procedure's own responsibility.
///
/// # Example
///
/// ```no_run
/// use kickoff_runtime::wrap;
///
/// let thunk = wrap(|host: String| async move {
///     println!("running with {host}");
/// });
///
/// // Returns immediately; the procedure runs on the runtime.
/// thunk.call("handle".to_string());
/// ```
#[must_use = "a thunk does nothing until the host calls it"]
pub fn wrap<H, F, Fut>(procedure: F) -> Thunk<H>
where
    H: Send + 'static,
    F: FnOnce(H) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Thunk {
        task: Box::new(move |host| {
            drop(tokio::spawn(procedure(host)));
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn call_returns_before_the_procedure_completes() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let thunk = wrap(move |(): ()| async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            flag.store(true, Ordering::SeqCst);
        });

        thunk.call(());
        // The procedure sleeps; call() must not have waited for it.
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::timeout(Duration::from_secs(1), async {
            while !finished.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .ok();
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn procedure_receives_the_host_handle() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        let thunk = wrap(move |host: i64| async move {
            let _ = tx.send(host);
        });
        thunk.call(41);

        let received = tokio::time::timeout(Duration::from_secs(1), rx).await;
        assert_eq!(received.ok().and_then(Result::ok), Some(41));
    }
}
