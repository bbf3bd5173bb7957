//! Fetch demo binary
//!
//! Runs one successful and one failing operation through the kickoff
//! pipeline into a small host store, then prints the resulting slices and
//! the recorded metrics.

use fetch_demo::{FetchStore, FetchStoreError, Greeting, fetch_greeting, flaky_greeting};
use kickoff_runtime::{RunOptions, kickoff};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), FetchStoreError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetch_demo=debug,kickoff_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Record driver metrics so they can be rendered at the end.
    let metrics_handle = PrometheusBuilder::new().install_recorder().ok();

    println!("=== Fetch Demo: kickoff pipeline ===\n");

    let store: FetchStore<String> = FetchStore::new();
    store.register("GREETING", String::new());
    store.register("FLAKY", String::new());

    // Successful lifecycle: pending, then success.
    println!(">>> kicking off GREETING");
    let (tx, rx) = tokio::sync::oneshot::channel();
    kickoff(
        "GREETING",
        fetch_greeting("world"),
        RunOptions::formatted(|greeting: Greeting| greeting.message).on_success(
            move |_store: &FetchStore<String>, message| {
                let _ = tx.send(message);
            },
        ),
    )
    .call(store.clone());

    let pending = store.state("GREETING")?;
    println!("GREETING while in flight: status={}", pending.status());

    if let Ok(message) = rx.await {
        println!("on_success continuation saw: {message:?}");
    }
    let slice = store.state("GREETING")?;
    println!(
        "GREETING settled: status={} data={:?}\n",
        slice.status(),
        slice.data
    );

    // Failing lifecycle: pending, then fail; the payload keeps its seed.
    println!(">>> kicking off FLAKY");
    let (tx, rx) = tokio::sync::oneshot::channel();
    kickoff(
        "FLAKY",
        flaky_greeting(),
        RunOptions::formatted(|greeting: Greeting| greeting.message)
            .with_default_response(Greeting {
                message: "(no greeting yet)".to_string(),
            })
            .on_fail(move |_store: &FetchStore<String>, seed| {
                let _ = tx.send(seed);
            }),
    )
    .call(store.clone());

    if let Ok(seed) = rx.await {
        println!("on_fail continuation saw seed: {seed:?}");
    }
    let slice = store.state("FLAKY")?;
    println!(
        "FLAKY settled: status={} data={:?} error={:?}\n",
        slice.status(),
        slice.data,
        slice.error
    );

    if let Some(handle) = metrics_handle {
        println!("=== Recorded metrics ===\n{}", handle.render());
    }

    Ok(())
}
