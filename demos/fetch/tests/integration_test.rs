//! Integration tests for the fetch demo store with the kickoff pipeline.
//!
//! These exercise the full flow: driver → dispatched events → store
//! reduction → selectors.

use std::time::Duration;

use fetch_demo::{FetchStore, Greeting, fetch_greeting, flaky_greeting};
use kickoff_core::{ReducerPolicy, Status};
use kickoff_runtime::{Report, RunOptions, kickoff};
use kickoff_testing::init_test_tracing;

#[allow(clippy::panic)] // Test helper can panic on timeout
async fn settled(store: &FetchStore<String>, kind: &str) -> kickoff_core::State<String> {
    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            if let Ok(slice) = store.state(kind) {
                if !slice.is_pending() {
                    return slice;
                }
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .map_or_else(
        |_| panic!("slice {kind} never settled"),
        |slice| slice,
    )
}

#[tokio::test]
async fn successful_fetch_lands_in_the_store() {
    init_test_tracing();

    let store: FetchStore<String> = FetchStore::new();
    store.register("GREETING", String::new());

    kickoff(
        "GREETING",
        fetch_greeting("tests"),
        RunOptions::formatted(|greeting: Greeting| greeting.message),
    )
    .call(store.clone());

    let slice = settled(&store, "GREETING").await;
    assert!(slice.is_success());
    assert_eq!(slice.data, "hello, tests");
    assert!(slice.error.is_none());
}

#[tokio::test]
async fn failed_fetch_keeps_the_seed_and_records_the_reason() {
    init_test_tracing();

    let store: FetchStore<String> = FetchStore::new();
    store.register("FLAKY", "seed".to_string());

    kickoff(
        "FLAKY",
        flaky_greeting(),
        RunOptions::formatted(|greeting: Greeting| greeting.message)
            .with_report(Report::silent()),
    )
    .call(store.clone());

    let slice = settled(&store, "FLAKY").await;
    let failure = slice.failure();
    assert!(failure.failed);
    assert_eq!(failure.why, Some("greeting service unreachable"));
    // Fail is not in the default policy: the seed payload survives.
    assert_eq!(slice.data, "seed");
}

#[tokio::test]
async fn permissive_policy_takes_the_default_response_on_pending() {
    let store: FetchStore<String> =
        FetchStore::with_policy(ReducerPolicy::default().with_status(Status::Pending));
    store.register("GREETING", String::new());

    let (tx, rx) = tokio::sync::oneshot::channel();
    kickoff(
        "GREETING",
        fetch_greeting("policy"),
        RunOptions::formatted(|greeting: Greeting| greeting.message)
            .with_default_response(Greeting {
                message: "placeholder".to_string(),
            })
            .on_pending(move |store: &FetchStore<String>, _seed| {
                // The pending event has been reduced by the time the
                // continuation runs, so the placeholder is visible.
                let _ = tx.send(store.state("GREETING").map(|s| s.data));
            }),
    )
    .call(store.clone());

    let seen = tokio::time::timeout(Duration::from_secs(1), rx).await;
    assert_eq!(
        seen.ok().and_then(Result::ok),
        Some(Ok("placeholder".to_string()))
    );

    let slice = settled(&store, "GREETING").await;
    assert_eq!(slice.data, "hello, policy");
}

#[tokio::test]
async fn concurrent_kinds_settle_independently() {
    let store: FetchStore<String> = FetchStore::new();
    store.register("GREETING", String::new());
    store.register("FLAKY", String::new());

    kickoff(
        "GREETING",
        fetch_greeting("many"),
        RunOptions::formatted(|greeting: Greeting| greeting.message),
    )
    .call(store.clone());
    kickoff(
        "FLAKY",
        flaky_greeting(),
        RunOptions::formatted(|greeting: Greeting| greeting.message)
            .with_report(Report::silent()),
    )
    .call(store.clone());

    let greeting = settled(&store, "GREETING").await;
    let flaky = settled(&store, "FLAKY").await;

    assert!(greeting.is_success());
    assert!(flaky.failure().failed);
}

#[tokio::test]
async fn chained_runs_can_kick_off_from_a_continuation() {
    let store: FetchStore<String> = FetchStore::new();
    store.register("FIRST", String::new());
    store.register("SECOND", String::new());

    kickoff(
        "FIRST",
        fetch_greeting("one"),
        RunOptions::formatted(|greeting: Greeting| greeting.message).on_success(
            |store: &FetchStore<String>, _message| {
                // Chain a dependent operation off the success event.
                kickoff(
                    "SECOND",
                    fetch_greeting("two"),
                    RunOptions::formatted(|greeting: Greeting| greeting.message),
                )
                .call(store.clone());
            },
        ),
    )
    .call(store.clone());

    let second = settled(&store, "SECOND").await;
    assert_eq!(second.data, "hello, two");
}
