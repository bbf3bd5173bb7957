//! Ergonomic testing utilities for the lifecycle reducer
//!
//! This module provides a fluent API for testing reductions with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReduceTest is the natural name

use kickoff_core::{LifecycleEvent, ReducerPolicy, State, reduce};

/// Type alias for state assertion functions
type StateAssertion<T> = Box<dyn FnOnce(&State<T>)>;

/// Fluent API for testing reductions with Given-When-Then syntax
///
/// # Example
///
/// ```
/// use kickoff_core::{LifecycleEvent, State, Status};
/// use kickoff_testing::ReduceTest;
///
/// ReduceTest::new()
///     .given_state(State::new(0))
///     .when_event(LifecycleEvent::success("FETCH", 42))
///     .then_state(|state| {
///         assert_eq!(state.data, 42);
///         assert_eq!(state.status, Status::Success);
///     })
///     .run();
/// ```
pub struct ReduceTest<T> {
    policy: ReducerPolicy,
    initial_state: Option<State<T>>,
    event: Option<LifecycleEvent<T>>,
    state_assertions: Vec<StateAssertion<T>>,
}

impl<T: Clone> ReduceTest<T> {
    /// Create a new reduce test under the default policy
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: ReducerPolicy::default(),
            initial_state: None,
            event: None,
            state_assertions: Vec::new(),
        }
    }

    /// Override the reducer policy for this test
    #[must_use]
    pub fn with_policy(mut self, policy: ReducerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the initial snapshot (Given)
    #[must_use]
    pub fn given_state(mut self, state: State<T>) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the initial snapshot from a seed payload (Given)
    #[must_use]
    pub fn given_seed(self, seed: T) -> Self {
        self.given_state(State::new(seed))
    }

    /// Set the event to fold in (When)
    #[must_use]
    pub fn when_event(mut self, event: LifecycleEvent<T>) -> Self {
        self.event = Some(event);
        self
    }

    /// Add an assertion about the resulting snapshot (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&State<T>) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Run the reduction and execute all assertions
    ///
    /// Also checks the reduction left its inputs untouched and is
    /// repeatable: folding the same event twice must produce structurally
    /// equal snapshots.
    ///
    /// # Panics
    ///
    /// Panics if the initial state or event is not set, or if any
    /// assertion fails.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self)
    where
        T: PartialEq + std::fmt::Debug,
    {
        let state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let event = self.event.expect("Event must be set with when_event()");

        let next = reduce(&state, &event, &self.policy);
        let again = reduce(&state, &event, &self.policy);
        assert_eq!(next, again, "reduce must be referentially transparent");

        for assertion in self.state_assertions {
            assertion(&next);
        }
    }
}

impl<T: Clone> Default for ReduceTest<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::Status;

    #[test]
    fn reduce_test_runs_assertions_against_the_new_snapshot() {
        ReduceTest::new()
            .given_seed(0)
            .when_event(LifecycleEvent::fail("K", Some(5), "boom"))
            .then_state(|state| {
                assert_eq!(state.data, 0);
                assert_eq!(state.status, Status::Fail);
                assert_eq!(state.error.as_deref(), Some("boom"));
            })
            .run();
    }

    #[test]
    fn reduce_test_honors_a_custom_policy() {
        ReduceTest::new()
            .with_policy(ReducerPolicy::change_data_on([Status::Fail]))
            .given_seed(1)
            .when_event(LifecycleEvent::fail("K", Some(9), "nope"))
            .then_state(|state| assert_eq!(state.data, 9))
            .run();
    }

    #[test]
    #[should_panic(expected = "Initial state must be set")]
    fn reduce_test_requires_an_initial_state() {
        ReduceTest::<i32>::new()
            .when_event(LifecycleEvent::success("K", 1))
            .run();
    }
}
