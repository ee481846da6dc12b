//! Given-When-Then harness for reducers
//!
//! Runs a reducer synchronously against an explicit state and environment.
//! Effects are returned untouched so assertions can inspect what the reducer
//! asked for without executing any I/O.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use conduit_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several actions may be given; they are reduced in order and the effect
/// assertions see the effects of the **last** one only.
///
/// # Example
///
/// ```ignore
/// use conduit_testing::ReducerTest;
///
/// ReducerTest::new(AppReducer::new())
///     .with_env(environment)
///     .given_state(AppState::new(10))
///     .when_action(AppAction::LocationChanged { location: "/nowhere".into() })
///     .then_state(|state| assert_eq!(state.route, Route::Home))
///     .then_effects(|effects| assert_has_future_effect(effects))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Append an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state or environment is not set, if no action was
    /// given, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use conduit_core::effect::Effect;

    fn flatten<A>(effects: &[Effect<A>]) -> Vec<&Effect<A>> {
        let mut flat = Vec::new();
        for effect in effects {
            match effect {
                Effect::Parallel(children) | Effect::Sequential(children) => {
                    flat.extend(flatten(children));
                },
                other => flat.push(other),
            }
        }
        flat
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than [`Effect::None`] is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            flatten(effects).iter().all(|effect| effect.is_none()),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of top-level effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Count the futures, looking inside parallel and sequential groups
    #[must_use]
    pub fn count_future_effects<A>(effects: &[Effect<A>]) -> usize {
        flatten(effects)
            .iter()
            .filter(|effect| matches!(effect, Effect::Future(_)))
            .count()
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            count_future_effects(effects) > 0,
            "Expected at least one Future effect, but none found"
        );
    }

    /// The action scheduled by the first `Delay` effect, if any
    #[must_use]
    pub fn delayed_action<A>(effects: &[Effect<A>]) -> Option<&A> {
        flatten(effects).into_iter().find_map(|effect| match effect {
            Effect::Delay { action, .. } => Some(action.as_ref()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::{
        assert_effects_count, assert_has_future_effect, assert_no_effects, count_future_effects,
        delayed_action,
    };
    use super::*;
    use conduit_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct Tally {
        total: u32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TallyAction {
        Add(u32),
        AddLater(u32),
        Flush,
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = Tally;
        type Action = TallyAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TallyAction::Add(n) => {
                    state.total += n;
                    smallvec![Effect::None]
                },
                TallyAction::AddLater(n) => smallvec![Effect::Delay {
                    duration: Duration::from_millis(5),
                    action: Box::new(TallyAction::Add(n)),
                }],
                TallyAction::Flush => smallvec![Effect::merge(vec![
                    Effect::future(async { None }),
                    Effect::chain(vec![Effect::future(async { None })]),
                ])],
            }
        }
    }

    #[test]
    fn actions_are_reduced_in_order() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Tally::default())
            .when_action(TallyAction::Add(2))
            .when_action(TallyAction::Add(3))
            .then_state(|state| assert_eq!(state.total, 5))
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn delayed_action_is_found() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Tally::default())
            .when_action(TallyAction::AddLater(4))
            .then_state(|state| assert_eq!(state.total, 0))
            .then_effects(|effects| {
                assert_eq!(delayed_action(effects), Some(&TallyAction::Add(4)));
            })
            .run();
    }

    #[test]
    fn nested_futures_are_counted() {
        ReducerTest::new(TallyReducer)
            .with_env(())
            .given_state(Tally::default())
            .when_action(TallyAction::Flush)
            .then_effects(|effects| {
                assert_effects_count(effects, 1);
                assert_has_future_effect(effects);
                assert_eq!(count_future_effects(effects), 2);
            })
            .run();
    }
}
