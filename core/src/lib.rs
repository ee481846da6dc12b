//! # Conduit Core
//!
//! Core traits and types for the Conduit client.
//!
//! The client is organised as a unidirectional loop:
//!
//! - **State**: everything the UI needs (session, view state, loaded page)
//! - **Action**: every input (navigation events, user intents, fetch results)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of I/O to perform, never the I/O itself
//! - **Environment**: injected collaborators (REST API, durable storage,
//!   location bar)
//!
//! Reducers never touch the network. They return [`effect::Effect`] values
//! and the runtime executes them, feeding any resulting action back into the
//! reducer.
//!
//! ## Example
//!
//! ```ignore
//! use conduit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for RouterReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = AppEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut AppState,
//!         action: AppAction,
//!         env: &AppEnvironment,
//!     ) -> SmallVec<[Effect<AppAction>; 4]> {
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the single place where state changes
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They may read synchronous collaborators from the environment (storage,
/// location), but anything asynchronous goes through an [`Effect`](crate::effect::Effect).
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for client logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns descriptions of the side
        /// effects the runtime should perform next.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values. The runtime decides when and where they run.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Run effects in order, each one completing before the next starts
        Sequential(Vec<Effect<Action>>),

        /// Dispatch an action after a delay (alert dismissal)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// If the future yields `Some(action)`, the action is fed back into the reducer.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Futures are opaque, so Debug is written by hand.
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async block producing an optional follow-up action
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - collaborator traits
///
/// All external dependencies the reducers touch synchronously are abstracted
/// here. The REST API lives in `conduit-api` because its operations are async
/// and only ever run inside effects.
pub mod environment {
    use std::sync::{Arc, Mutex, PoisonError};
    use thiserror::Error;

    /// Errors raised by durable storage backends
    #[derive(Debug, Error)]
    pub enum StorageError {
        /// The backing medium could not be read or written
        #[error("storage I/O failed: {0}")]
        Io(String),

        /// The stored data could not be decoded
        #[error("storage data is corrupt: {0}")]
        Corrupt(String),
    }

    /// Durable key-value storage
    ///
    /// The client only ever stores the auth token, under a fixed key.
    pub trait DurableStorage: Send + Sync {
        /// Read a value
        fn get(&self, key: &str) -> Option<String>;

        /// Write a value
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the value could not be persisted.
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

        /// Remove a value; removing a missing key is not an error
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the backing medium could not be updated.
        fn remove(&self, key: &str) -> Result<(), StorageError>;
    }

    /// The location bar: the sole client-side routing signal
    ///
    /// Change events are delivered to the store as actions by whoever owns
    /// the real location mechanism; this trait only reads and writes it.
    pub trait LocationBar: Send + Sync {
        /// Current location string (e.g. `/article/how-to-train`)
        fn current(&self) -> String;

        /// Replace the current location
        fn set(&self, location: &str);
    }

    /// In-memory location bar
    ///
    /// Used by the terminal shell and by tests. Every write is recorded so
    /// redirects can be asserted on.
    #[derive(Debug, Clone)]
    pub struct MemoryLocation {
        inner: Arc<Mutex<LocationLog>>,
    }

    #[derive(Debug)]
    struct LocationLog {
        current: String,
        history: Vec<String>,
    }

    impl MemoryLocation {
        /// Create a location bar pointing at `initial`
        #[must_use]
        pub fn new(initial: impl Into<String>) -> Self {
            let initial = initial.into();
            Self {
                inner: Arc::new(Mutex::new(LocationLog {
                    current: initial.clone(),
                    history: vec![initial],
                })),
            }
        }

        /// Every location ever held, oldest first
        #[must_use]
        pub fn history(&self) -> Vec<String> {
            self.inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .history
                .clone()
        }
    }

    impl Default for MemoryLocation {
        fn default() -> Self {
            Self::new("/")
        }
    }

    impl LocationBar for MemoryLocation {
        fn current(&self) -> String {
            self.inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .current
                .clone()
        }

        fn set(&self, location: &str) {
            let mut log = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            log.current = location.to_string();
            log.history.push(location.to_string());
        }
    }
}
