//! # Conduit Runtime
//!
//! The Store runtime coordinating reducer execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: owns the state behind a single lock and runs the reducer
//! - **Effect Executor**: executes effect descriptions and feeds actions back
//! - **Settling**: callers can wait until every spawned effect has finished
//!
//! ## Example
//!
//! ```ignore
//! use conduit_runtime::Store;
//!
//! let store = Store::new(AppState::new(10), AppReducer::new(), environment);
//!
//! store.send(AppAction::LocationChanged { location: "/".into() }).await?;
//! store.settle().await;
//!
//! let offset = store.state(|s| s.view.page_offset).await;
//! ```

use conduit_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Waiting for effects to settle took longer than allowed
        #[error("Timed out waiting for {0} effects to settle")]
        Timeout(usize),
    }
}

pub use error::StoreError;
pub use store::Store;

/// Global count of running effects, shared by every handle of one store
struct PendingEffects {
    count: AtomicUsize,
    idle: watch::Sender<()>,
}

impl PendingEffects {
    fn new() -> Self {
        let (idle, _) = watch::channel(());
        Self {
            count: AtomicUsize::new(0),
            idle,
        }
    }

    fn load(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Wait until the count reaches zero
    async fn wait_idle(&self) {
        // Subscribe before reading the counter so no notification is lost.
        let mut idle = self.idle.subscribe();
        while self.load() > 0 {
            if idle.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Handle for tracking the effects spawned directly by one action
///
/// Returned by [`Store::send`]. Follow-up actions produced by those effects
/// get their own handles; use [`Store::settle`] to wait for the whole cascade.
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new(pending: &Arc<PendingEffects>) -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
            pending: Arc::clone(pending),
            hold_timers: false,
        };

        (handle, tracking)
    }

    /// Number of direct effects still running
    #[must_use]
    pub fn running(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for this action's direct effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("running", &self.running())
            .finish()
    }
}

/// Internal: tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
    pending: Arc<PendingEffects>,
    /// Count `Delay` timers too; set for the steps of a `Sequential`
    hold_timers: bool,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
        self.pending.count.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
        if self.pending.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.pending.idle.send(());
        }
    }
}

/// Internal: RAII guard that decrements effect counters on drop
///
/// Runs even if the effect task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, Duration, Effect, EffectHandle, EffectTracking, DecrementGuard, Ordering,
        PendingEffects, Reducer, RwLock, StoreError,
    };
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind one `RwLock`; every reducer run holds the write lock,
    ///    so state has exactly one writer at a time)
    /// 2. Reducer (client logic)
    /// 3. Environment (injected collaborators)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending: Arc<PendingEffects>,
        /// Every action produced by an effect is broadcast here before it is
        /// fed back, so observers (the shell, tests) can follow the loop.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 64)
        }

        /// Create a store with a custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending: Arc::new(PendingEffects::new()),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the write lock, then starts the returned
        /// effects. Returns as soon as the effects are started.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::warn!(?action, "Rejecting action, store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("conduit.store.actions").increment(1);
            tracing::trace!(?action, "Reducing action");

            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.environment)
            };

            let (handle, tracking) = EffectHandle::new(&self.pending);
            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Read state through a closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to actions produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Number of effects currently running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending.load()
        }

        /// Wait until no effect is running
        ///
        /// Follow-up actions start their effects before the effect that
        /// produced them finishes, so this covers the whole cascade. Pending
        /// [`Effect::Delay`] timers are not waited for unless they are a step
        /// of an [`Effect::Sequential`].
        pub async fn settle(&self) {
            self.pending.wait_idle().await;
        }

        /// [`settle`](Self::settle) with an upper bound
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Timeout`] with the number of effects still
        /// running when the timeout elapses.
        pub async fn settle_with_timeout(&self, timeout: Duration) -> Result<(), StoreError> {
            tokio::time::timeout(timeout, self.settle())
                .await
                .map_err(|_| StoreError::Timeout(self.pending.load()))
        }

        /// Stop accepting actions and wait for running effects
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still
        /// running after `timeout`.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Store shutdown requested");
            self.shutdown.store(true, Ordering::SeqCst);

            tokio::time::timeout(timeout, self.pending.wait_idle())
                .await
                .map_err(|_| {
                    let remaining = self.pending.load();
                    tracing::warn!(remaining, "Shutdown timed out");
                    StoreError::ShutdownTimeout(remaining)
                })
        }

        /// Feed an effect-produced action back into the store
        async fn feedback(&self, action: A) {
            let _ = self.action_broadcast.send(action.clone());
            if let Err(error) = self.send(action).await {
                tracing::debug!(%error, "Dropped effect feedback action");
            }
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: no-op
        /// - `Future`: spawned; a resulting action is fed back
        /// - `Delay`: sleeps, then feeds the action back. Spawned untracked so
        ///   timers never hold up [`settle`](Self::settle) or shutdown, except
        ///   inside a `Sequential` step, where the next step waits for it.
        /// - `Parallel`: every child started immediately
        /// - `Sequential`: children started one at a time, each awaited
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("conduit.store.effects", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("conduit.store.effects", "type" => "future").increment(1);
                    tracking.increment();
                    let guard = DecrementGuard(tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        if let Some(action) = fut.await {
                            store.feedback(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    metrics::counter!("conduit.store.effects", "type" => "delay").increment(1);
                    let guard = tracking.hold_timers.then(|| {
                        tracking.increment();
                        DecrementGuard(tracking)
                    });
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        tokio::time::sleep(duration).await;
                        store.feedback(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("conduit.store.effects", "type" => "parallel").increment(1);
                    for effect in effects {
                        self.execute_effect(effect, tracking.clone());
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("conduit.store.effects", "type" => "sequential")
                        .increment(1);
                    tracking.increment();
                    let guard = DecrementGuard(tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        for effect in effects {
                            let (mut step, mut step_tracking) =
                                EffectHandle::new(&store.pending);
                            step_tracking.hold_timers = true;
                            store.execute_effect(effect, step_tracking);
                            step.wait().await;
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending: Arc::clone(&self.pending),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}
