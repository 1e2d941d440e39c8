//! # Todo Widget Runtime
//!
//! Runtime for the todo widget.
//!
//! This crate provides the [`Store`] that owns widget state and coordinates
//! reducer execution with effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; the only writer of state
//! - **Feedback loop**: Actions produced by `Effect::Send` are reduced in
//!   the same dispatch, before anyone can observe the state
//! - **Render revision**: A counter published after every dispatch so a view
//!   layer knows when to re-derive
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_widget_core::reducer::Reducer;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// These are structural failures of the runtime itself. Widget-level
    /// rejections (blank input, unknown ids) never show up here.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A reducer kept feeding actions back into itself
        ///
        /// The dispatch was cut off after the configured number of
        /// feedback actions. State is left as it was before the dispatch.
        #[error("Feedback loop exceeded {0} actions")]
        FeedbackDepthExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use todo_widget_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_depth(8);
/// assert_eq!(config.max_feedback_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of effect-produced actions reduced per `send`
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_depth: usize) -> Self {
        Self { max_feedback_depth }
    }

    /// Set the feedback depth limit
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        AtomicBool, Ordering, Reducer, RwLock, StoreConfig, StoreError, VecDeque, watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the store is its only writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (feedback actions, reduced under the same lock)
    /// 5. Render revision (bumped once per dispatch)
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
        state: RwLock<S>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: AtomicBool,
        revision: watch::Sender<u64>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default()`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (revision, _) = watch::channel(0);

            Self {
                state: RwLock::new(initial_state),
                reducer,
                environment,
                config,
                shutdown: AtomicBool::new(false),
                revision,
            }
        }

        /// Send an action to the store
        ///
        /// The action is reduced under the state write lock. Every action fed
        /// back through `Effect::Send` is reduced in order before the lock
        /// is released, so readers only ever see the state from before or
        /// after the whole dispatch. The chain runs against a draft that
        /// replaces the state only if it completes. The render revision is
        /// bumped once the lock is released.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if `shutdown()` was called.
        /// - [`StoreError::FeedbackDepthExceeded`] if the reducer fed back more
        ///   actions than [`StoreConfig::max_feedback_depth`] allows.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let result = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");
                let mut draft = (*state).clone();
                let result = self.run_feedback_loop(&mut draft, action);
                if result.is_ok() {
                    *state = draft;
                }
                result
            };

            self.revision.send_modify(|revision| *revision += 1);
            tracing::trace!(revision = *self.revision.borrow(), "Published render revision");

            result
        }

        fn run_feedback_loop(&self, state: &mut S, action: A) -> Result<(), StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut fed_back = 0_usize;

            while let Some(action) = queue.pop_front() {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let effects = self.reducer.reduce(state, action, &self.environment);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    for next in effect.into_actions() {
                        fed_back += 1;
                        if fed_back > self.config.max_feedback_depth {
                            tracing::error!(
                                limit = self.config.max_feedback_depth,
                                "Feedback loop limit reached, discarding the dispatch"
                            );
                            metrics::counter!("store.feedback.overflow").increment(1);
                            return Err(StoreError::FeedbackDepthExceeded(
                                self.config.max_feedback_depth,
                            ));
                        }
                        tracing::trace!(action = ?next, "Queued feedback action");
                        queue.push_back(next);
                    }
                }
            }

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let total = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to render revisions
        ///
        /// The receiver sees a change after every dispatch, including
        /// dispatches whose actions were rejected by the reducer.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.revision.subscribe()
        }

        /// Current render revision (number of completed dispatches)
        #[must_use]
        pub fn revision(&self) -> u64 {
            *self.revision.borrow()
        }

        /// Stop accepting actions
        ///
        /// State stays readable after shutdown.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns `true` once `shutdown()` has been called
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("revision", &*self.revision.borrow())
                .field("shutdown", &self.shutdown.load(Ordering::Relaxed))
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;
