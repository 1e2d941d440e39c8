//! # Todo Widget Core
//!
//! Core traits and types shared by the todo widget crates.
//!
//! The widget follows the reducer pattern: every user interaction becomes an
//! action, a reducer folds the action into state, and any follow-up work is
//! described as an [`effect::Effect`] for the runtime to carry out.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a single store
//! - **Action**: Every input the reducer understands (user intents)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of follow-up work (never executed here)
//! - **Environment**: Injected dependencies, such as the id source
//!
//! ## Example
//!
//! ```
//! use todo_widget_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Debug, Default)]
//! struct Clicks {
//!     count: u32,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum ClickAction {
//!     Click,
//! }
//!
//! struct ClickReducer;
//!
//! impl Reducer for ClickReducer {
//!     type State = Clicks;
//!     type Action = ClickAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Clicks,
//!         action: ClickAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ClickAction>; 4]> {
//!         match action {
//!             ClickAction::Click => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Clicks::default();
//! ClickReducer.reduce(&mut state, ClickAction::Click, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all widget logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
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
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most reducers return at most a handful of effects, so the
        /// result is stack-allocated for up to four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe follow-up work for the runtime. They are values, not
/// execution: a reducer returns them and the store decides when to run them.
pub mod effect {
    /// Effect type - describes follow-up work for the runtime
    ///
    /// The widget has no I/O, so the only follow-up a reducer can ask for is
    /// feeding another action back into itself within the same dispatch.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer before the dispatch completes
        Send(Box<Action>),

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Wrap an action as a feedback effect
        #[must_use]
        pub fn send(action: Action) -> Self {
            Self::Send(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Returns `true` if this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Self::None => true,
                Self::Send(_) => false,
                Self::Sequential(effects) => effects.iter().all(Self::is_none),
            }
        }

        /// Flatten into the actions this effect feeds back, in execution order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            match self {
                Self::None => Vec::new(),
                Self::Send(action) => vec![*action],
                Self::Sequential(effects) => {
                    effects.into_iter().flat_map(Self::into_actions).collect()
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Source of item identifiers
    ///
    /// Implementations must never hand out the same value twice for the
    /// lifetime of one store.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_widget_core::environment::{IdGenerator, SequentialIdGenerator};
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), 1);
    /// assert_eq!(ids.next_id(), 2);
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> u64;
    }

    /// Production id source: a monotonically increasing counter
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Create a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::Relaxed)
        }
    }
}
