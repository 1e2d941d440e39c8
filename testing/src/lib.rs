//! # Todo Widget Testing
//!
//! Testing utilities and helpers for the todo widget.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_testing::{ReducerTest, test_ids};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(test_ids()))
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddTodo { text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.count(), 1))
//!     .run();
//! ```

use std::sync::Arc;
use todo_widget_core::environment::{IdGenerator, SequentialIdGenerator};


/// Mock implementations of Environment traits
pub mod mocks {
    use super::IdGenerator;
    use std::sync::{Mutex, PoisonError};

    /// Id generator that replays a fixed script of ids
    ///
    /// Once the script runs out the last id repeats, which makes it easy to
    /// provoke id collisions on purpose.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_widget_testing::mocks::ScriptedIdGenerator;
    /// use todo_widget_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIdGenerator::new([7, 9]);
    /// assert_eq!(ids.next_id(), 7);
    /// assert_eq!(ids.next_id(), 9);
    /// assert_eq!(ids.next_id(), 9);
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Mutex<(Vec<u64>, usize)>,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that hands out `ids` in order
        #[must_use]
        pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
            Self {
                script: Mutex::new((ids.into_iter().collect(), 0)),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> u64 {
            let mut guard = self.script.lock().unwrap_or_else(PoisonError::into_inner);
            let (ids, cursor) = &mut *guard;
            let id = ids
                .get(*cursor)
                .or_else(|| ids.last())
                .copied()
                .unwrap_or_default();
            *cursor += 1;
            id
        }
    }

}

/// Fresh sequential id source for tests (first id is 1)
#[must_use]
pub fn test_ids() -> Arc<dyn IdGenerator> {
    Arc::new(SequentialIdGenerator::new())
}

// Re-export commonly used items
pub use mocks::ScriptedIdGenerator;
pub use reducer_test::{ReducerTest, assertions};
