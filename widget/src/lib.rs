//! A todo-list widget built on the reducer/store architecture.
//!
//! The widget is a form to add text items, a list of items with completion
//! toggles and per-item delete, aggregate counters, and a "clear completed"
//! action. All state lives in memory for the lifetime of one [`TodoStore`].
//!
//! - [`types`]: items, state, actions
//! - [`reducer`]: the item store and input buffer controllers
//! - [`view`]: the render/derive layer
//! - [`input`]: terminal gestures mapped to actions
//! - [`terminal`]: the line-driven terminal session
//! - [`config`]: environment-driven settings
//!
//! # Quick Start
//!
//! ```
//! use todo_widget::{TodoAction, TodoView, config::WidgetConfig, new_store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = new_store(&WidgetConfig::default());
//!
//! store.send(TodoAction::SetText { text: "Buy milk".to_string() }).await?;
//! store.send(TodoAction::Commit).await?;
//!
//! let view = store.state(TodoView::render).await;
//! assert_eq!(view.counts.total, 1);
//! assert_eq!(view.rows[0].text, "Buy milk");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod input;
pub mod reducer;
pub mod terminal;
pub mod types;
pub mod view;

use std::sync::Arc;
use todo_widget_core::environment::SequentialIdGenerator;
use todo_widget_runtime::Store;

// Re-export commonly used types
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Counts, Key, TodoAction, TodoId, TodoItem, TodoState};
pub use view::TodoView;

/// Store type driving the widget
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Create an empty widget store for the given configuration
#[must_use]
pub fn new_store(config: &config::WidgetConfig) -> TodoStore {
    let env = TodoEnvironment::new(Arc::new(SequentialIdGenerator::new()))
        .with_commit_key(config.commit_key);
    Store::new(TodoState::new(), TodoReducer::new(), env)
}
