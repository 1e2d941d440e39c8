//! Reducer logic for the todo widget.
//!
//! Holds both controllers: the item store (add, toggle, delete, clear
//! completed) and the input buffer (set text, commit, key presses).
//! Invalid input is rejected silently; rejections are only logged.

use crate::types::{Key, TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_widget_core::{
    SmallVec, effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec,
};

/// Environment dependencies for the Todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of fresh item ids
    pub ids: Arc<dyn IdGenerator>,
    /// Key that commits the input buffer
    pub commit_key: Key,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` that commits on Enter
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            commit_key: Key::Enter,
        }
    }

    /// Use a different commit key
    #[must_use]
    pub fn with_commit_key(mut self, key: Key) -> Self {
        self.commit_key = key;
        self
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("commit_key", &self.commit_key)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo widget
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends an item and clears the buffer, unless the text is blank
    fn add_todo(state: &mut TodoState, text: String, env: &TodoEnvironment) {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank todo text");
            return;
        }

        let id = TodoId::new(env.ids.next_id());
        if state.exists(id) {
            tracing::warn!(%id, "Id generator returned an id already in use, dropping add");
            return;
        }

        tracing::debug!(%id, "Todo added");
        state.items.push(TodoItem::new(id, text));
        state.input.clear();
    }

    fn toggle_todo(state: &mut TodoState, id: TodoId) {
        match state.items.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.toggle();
                tracing::debug!(%id, completed = todo.completed, "Todo toggled");
            },
            None => tracing::debug!(%id, "Toggle for unknown todo ignored"),
        }
    }

    fn delete_todo(state: &mut TodoState, id: TodoId) {
        let before = state.items.len();
        state.items.retain(|t| t.id != id);
        if state.items.len() < before {
            tracing::debug!(%id, "Todo deleted");
        } else {
            tracing::debug!(%id, "Delete for unknown todo ignored");
        }
    }

    fn clear_completed(state: &mut TodoState) {
        let before = state.items.len();
        state.items.retain(|t| !t.completed);
        tracing::debug!(removed = before - state.items.len(), "Cleared completed todos");
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Input buffer ==========
            TodoAction::SetText { text } => {
                state.input = text;
                SmallVec::new()
            },

            TodoAction::Commit => {
                // The buffer is only cleared once the add succeeds
                smallvec![Effect::send(TodoAction::AddTodo {
                    text: state.input.clone(),
                })]
            },

            TodoAction::KeyPressed { key } if key == env.commit_key => {
                smallvec![Effect::send(TodoAction::Commit)]
            },

            TodoAction::KeyPressed { .. } => SmallVec::new(),

            // ========== Item store ==========
            TodoAction::AddTodo { text } => {
                Self::add_todo(state, text, env);
                SmallVec::new()
            },

            TodoAction::ToggleTodo { id } => {
                Self::toggle_todo(state, id);
                SmallVec::new()
            },

            TodoAction::DeleteTodo { id } => {
                Self::delete_todo(state, id);
                SmallVec::new()
            },

            TodoAction::ClearCompleted => {
                Self::clear_completed(state);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_widget_testing::{ReducerTest, ScriptedIdGenerator, assertions, test_ids};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(test_ids())
    }

    fn state_with(items: &[(u64, &str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for &(id, text, completed) in items {
            state.items.push(TodoItem {
                id: TodoId::new(id),
                text: text.to_string(),
                completed,
            });
        }
        state
    }

    fn texts(state: &TodoState) -> Vec<&str> {
        state.items.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_todo_success() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                text: "Buy milk".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                let todo = &state.items[0];
                assert_eq!(todo.id, TodoId::new(1));
                assert_eq!(todo.text, "Buy milk");
                assert!(!todo.completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_todo_keeps_untrimmed_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                text: "  padded  ".to_string(),
            })
            .then_state(|state| assert_eq!(texts(state), vec!["  padded  "]))
            .run();
    }

    #[test]
    fn test_add_todo_blank_text_is_ignored() {
        for blank in ["", "   ", "\t\n"] {
            ReducerTest::new(TodoReducer::new())
                .with_env(create_test_env())
                .given_state(TodoState {
                    input: blank.to_string(),
                    ..TodoState::new()
                })
                .when_action(TodoAction::AddTodo {
                    text: blank.to_string(),
                })
                .then_state(move |state| {
                    assert_eq!(state.count(), 0);
                    assert_eq!(state.input, blank);
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn test_add_todo_appends_at_end_and_clears_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new(Arc::new(ScriptedIdGenerator::new([5]))))
            .given_state(TodoState {
                input: "Walk dog".to_string(),
                ..state_with(&[(1, "Buy milk", false)])
            })
            .when_action(TodoAction::AddTodo {
                text: "Walk dog".to_string(),
            })
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Buy milk", "Walk dog"]);
                assert_eq!(state.items[1].id, TodoId::new(5));
                assert!(state.input.is_empty());
            })
            .run();
    }

    #[test]
    fn test_add_todo_colliding_id_is_rejected() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::new(Arc::new(ScriptedIdGenerator::new([1]))))
            .given_state(TodoState {
                input: "Duplicate".to_string(),
                ..state_with(&[(1, "Existing", false)])
            })
            .when_action(TodoAction::AddTodo {
                text: "Duplicate".to_string(),
            })
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Existing"]);
                assert_eq!(state.input, "Duplicate");
            })
            .run();
    }

    #[test]
    fn test_set_text_is_verbatim() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::SetText {
                text: "  Typing test ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.input, "  Typing test ");
                assert_eq!(state.count(), 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_commit_sends_add_with_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState {
                input: "Test todo".to_string(),
                ..TodoState::new()
            })
            .when_action(TodoAction::Commit)
            .then_state(|state| assert_eq!(state.count(), 0))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_sends(
                    effects,
                    &TodoAction::AddTodo {
                        text: "Test todo".to_string(),
                    },
                );
            })
            .run();
    }

    #[test]
    fn test_commit_adds_and_clears_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .with_feedback()
            .given_state(TodoState::new())
            .when_action(TodoAction::SetText {
                text: "Test todo".to_string(),
            })
            .when_action(TodoAction::Commit)
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Test todo"]);
                assert!(state.input.is_empty());
            })
            .run();
    }

    #[test]
    fn test_commit_blank_buffer_leaves_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .with_feedback()
            .given_state(TodoState {
                input: "   ".to_string(),
                ..TodoState::new()
            })
            .when_action(TodoAction::Commit)
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.input, "   ");
            })
            .run();
    }

    #[test]
    fn test_commit_key_commits() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .with_feedback()
            .given_state(TodoState {
                input: "Test".to_string(),
                ..TodoState::new()
            })
            .when_action(TodoAction::KeyPressed { key: Key::Enter })
            .then_state(|state| {
                assert_eq!(texts(state), vec!["Test"]);
                assert!(state.input.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_sends(effects, &TodoAction::Commit);
            })
            .run();
    }

    #[test]
    fn test_other_keys_are_ignored() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .with_feedback()
            .given_state(TodoState {
                input: "Test".to_string(),
                ..TodoState::new()
            })
            .when_actions([
                TodoAction::KeyPressed { key: Key::Escape },
                TodoAction::KeyPressed { key: Key::Char('a') },
            ])
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.input, "Test");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_custom_commit_key() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env().with_commit_key(Key::Tab))
            .with_feedback()
            .given_state(TodoState {
                input: "Test".to_string(),
                ..TodoState::new()
            })
            .when_actions([
                TodoAction::KeyPressed { key: Key::Enter },
                TodoAction::KeyPressed { key: Key::Tab },
            ])
            .then_state(|state| assert_eq!(texts(state), vec!["Test"]))
            .run();
    }

    #[test]
    fn test_toggle_todo_twice_restores() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "a", false), (2, "b", false)]))
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(2) })
            .then_state(|state| {
                assert!(!state.items[0].completed);
                assert!(state.items[1].completed);
            })
            .run();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "a", true)]))
            .when_actions([
                TodoAction::ToggleTodo { id: TodoId::new(1) },
                TodoAction::ToggleTodo { id: TodoId::new(1) },
            ])
            .then_state(|state| assert!(state.items[0].completed))
            .run();
    }

    #[test]
    fn test_toggle_unknown_todo_is_noop() {
        let initial = state_with(&[(1, "a", false)]);
        let expected = initial.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(initial)
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(99) })
            .then_state(move |state| assert_eq!(*state, expected))
            .run();
    }

    #[test]
    fn test_delete_todo_success() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "a", false), (2, "b", true), (3, "c", false)]))
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(2) })
            .then_state(|state| {
                assert_eq!(texts(state), vec!["a", "c"]);
                assert!(!state.exists(TodoId::new(2)));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_unknown_todo_is_noop() {
        let initial = state_with(&[(1, "a", false)]);
        let expected = initial.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(initial)
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(7) })
            .then_state(move |state| assert_eq!(*state, expected))
            .run();
    }

    #[test]
    fn test_clear_completed_keeps_active_in_order() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[
                (1, "a", true),
                (2, "b", false),
                (3, "c", true),
                (4, "d", false),
            ]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert_eq!(texts(state), vec!["b", "d"]);
                assert_eq!(state.completed_count(), 0);
            })
            .run();
    }

    #[test]
    fn test_clear_completed_with_nothing_completed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "a", false)]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| assert_eq!(texts(state), vec!["a"]))
            .run();
    }
}
