//! Render/derive layer.
//!
//! [`TodoView::render`] is a pure function of [`TodoState`]: it never caches
//! anything, so calling it after every dispatch always yields a view that
//! matches the item list exactly.

use crate::types::{Counts, TodoId, TodoState};
use serde::Serialize;
use std::fmt;

/// Heading shown above the widget
pub const TITLE: &str = "My Todo List";
/// Placeholder prompt of the text field
pub const PLACEHOLDER: &str = "What needs to be done?";
/// Label of the commit control
pub const ADD_LABEL: &str = "Add";
/// Accessible label of every per-item delete control
pub const DELETE_LABEL: &str = "Delete todo";
/// Message shown when there are no items
pub const EMPTY_STATE: &str = "No todos yet! Add one above to get started.";

/// The text field and its current contents
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputView {
    /// Placeholder prompt
    pub placeholder: &'static str,
    /// Current buffer, verbatim
    pub value: String,
}

/// One rendered item row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoRow {
    /// Item the row's controls act on
    pub id: TodoId,
    /// Item text, verbatim
    pub text: String,
    /// Checkbox state
    pub completed: bool,
    /// Accessible label of the delete control
    pub delete_label: &'static str,
}

/// The "Clear Completed (N)" control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClearCompletedView {
    /// Number of completed items it would remove
    pub count: usize,
}

impl ClearCompletedView {
    /// Control label
    #[must_use]
    pub fn label(&self) -> String {
        format!("Clear Completed ({})", self.count)
    }
}

/// Snapshot of everything the widget shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoView {
    /// Heading
    pub title: &'static str,
    /// Text field
    pub input: InputView,
    /// Commit control label
    pub add_label: &'static str,
    /// Aggregate counters
    pub counts: Counts,
    /// Rows in insertion order
    pub rows: Vec<TodoRow>,
    /// Present only while at least one item is completed
    pub clear_completed: Option<ClearCompletedView>,
    /// Present only while there are no items
    pub empty_state: Option<&'static str>,
}

impl TodoView {
    /// Derive the view from the current state
    #[must_use]
    pub fn render(state: &TodoState) -> Self {
        let counts = state.counts();
        let rows = state
            .items
            .iter()
            .map(|item| TodoRow {
                id: item.id,
                text: item.text.clone(),
                completed: item.completed,
                delete_label: DELETE_LABEL,
            })
            .collect();

        Self {
            title: TITLE,
            input: InputView {
                placeholder: PLACEHOLDER,
                value: state.input.clone(),
            },
            add_label: ADD_LABEL,
            counts,
            rows,
            clear_completed: (counts.completed > 0).then_some(ClearCompletedView {
                count: counts.completed,
            }),
            empty_state: (counts.total == 0).then_some(EMPTY_STATE),
        }
    }

    /// Counter labels in display order
    #[must_use]
    pub fn counter_labels(&self) -> [String; 3] {
        [
            format!("Total: {}", self.counts.total),
            format!("Active: {}", self.counts.active),
            format!("Completed: {}", self.counts.completed),
        ]
    }
}

impl fmt::Display for TodoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;

        if self.input.value.is_empty() {
            writeln!(f, "> ({})  [{}]", self.input.placeholder, self.add_label)?;
        } else {
            writeln!(f, "> {}  [{}]", self.input.value, self.add_label)?;
        }

        writeln!(f, "{}", self.counter_labels().join("  "))?;

        for (position, row) in self.rows.iter().enumerate() {
            let mark = if row.completed { 'x' } else { ' ' };
            writeln!(
                f,
                "{:>3}. [{mark}] {}  ({})",
                position + 1,
                row.text,
                row.delete_label
            )?;
        }

        if let Some(clear) = &self.clear_completed {
            writeln!(f, "[{}]", clear.label())?;
        }

        if let Some(message) = self.empty_state {
            writeln!(f, "{message}")?;
        }

        Ok(())
    }
}
