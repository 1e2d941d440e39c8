//! Domain types for the todo widget.
//!
//! The widget owns one piece of state: the ordered list of items (the item
//! store) and the text currently being typed (the input buffer). Everything
//! the view shows, counters included, is derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// Only `completed` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, exactly as typed
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Aggregate counters, always derived from the item list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Number of items
    pub total: usize,
    /// Items not yet completed
    pub active: usize,
    /// Completed items
    pub completed: usize,
}

/// State of the todo widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order
    pub items: Vec<TodoItem>,
    /// Uncommitted text in the input field
    pub input: String,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            input: String::new(),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Returns the number of todos still to do
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Derives all counters in one pass
    #[must_use]
    pub fn counts(&self) -> Counts {
        let total = self.items.len();
        let completed = self.completed_count();
        Counts {
            total,
            active: total - completed,
            completed,
        }
    }

    /// Returns `true` when there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the id of the item at a 1-based display position
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<TodoId> {
        position
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
            .map(|t| t.id)
    }
}

/// A key on the keyboard, named the way browsers name `KeyboardEvent.key`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// Return / Enter
    Enter,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Any printable character
    Char(char),
}

/// Error parsing a [`Key`] name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key name: {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enter" | "enter" | "Return" | "return" => Ok(Self::Enter),
            "Escape" | "escape" | "Esc" | "esc" => Ok(Self::Escape),
            "Tab" | "tab" => Ok(Self::Tab),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(ParseKeyError(s.to_string())),
                }
            },
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ParseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("Enter"),
            Self::Escape => f.write_str("Escape"),
            Self::Tab => f.write_str("Tab"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Actions the todo widget understands
///
/// Each variant is one user interaction. The reducer turns some of them
/// into follow-up actions: a key press may become a commit, and a commit
/// becomes an add of the buffered text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Replace the input buffer verbatim
    SetText {
        /// New buffer contents
        text: String,
    },

    /// Turn the input buffer into a new item (the "Add" control)
    Commit,

    /// A key was pressed while the input field had focus
    KeyPressed {
        /// The key
        key: Key,
    },

    /// Append a new item if `text` is not blank
    AddTodo {
        /// Item text, stored untrimmed
        text: String,
    },

    /// Flip an item's completion flag
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Remove an item
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Remove every completed item
    ClearCompleted,
}
