//! Terminal event surface.
//!
//! The terminal front end reads one line per interaction and turns it into
//! the actions a browser would have produced for the same gesture.

use crate::types::{Key, TodoAction, TodoState};

/// Help text printed for unrecognised commands
pub const USAGE: &str = "\
Type a todo and press Enter to add it. Commands:
  :type <text>   edit the input field without committing
  :add           click \"Add\"
  :key <name>    press a key in the input field (Enter, Escape, Tab, a)
  :toggle <n>    toggle the checkbox of row n
  :delete <n>    delete row n
  :clear         click \"Clear Completed\"
  :quit          exit
Start a todo with \"::\" to add text that begins with a colon.";

/// One parsed line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type the text, then press the key
    TypeAndPress(String, Key),
    /// Replace the input field contents
    Type(String),
    /// Click the commit control
    Add,
    /// Press a key
    Press(Key),
    /// Toggle the row at a 1-based position
    Toggle(usize),
    /// Delete the row at a 1-based position
    Delete(usize),
    /// Click "Clear Completed"
    Clear,
    /// Leave the program
    Quit,
    /// Input we could not make sense of
    Unknown(String),
}

impl Command {
    /// Parse one line of terminal input
    ///
    /// Plain text is typed into the field and committed with `commit_key`,
    /// like typing and then pressing that key. A leading `::` stands for a
    /// literal `:`.
    #[must_use]
    pub fn parse(line: &str, commit_key: Key) -> Self {
        if let Some(literal) = line.strip_prefix("::") {
            return Self::TypeAndPress(format!(":{literal}"), commit_key);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Self::TypeAndPress(line.to_string(), commit_key);
        };

        let (name, arg) = match rest.split_once(' ') {
            Some((name, arg)) => (name, arg),
            None => (rest, ""),
        };

        match name {
            "type" => Self::Type(arg.to_string()),
            "add" => Self::Add,
            "key" => arg
                .trim()
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Press),
            "toggle" => Self::position(arg).map_or_else(|| Self::Unknown(line.to_string()), Self::Toggle),
            "delete" => Self::position(arg).map_or_else(|| Self::Unknown(line.to_string()), Self::Delete),
            "clear" => Self::Clear,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }

    fn position(arg: &str) -> Option<usize> {
        arg.trim().parse().ok().filter(|&n| n > 0)
    }

    /// Translate into widget actions against the current state
    ///
    /// Row positions are resolved to ids here, so a position past the end
    /// yields no action. `Quit` and `Unknown` never produce actions.
    #[must_use]
    pub fn into_actions(self, state: &TodoState) -> Vec<TodoAction> {
        match self {
            Self::TypeAndPress(text, key) => {
                vec![TodoAction::SetText { text }, TodoAction::KeyPressed { key }]
            },
            Self::Type(text) => vec![TodoAction::SetText { text }],
            Self::Add => vec![TodoAction::Commit],
            Self::Press(key) => vec![TodoAction::KeyPressed { key }],
            Self::Toggle(position) => state
                .id_at(position)
                .map(|id| TodoAction::ToggleTodo { id })
                .into_iter()
                .collect(),
            Self::Delete(position) => state
                .id_at(position)
                .map(|id| TodoAction::DeleteTodo { id })
                .into_iter()
                .collect(),
            Self::Clear => vec![TodoAction::ClearCompleted],
            Self::Quit | Self::Unknown(_) => Vec::new(),
        }
    }
}
