//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of items. Position is identity: there
//! are no ids, and deleting an item shifts every later item down by one. At
//! most one item is being edited at a time, tracked by the edit cursor.

use crate::color::ColorTag;
use crate::error::TodoError;
use serde::{Deserialize, Serialize};

/// Case-insensitive text equality used for duplicate detection
#[must_use]
pub fn same_text(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// A single todo item
///
/// Serialized as `{"text", "completed", "colorTag"}`. The field names used by
/// older stored lists (`value`, `checked`, `color`) are accepted when reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// What needs doing, trimmed and never empty
    #[serde(alias = "value")]
    pub text: String,
    /// Whether the todo is done
    #[serde(default, alias = "checked")]
    pub completed: bool,
    /// Display colour, fixed at creation
    #[serde(rename = "colorTag", alias = "color")]
    pub color_tag: ColorTag,
}

impl TodoItem {
    /// Creates a new, not yet completed todo item
    #[must_use]
    pub fn new(text: impl Into<String>, color_tag: ColorTag) -> Self {
        Self {
            text: text.into(),
            completed: false,
            color_tag,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// The notification currently on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Increases with every notification; stale dismissals carry an older value
    pub seq: u64,
    /// Text shown to the user
    pub message: String,
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// All todos in insertion order
    pub todos: Vec<TodoItem>,
    /// Position of the todo being edited, if any
    pub editing: Option<usize>,
    /// Notification currently shown, if any
    pub notification: Option<Notification>,
    /// Sequence number for the next notification
    pub next_notification_seq: u64,
    /// Why the last command was rejected (cleared by the next successful one)
    pub last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding a previously persisted list
    #[must_use]
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns the todo at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.todos.get(index)
    }

    /// Returns the todo at `index` or an [`TodoError::IndexOutOfRange`]
    ///
    /// # Errors
    ///
    /// Fails when `index` is past the end of the list.
    pub fn item(&self, index: usize) -> Result<&TodoItem, TodoError> {
        self.todos.get(index).ok_or(TodoError::IndexOutOfRange {
            index,
            len: self.todos.len(),
        })
    }

    /// Whether some todo other than `except` already has `text` (case-insensitive)
    #[must_use]
    pub fn contains_text(&self, text: &str, except: Option<usize>) -> bool {
        self.todos
            .iter()
            .enumerate()
            .any(|(index, todo)| Some(index) != except && same_text(&todo.text, text))
    }

    /// Text of the todo being edited, if an edit is active
    #[must_use]
    pub fn editing_text(&self) -> Option<&str> {
        self.editing
            .and_then(|index| self.todos.get(index))
            .map(|todo| todo.text.as_str())
    }
}

/// Actions representing commands and events for the todo list
///
/// Commands carry user intent and may be rejected. Events describe what
/// happened and are applied to state unconditionally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Append a new todo
    Create {
        /// Raw input text
        text: String,
    },

    /// Command: Start editing the todo at `index`
    BeginEdit {
        /// Position of the todo
        index: usize,
    },

    /// Command: Replace the text of the todo being edited
    CommitEdit {
        /// Raw input text
        text: String,
    },

    /// Command: Flip completion of the todo at `index`
    ToggleComplete {
        /// Position of the todo
        index: usize,
    },

    /// Command: Remove the todo at `index`
    Delete {
        /// Position of the todo
        index: usize,
    },

    /// Command: Hide notification `seq` if it is still the one shown
    DismissNotification {
        /// Sequence number of the notification to hide
        seq: u64,
    },

    // ========== Events ==========
    /// Event: Todo was appended
    TodoCreated {
        /// The new item
        item: TodoItem,
    },

    /// Event: Edit cursor moved to `index`
    EditStarted {
        /// Position of the todo
        index: usize,
    },

    /// Event: Edited text was saved and the cursor cleared
    EditCommitted {
        /// Position of the todo
        index: usize,
        /// New text, trimmed
        text: String,
    },

    /// Event: Completion was flipped
    CompletionToggled {
        /// Position of the todo
        index: usize,
    },

    /// Event: Todo was removed and any edit aborted
    TodoDeleted {
        /// Position of the removed todo
        index: usize,
    },

    /// Event: A command failed validation
    CommandRejected {
        /// Why
        error: TodoError,
        /// Sequence number of the notification raised for it
        seq: u64,
    },

    /// Event: Notification was hidden
    NotificationDismissed {
        /// Sequence number of the hidden notification
        seq: u64,
    },
}

impl TodoAction {
    /// Whether this action is a command (may be rejected)
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Create { .. }
                | Self::BeginEdit { .. }
                | Self::CommitEdit { .. }
                | Self::ToggleComplete { .. }
                | Self::Delete { .. }
                | Self::DismissNotification { .. }
        )
    }

    /// Whether this action is an event (already happened)
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
