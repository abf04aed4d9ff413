//! Errors returned by todo commands.
//!
//! Every variant except [`TodoError::Runtime`] is a user mistake: the display
//! message is what the notification shows, and the user resubmits.

use composable_todo_runtime::StoreError;
use thiserror::Error;

/// Why a todo command was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The submitted text was empty after trimming
    #[error("Input is empty")]
    EmptyInput,

    /// Another todo already has this text (case-insensitive)
    #[error("This already exists!")]
    DuplicateItem {
        /// The rejected text, trimmed
        text: String,
    },

    /// No todo at the given position
    #[error("No todo at position {index} (list has {len})")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// List length at the time of the request
        len: usize,
    },

    /// An edit was committed while no todo was being edited
    #[error("Nothing is being edited")]
    NoActiveEdit,

    /// The store runtime failed
    #[error("Store error: {0}")]
    Runtime(#[from] StoreError),
}

impl TodoError {
    /// Whether the error comes from user input and should be shown as a notification
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Runtime(_))
    }
}
