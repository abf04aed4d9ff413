//! Persisting the todo list as JSON through a [`KeyValueStorage`].
//!
//! Reading is fail-open: a missing, unreadable or unparsable value is an
//! empty list. Writing reports errors to the caller, which logs them; there
//! is no retry.

use crate::types::TodoItem;
use composable_todo_core::environment::{KeyValueStorage, StorageError};
use thiserror::Error;

/// Failure while writing the list
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The list could not be encoded
    #[error("Failed to encode todos: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Encode the list as a JSON array of `{text, completed, colorTag}` records
///
/// # Errors
///
/// Returns the `serde_json` error if encoding fails.
pub fn encode(todos: &[TodoItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(todos)
}

/// Decode a JSON array of todo records
///
/// # Errors
///
/// Returns the `serde_json` error for malformed JSON or invalid records.
pub fn decode(raw: &str) -> Result<Vec<TodoItem>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Load the list stored under `key`, or an empty list
///
/// A JSON `null` counts as missing.
#[must_use]
pub fn load_todos(storage: &dyn KeyValueStorage, key: &str) -> Vec<TodoItem> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No stored todos, starting empty");
            return Vec::new();
        },
        Err(error) => {
            tracing::warn!(key, %error, "Failed to read stored todos, starting empty");
            return Vec::new();
        },
    };

    match serde_json::from_str::<Option<Vec<TodoItem>>>(&raw) {
        Ok(todos) => {
            let todos = todos.unwrap_or_default();
            tracing::debug!(key, count = todos.len(), "Loaded stored todos");
            todos
        },
        Err(error) => {
            tracing::warn!(key, %error, "Stored todos are unparsable, starting empty");
            Vec::new()
        },
    }
}

/// Encode and write the list under `key`
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the storage write fails.
pub fn save_todos(
    storage: &dyn KeyValueStorage,
    key: &str,
    todos: &[TodoItem],
) -> Result<(), PersistenceError> {
    let payload = encode(todos)?;
    storage.save(key, &payload)?;
    Ok(())
}
