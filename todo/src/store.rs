//! The todo store: the host-facing API over the runtime [`Store`].
//!
//! Construct one [`TodoStore`] at startup and hand it to every event handler.
//! Each operation sends a command through the reducer, runs its effects
//! (persistence write or notification) and reports the outcome as a
//! `Result`.

use crate::error::TodoError;
use crate::persistence;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::renderer::{RowAction, TodoRenderer, TodoView};
use crate::types::{TodoAction, TodoItem, TodoState};
use composable_todo_core::environment::{Clock, SystemClock};
use composable_todo_core::projection::Projection;
use composable_todo_runtime::{Store, StoreConfig};
use std::sync::Arc;

/// Ordered todo list with a single edit cursor
///
/// # Example
///
/// ```
/// use composable_todo::{PaletteColors, TodoEnvironment, TodoError, TodoStore};
/// use composable_todo_testing::{InMemoryStorage, RecordingNotifier};
/// use std::sync::Arc;
///
/// let env = TodoEnvironment::new(
///     Arc::new(InMemoryStorage::new()),
///     Arc::new(RecordingNotifier::new()),
///     Arc::new(PaletteColors::new(Vec::new())),
/// );
/// let mut todos = TodoStore::open(env);
///
/// todos.create("Buy milk")?;
/// assert_eq!(todos.create("BUY MILK"), Err(TodoError::DuplicateItem { text: "BUY MILK".into() }));
///
/// todos.toggle_complete(0)?;
/// assert!(todos.snapshot()[0].completed);
/// # Ok::<(), TodoError>(())
/// ```
pub struct TodoStore {
    store: Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>,
    renderer: TodoRenderer,
}

impl TodoStore {
    /// Load the persisted list and build the store, timing notifications with the system clock
    #[must_use]
    pub fn open(environment: TodoEnvironment) -> Self {
        Self::open_with_clock(environment, Arc::new(SystemClock))
    }

    /// Load the persisted list and build the store around `clock`
    ///
    /// Missing or unparsable stored data yields an empty list.
    #[must_use]
    pub fn open_with_clock(environment: TodoEnvironment, clock: Arc<dyn Clock>) -> Self {
        let todos = persistence::load_todos(
            environment.storage.as_ref(),
            &environment.config.storage_key,
        );
        tracing::info!(count = todos.len(), "Todo store opened");

        let store = Store::with_config(
            TodoState::with_todos(todos),
            TodoReducer::new(),
            environment,
            StoreConfig::default(),
        )
        .with_clock(clock);

        Self {
            store,
            renderer: TodoRenderer,
        }
    }

    /// Append a new todo
    ///
    /// # Errors
    ///
    /// [`TodoError::EmptyInput`] for blank text, [`TodoError::DuplicateItem`]
    /// if a todo with the same text (ignoring case) exists.
    pub fn create(&mut self, text: &str) -> Result<(), TodoError> {
        self.run(TodoAction::Create {
            text: text.to_string(),
        })
    }

    /// Start editing the todo at `index`, returning its text to pre-fill the input
    ///
    /// A second call moves the cursor; there is only ever one edit.
    ///
    /// # Errors
    ///
    /// [`TodoError::IndexOutOfRange`] if there is no todo at `index`.
    pub fn begin_edit(&mut self, index: usize) -> Result<String, TodoError> {
        self.run(TodoAction::BeginEdit { index })?;
        self.store
            .state(|s| s.editing_text().map(str::to_string))
            .ok_or(TodoError::NoActiveEdit)
    }

    /// Replace the text of the todo being edited and end the edit
    ///
    /// On rejection the edit stays active so the user can resubmit.
    ///
    /// # Errors
    ///
    /// [`TodoError::NoActiveEdit`] if nothing is being edited (including after
    /// a delete), otherwise the same errors as [`TodoStore::create`].
    pub fn commit_edit(&mut self, text: &str) -> Result<(), TodoError> {
        self.run(TodoAction::CommitEdit {
            text: text.to_string(),
        })
    }

    /// Flip completion of the todo at `index`
    ///
    /// # Errors
    ///
    /// [`TodoError::IndexOutOfRange`] if there is no todo at `index`.
    pub fn toggle_complete(&mut self, index: usize) -> Result<(), TodoError> {
        self.run(TodoAction::ToggleComplete { index })
    }

    /// Remove the todo at `index`; later todos move down one position
    ///
    /// Any edit in progress is cancelled, whichever todo it was on.
    ///
    /// # Errors
    ///
    /// [`TodoError::IndexOutOfRange`] if there is no todo at `index`.
    pub fn delete(&mut self, index: usize) -> Result<(), TodoError> {
        self.run(TodoAction::Delete { index })
    }

    /// Form submission: commits the active edit, or creates a todo when idle
    ///
    /// # Errors
    ///
    /// See [`TodoStore::commit_edit`] and [`TodoStore::create`].
    pub fn submit(&mut self, text: &str) -> Result<(), TodoError> {
        if self.is_editing() {
            self.commit_edit(text)
        } else {
            self.create(text)
        }
    }

    /// Apply a row activation from the display
    ///
    /// Returns the text to pre-fill for [`RowAction::Edit`], `None` otherwise.
    ///
    /// # Errors
    ///
    /// [`TodoError::IndexOutOfRange`] if there is no todo at `index`.
    pub fn dispatch(
        &mut self,
        action: RowAction,
        index: usize,
    ) -> Result<Option<String>, TodoError> {
        tracing::debug!(action = action.as_str(), index, "Row activated");
        match action {
            RowAction::Check => self.toggle_complete(index).map(|()| None),
            RowAction::Edit => self.begin_edit(index).map(Some),
            RowAction::Delete => self.delete(index).map(|()| None),
        }
    }

    /// Copy of the list, in order
    #[must_use]
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.store.state(|s| s.todos.clone())
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.state(TodoState::count)
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the todo being edited
    #[must_use]
    pub fn edit_cursor(&self) -> Option<usize> {
        self.store.state(|s| s.editing)
    }

    /// Whether an edit is in progress
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit_cursor().is_some()
    }

    /// Render projection of the current list
    #[must_use]
    pub fn view(&self) -> TodoView {
        self.store.state(|s| self.renderer.project(&s.todos))
    }

    /// Message of the notification currently shown
    #[must_use]
    pub fn notification(&self) -> Option<String> {
        self.store
            .state(|s| s.notification.as_ref().map(|n| n.message.clone()))
    }

    /// Fire due timers, dismissing expired notifications
    ///
    /// Call from the host event loop: notifications are only dismissed here.
    /// Returns how many timers fired.
    ///
    /// # Errors
    ///
    /// [`TodoError::Runtime`] if the runtime fails.
    pub fn tick(&mut self) -> Result<usize, TodoError> {
        Ok(self.store.tick()?)
    }

    /// Read-only access to the full state
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TodoState) -> T,
    {
        self.store.state(f)
    }

    fn run(&mut self, action: TodoAction) -> Result<(), TodoError> {
        self.store.send(action)?;
        match self.store.state(|s| s.last_error.clone()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
