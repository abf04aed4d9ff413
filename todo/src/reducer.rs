//! Reducer logic for the todo list.
//!
//! Commands are validated, turned into events, and the events are applied to
//! state. Every successful mutation returns a persistence effect; every
//! rejection raises a notification and schedules its dismissal.

use crate::color::ColorSource;
use crate::config::TodoConfig;
use crate::error::TodoError;
use crate::persistence;
use crate::types::{Notification, TodoAction, TodoItem, TodoState};
use composable_todo_core::{
    effect::{Effect, EffectId},
    environment::{KeyValueStorage, Notifier},
    reducer::Reducer,
    smallvec, SmallVec,
};
use std::sync::Arc;

/// Timer for hiding the visible notification; a newer notification restarts it
const NOTIFICATION_TIMER: EffectId = EffectId("notification-dismiss");

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Where the list is persisted
    pub storage: Arc<dyn KeyValueStorage>,
    /// Where rejection messages are shown
    pub notifier: Arc<dyn Notifier>,
    /// Colours for new todos
    pub colors: Arc<dyn ColorSource>,
    /// Storage key and notification timing
    pub config: TodoConfig,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` with the default configuration
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
        colors: Arc<dyn ColorSource>,
    ) -> Self {
        Self {
            storage,
            notifier,
            colors,
            config: TodoConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: TodoConfig) -> Self {
        self.config = config;
        self
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates input text for a new or edited todo, returning it trimmed
    fn validate_text(
        state: &TodoState,
        text: &str,
        except: Option<usize>,
    ) -> Result<String, TodoError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(TodoError::EmptyInput);
        }

        if state.contains_text(text, except) {
            return Err(TodoError::DuplicateItem {
                text: text.to_string(),
            });
        }

        Ok(text.to_string())
    }

    /// Validates a `CommitEdit` command
    fn validate_commit_edit(state: &TodoState, text: &str) -> Result<(usize, String), TodoError> {
        let Some(index) = state.editing.filter(|index| *index < state.count()) else {
            return Err(TodoError::NoActiveEdit);
        };

        let text = Self::validate_text(state, text, Some(index))?;
        Ok((index, text))
    }

    /// Validates a command addressing the todo at `index`
    fn validate_index(state: &TodoState, index: usize) -> Result<usize, TodoError> {
        state.item(index).map(|_| index)
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::TodoCreated { item } => {
                state.todos.push(item.clone());
                state.last_error = None;
            },
            TodoAction::EditStarted { index } => {
                state.editing = Some(*index);
                state.last_error = None;
            },
            TodoAction::EditCommitted { index, text } => {
                if let Some(todo) = state.todos.get_mut(*index) {
                    todo.text.clone_from(text);
                }
                state.editing = None;
                state.last_error = None;
            },
            TodoAction::CompletionToggled { index } => {
                if let Some(todo) = state.todos.get_mut(*index) {
                    todo.toggle();
                }
                state.last_error = None;
            },
            TodoAction::TodoDeleted { index } => {
                if *index < state.todos.len() {
                    state.todos.remove(*index);
                }
                // Indices shifted: an in-flight edit could now point at the wrong todo.
                state.editing = None;
                state.last_error = None;
            },
            TodoAction::CommandRejected { error, seq } => {
                state.notification = Some(Notification {
                    seq: *seq,
                    message: error.to_string(),
                });
                state.next_notification_seq = seq + 1;
                state.last_error = Some(error.clone());
            },
            TodoAction::NotificationDismissed { seq } => {
                if state.notification.as_ref().is_some_and(|n| n.seq == *seq) {
                    state.notification = None;
                }
            },
            // Commands are not applied to state
            TodoAction::Create { .. }
            | TodoAction::BeginEdit { .. }
            | TodoAction::CommitEdit { .. }
            | TodoAction::ToggleComplete { .. }
            | TodoAction::Delete { .. }
            | TodoAction::DismissNotification { .. } => {},
        }
    }

    /// Applies `event` and returns the effect persisting the resulting list
    fn commit(
        state: &mut TodoState,
        event: &TodoAction,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        Self::apply_event(state, event);

        let storage = Arc::clone(&env.storage);
        let key = env.config.storage_key.clone();
        let todos = state.todos.clone();

        smallvec![Effect::task(move || {
            if let Err(error) = persistence::save_todos(storage.as_ref(), &key, &todos) {
                tracing::warn!(%error, key = %key, "Failed to persist todos");
            }
            None
        })]
    }

    /// Records a rejection, shows it, and schedules the notification's dismissal
    fn reject(
        state: &mut TodoState,
        error: TodoError,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        let seq = state.next_notification_seq;
        let message = error.to_string();
        Self::apply_event(state, &TodoAction::CommandRejected { error, seq });

        let notifier = Arc::clone(&env.notifier);

        smallvec![
            Effect::task(move || {
                notifier.show(&message);
                None
            }),
            Effect::cancellable(
                NOTIFICATION_TIMER,
                Effect::delay(
                    env.config.notification_duration,
                    TodoAction::DismissNotification { seq },
                ),
            ),
        ]
    }

    /// Runs `validate`, then commits its event or rejects with its error
    fn handle(
        state: &mut TodoState,
        env: &TodoEnvironment,
        validate: impl FnOnce(&TodoState) -> Result<TodoAction, TodoError>,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        match validate(&*state) {
            Ok(event) => Self::commit(state, &event, env),
            Err(error) => Self::reject(state, error, env),
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
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
            // ========== Commands ==========
            TodoAction::Create { text } => Self::handle(state, env, |state| {
                let text = Self::validate_text(state, &text, None)?;
                Ok(TodoAction::TodoCreated {
                    item: TodoItem::new(text, env.colors.next_color()),
                })
            }),

            TodoAction::BeginEdit { index } => match Self::validate_index(state, index) {
                // Moving the cursor changes nothing persisted
                Ok(index) => {
                    Self::apply_event(state, &TodoAction::EditStarted { index });
                    SmallVec::new()
                },
                Err(error) => Self::reject(state, error, env),
            },

            TodoAction::CommitEdit { text } => Self::handle(state, env, |state| {
                let (index, text) = Self::validate_commit_edit(state, &text)?;
                Ok(TodoAction::EditCommitted { index, text })
            }),

            TodoAction::ToggleComplete { index } => Self::handle(state, env, |state| {
                let index = Self::validate_index(state, index)?;
                Ok(TodoAction::CompletionToggled { index })
            }),

            TodoAction::Delete { index } => Self::handle(state, env, |state| {
                let index = Self::validate_index(state, index)?;
                Ok(TodoAction::TodoDeleted { index })
            }),

            TodoAction::DismissNotification { seq } => {
                if !state.notification.as_ref().is_some_and(|n| n.seq == seq) {
                    // A newer notification replaced this one and owns its own timer.
                    return SmallVec::new();
                }

                Self::apply_event(state, &TodoAction::NotificationDismissed { seq });
                let notifier = Arc::clone(&env.notifier);
                smallvec![Effect::task(move || {
                    notifier.dismiss();
                    None
                })]
            },

            // ========== Events ==========
            TodoAction::TodoCreated { .. }
            | TodoAction::EditStarted { .. }
            | TodoAction::EditCommitted { .. }
            | TodoAction::CompletionToggled { .. }
            | TodoAction::TodoDeleted { .. }
            | TodoAction::CommandRejected { .. }
            | TodoAction::NotificationDismissed { .. } => {
                // Events are applied as-is, e.g. when replayed
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
