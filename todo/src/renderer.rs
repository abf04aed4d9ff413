//! Render projection from the todo list to display rows.
//!
//! The renderer holds no state and performs no I/O. Hosts call it after every
//! change and redraw or diff the result. Activations coming back from the
//! display are described by [`RowAction`].

use crate::color::ColorTag;
use crate::types::TodoItem;
use composable_todo_core::projection::Projection;
use thiserror::Error;

/// One displayed todo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewRow {
    /// Position in the list; pass it back with a [`RowAction`]
    pub index: usize,
    /// Text to show
    pub text: String,
    /// Whether to draw the todo as done
    pub completed: bool,
    /// Colour of the todo's marker
    pub color_tag: ColorTag,
}

/// What the display should draw
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoView {
    /// The list is empty; show a placeholder
    Empty,
    /// One row per todo, in list order
    Rows(Vec<ViewRow>),
}

impl TodoView {
    /// The rows to draw; empty for [`TodoView::Empty`]
    #[must_use]
    pub fn rows(&self) -> &[ViewRow] {
        match self {
            Self::Empty => &[],
            Self::Rows(rows) => rows,
        }
    }

    /// Whether this is the placeholder
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl std::fmt::Display for ViewRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {} ({})", self.text, self.color_tag)
    }
}

impl std::fmt::Display for TodoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Nothing"),
            Self::Rows(rows) => {
                for (position, row) in rows.iter().enumerate() {
                    if position > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{row}")?;
                }
                Ok(())
            },
        }
    }
}

/// Projects a todo list into a [`TodoView`]
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoRenderer;

impl Projection for TodoRenderer {
    type Source = [TodoItem];
    type View = TodoView;

    fn name(&self) -> &'static str {
        "todo_rows"
    }

    fn project(&self, todos: &[TodoItem]) -> TodoView {
        if todos.is_empty() {
            return TodoView::Empty;
        }

        TodoView::Rows(
            todos
                .iter()
                .enumerate()
                .map(|(index, todo)| ViewRow {
                    index,
                    text: todo.text.clone(),
                    completed: todo.completed,
                    color_tag: todo.color_tag,
                })
                .collect(),
        )
    }
}

/// Shorthand for [`TodoRenderer`]'s projection
#[must_use]
pub fn project(todos: &[TodoItem]) -> TodoView {
    TodoRenderer.project(todos)
}

/// An activation on a displayed row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// Toggle completion
    Check,
    /// Load the text into the input and start editing
    Edit,
    /// Remove the todo
    Delete,
}

/// A row activation tag that is not `check`, `edit` or `delete`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown row action: {0:?}")]
pub struct UnknownRowAction(pub String);

impl std::str::FromStr for RowAction {
    type Err = UnknownRowAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Self::Check),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(UnknownRowAction(other.to_string())),
        }
    }
}

impl RowAction {
    /// The tag the display uses for this action
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}
