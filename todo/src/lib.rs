//! Todo list manager built on the Composable Todo architecture.
//!
//! Keeps an ordered list of short text items, each with a completion flag and
//! a display colour, and projects it into rows for a display layer. It
//! demonstrates:
//!
//! - Command validation (empty and case-insensitive duplicate input)
//! - A single edit cursor that any delete cancels
//! - Persistence and notifications as explicit effects
//! - Notification auto-dismissal through delayed actions
//! - A pure render projection
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use composable_todo::{RandomColors, TodoEnvironment, TodoStore};
//! use composable_todo_testing::{InMemoryStorage, RecordingNotifier};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), composable_todo::TodoError> {
//! let env = TodoEnvironment::new(
//!     Arc::new(InMemoryStorage::new()),
//!     Arc::new(RecordingNotifier::new()),
//!     Arc::new(RandomColors),
//! );
//! let mut todos = TodoStore::open(env);
//!
//! todos.create("Buy milk")?;
//! todos.toggle_complete(0)?;
//!
//! println!("{}", todos.view());
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod persistence;
pub mod reducer;
pub mod renderer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use color::{ColorSource, ColorTag, PaletteColors, RandomColors};
pub use config::TodoConfig;
pub use error::TodoError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use renderer::{project, RowAction, TodoRenderer, TodoView, ViewRow};
pub use store::TodoStore;
pub use types::{Notification, TodoAction, TodoItem, TodoState};
