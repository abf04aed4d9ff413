//! Projections: pure read models derived from state.
//!
//! # Overview
//!
//! Projections are the **read side** of the architecture. Reducers own the
//! write side (actions → state), projections turn the resulting state into a
//! view that a display layer can draw or diff.
//!
//! ```text
//! Write Side:                 Read Side:
//! ┌─────────────────┐         ┌─────────────────┐
//! │  Reducer        │  state  │  Projection     │  view
//! │  (validate,     │ ──────▶ │  (pure, no I/O) │ ──────▶ host
//! │   apply events) │         │                 │
//! └─────────────────┘         └─────────────────┘
//! ```
//!
//! A projection holds no hidden state: projecting the same source twice yields
//! equal views. That makes views safe to recompute on every change.
//!
//! ## Example
//!
//! ```
//! use composable_todo_core::projection::Projection;
//!
//! struct LengthProjection;
//!
//! impl Projection for LengthProjection {
//!     type Source = [String];
//!     type View = usize;
//!
//!     fn name(&self) -> &'static str {
//!         "length"
//!     }
//!
//!     fn project(&self, source: &[String]) -> usize {
//!         source.len()
//!     }
//! }
//!
//! let names = vec!["a".to_string(), "b".to_string()];
//! assert_eq!(LengthProjection.project(&names), 2);
//! ```

/// A projection derives a view from a source value.
///
/// # Philosophy
///
/// - **Pure**: no side effects, no interior mutability
/// - **Deterministic**: equal sources produce equal views
/// - **Cheap to rebuild**: hosts recompute instead of patching
pub trait Projection {
    /// The value this projection reads.
    type Source: ?Sized;

    /// The view this projection produces.
    type View;

    /// Projection name, used in logs.
    fn name(&self) -> &'static str;

    /// Build the view for `source`.
    fn project(&self, source: &Self::Source) -> Self::View;
}
