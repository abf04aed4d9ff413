//! Metrics recorded by the [`Store`](crate::Store).
//!
//! The store only emits through the `metrics` facade; installing a recorder
//! (Prometheus, logging, none) is left to the host application.
//!
//! # Example
//!
//! ```
//! // Attach descriptions once at startup, before or after installing a recorder.
//! composable_todo_runtime::telemetry::describe_metrics();
//! ```

use metrics::{describe_counter, describe_histogram, Unit};

/// Actions reduced by a store, including effect feedback and fired timers
pub const COMMANDS_TOTAL: &str = "store.commands.total";

/// Time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Delayed actions fired by `Store::tick`
pub const TIMERS_FIRED: &str = "store.timers.fired";

/// Register descriptions for every metric the store records.
pub fn describe_metrics() {
    describe_counter!(COMMANDS_TOTAL, "Total number of actions processed by the store");
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time taken to execute the reducer"
    );
    describe_counter!(TIMERS_FIRED, "Total number of delayed actions fired");
}
