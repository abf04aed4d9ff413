//! # Composable Todo Runtime
//!
//! Runtime implementation for the Composable Todo architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling. Everything runs synchronously on the caller's thread:
//! an action, the effects it produces, and any actions those effects feed
//! back are all processed before [`Store::send`] returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer and executes effects
//! - **Timer queue**: Holds [`Effect::Delay`] actions until the store clock says they are due
//! - **Telemetry**: `metrics` names recorded by the store
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//!
//! // From the host event loop: fire delayed actions that are due
//! store.tick()?;
//! ```

use composable_todo_core::{effect::Effect, reducer::Reducer};

/// Metric names and descriptions
pub mod telemetry;

mod timer;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept producing actions past the configured limit
        ///
        /// Processing stops; state reflects every action reduced so far.
        #[error("Feedback limit exceeded: more than {0} actions produced by effects")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;
pub use store::Store;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use composable_todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of actions effects may feed back for a single `send`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_actions: 64,
        }
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::timer::TimerQueue;
    use super::{telemetry, Effect, Reducer, StoreConfig, StoreError};
    use composable_todo_core::effect::EffectId;
    use composable_todo_core::environment::{Clock, SystemClock};
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only through the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Delayed actions (fired by [`Store::tick`])
    ///
    /// The store is driven through `&mut self`: one thread of control, no locks.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        clock: Arc<dyn Clock>,
        timers: TimerQueue<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`] and the system clock for timers.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                clock: Arc::new(SystemClock),
                timers: TimerQueue::new(),
            }
        }

        /// Replace the clock used to schedule and fire delayed actions
        #[must_use]
        pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
            self.clock = clock;
            self
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, executes the returned effects in order, and keeps
        /// reducing actions fed back by [`Effect::Task`] until none remain.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if effects produce more
        /// than [`StoreConfig::max_feedback_actions`] follow-up actions.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<(), StoreError> {
            tracing::debug!(?action, "Processing action");

            let mut queue = VecDeque::from([action]);
            let mut feedback = 0_usize;

            while let Some(action) = queue.pop_front() {
                metrics::counter!(telemetry::COMMANDS_TOTAL).increment(1);

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                    metrics::histogram!(telemetry::REDUCER_DURATION)
                        .record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };

                let before = queue.len();
                for effect in effects {
                    self.execute_effect(effect, &mut queue, None);
                }
                feedback += queue.len() - before;

                if feedback > self.config.max_feedback_actions {
                    tracing::warn!(
                        limit = self.config.max_feedback_actions,
                        "Effects produced too many feedback actions, stopping"
                    );
                    return Err(StoreError::FeedbackLimitExceeded(
                        self.config.max_feedback_actions,
                    ));
                }
            }

            tracing::debug!("Action processing completed");
            Ok(())
        }

        /// Fire every delayed action whose delay has elapsed
        ///
        /// Delayed actions only fire from here: the host calls `tick` from its
        /// event loop. Due actions are sent in deadline order. Returns how many
        /// fired.
        ///
        /// # Errors
        ///
        /// Propagates the first [`StoreError`] returned by [`Store::send`]. The
        /// due actions after the failing one stay queued for the next tick.
        pub fn tick(&mut self) -> Result<usize, StoreError> {
            let mut due = self.timers.take_due(self.clock.now()).into_iter();
            let mut fired = 0_usize;

            while let Some(timer) = due.next() {
                tracing::trace!(action = ?timer.action, "Timer fired");
                metrics::counter!(telemetry::TIMERS_FIRED).increment(1);
                fired += 1;

                if let Err(error) = self.send(timer.action) {
                    self.timers.restore(due);
                    return Err(error);
                }
            }

            Ok(fired)
        }

        /// Number of delayed actions waiting to fire
        #[must_use]
        pub fn pending_timers(&self) -> usize {
            self.timers.len()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Access the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        fn execute_effect(
            &mut self,
            effect: Effect<A>,
            queue: &mut VecDeque<A>,
            id: Option<EffectId>,
        ) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        self.execute_effect(effect, queue, id);
                    }
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!("Scheduling Effect::Delay (duration: {:?})", duration);
                    self.timers.schedule(self.clock.now(), duration, id, *action);
                },
                Effect::Task(task) => {
                    tracing::trace!("Executing Effect::Task");
                    if let Some(action) = task() {
                        tracing::trace!("Effect::Task produced an action, queueing it");
                        queue.push_back(action);
                    }
                },
                Effect::Cancellable { id, effect } => {
                    let cancelled = self.timers.cancel(id);
                    tracing::trace!(?id, cancelled, "Executing Effect::Cancellable");
                    self.execute_effect(*effect, queue, Some(id));
                },
                Effect::Cancel(id) => {
                    let cancelled = self.timers.cancel(id);
                    tracing::trace!(?id, cancelled, "Executing Effect::Cancel");
                },
            }
        }
    }
}
