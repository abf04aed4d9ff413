//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the Composable Todo architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{InMemoryStorage, ManualClock, RecordingNotifier};
//!
//! #[test]
//! fn notification_is_dismissed() {
//!     let clock = Arc::new(ManualClock::new(test_time()));
//!     let notifier = Arc::new(RecordingNotifier::new());
//!     let mut store = TodoStore::open(env_with(notifier.clone()), clock.clone());
//!
//!     let _ = store.create("");
//!     clock.advance(Duration::from_secs(2));
//!     store.tick()?;
//!     assert_eq!(notifier.visible(), None);
//! }
//! ```


pub use reducer_test::{assertions, ReducerTest};

use chrono::{DateTime, Utc};
use composable_todo_core::environment::Clock;

/// Mock implementations of Environment traits
///
/// - [`FixedClock`]: Deterministic time
/// - [`ManualClock`]: Time that tests move forward explicitly
/// - [`InMemoryStorage`]: `HashMap`-backed key-value storage
/// - [`RecordingNotifier`]: Captures shown/dismissed notifications
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use composable_todo_core::environment::{KeyValueStorage, Notifier, StorageError};
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use std::time::Duration;

    // Mocks stay usable after a panicking test thread poisoned the lock.
    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::FixedClock;
    /// use composable_todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when the test calls [`ManualClock::advance`]
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::{ManualClock, test_time};
    /// use composable_todo_core::environment::Clock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new(test_time());
    /// let start = clock.now();
    /// clock.advance(Duration::from_millis(1500));
    /// assert_eq!((clock.now() - start).num_milliseconds(), 1500);
    /// ```
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a clock starting at `start`
        #[must_use]
        pub const fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(start),
            }
        }

        /// Move the clock forward
        ///
        /// # Panics
        ///
        /// Panics if `by` does not fit in a `chrono::Duration`.
        #[allow(clippy::expect_used)] // Test utility
        pub fn advance(&self, by: Duration) {
            let by = chrono::Duration::from_std(by).expect("advance duration out of range");
            let mut time = lock(&self.time);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *lock(&self.time)
        }
    }

    /// Default test time (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_time())
    }

    /// In-memory key-value storage for fast, deterministic testing.
    ///
    /// Can be switched into a failing mode to exercise error paths.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::InMemoryStorage;
    /// use composable_todo_core::environment::KeyValueStorage;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let storage = InMemoryStorage::new();
    /// storage.save("todos", "[]")?;
    /// assert_eq!(storage.load("todos")?, Some("[]".to_string()));
    /// assert_eq!(storage.save_count(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Debug, Default)]
    pub struct InMemoryStorage {
        data: Mutex<HashMap<String, String>>,
        saves: Mutex<usize>,
        failing: Mutex<bool>,
    }

    impl InMemoryStorage {
        /// Create a new empty storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a storage pre-populated with `value` under `key`
        #[must_use]
        pub fn with_value(key: &str, value: &str) -> Self {
            let storage = Self::new();
            lock(&storage.data).insert(key.to_string(), value.to_string());
            storage
        }

        /// Make every subsequent load and save fail (or succeed again)
        pub fn set_failing(&self, failing: bool) {
            *lock(&self.failing) = failing;
        }

        /// Raw stored value, bypassing failure mode
        #[must_use]
        pub fn get(&self, key: &str) -> Option<String> {
            lock(&self.data).get(key).cloned()
        }

        /// Number of successful saves so far
        #[must_use]
        pub fn save_count(&self) -> usize {
            *lock(&self.saves)
        }

        fn check_available(&self) -> Result<(), StorageError> {
            if *lock(&self.failing) {
                return Err(StorageError::Unavailable("storage set to fail".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStorage for InMemoryStorage {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.check_available()?;
            Ok(lock(&self.data).get(key).cloned())
        }

        fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check_available()?;
            lock(&self.data).insert(key.to_string(), value.to_string());
            *lock(&self.saves) += 1;
            Ok(())
        }
    }

    /// What happened to a [`RecordingNotifier`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NotifierCall {
        /// `show(message)` was called
        Show(String),
        /// `dismiss()` was called
        Dismiss,
    }

    /// Notifier that records every call and tracks the visible message
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        calls: Mutex<Vec<NotifierCall>>,
        visible: Mutex<Option<String>>,
    }

    impl RecordingNotifier {
        /// Create a notifier with nothing shown
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Every call so far, in order
        #[must_use]
        pub fn calls(&self) -> Vec<NotifierCall> {
            lock(&self.calls).clone()
        }

        /// Messages passed to `show`, in order
        #[must_use]
        pub fn shown(&self) -> Vec<String> {
            lock(&self.calls)
                .iter()
                .filter_map(|call| match call {
                    NotifierCall::Show(message) => Some(message.clone()),
                    NotifierCall::Dismiss => None,
                })
                .collect()
        }

        /// Message currently on screen, if any
        #[must_use]
        pub fn visible(&self) -> Option<String> {
            lock(&self.visible).clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn show(&self, message: &str) {
            lock(&self.calls).push(NotifierCall::Show(message.to_string()));
            *lock(&self.visible) = Some(message.to_string());
        }

        fn dismiss(&self) {
            lock(&self.calls).push(NotifierCall::Dismiss);
            *lock(&self.visible) = None;
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Route `tracing` output through the test harness's captured writer
    ///
    /// Safe to call from every test; only the first call installs a subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{
    test_clock, test_time, FixedClock, InMemoryStorage, ManualClock, NotifierCall,
    RecordingNotifier,
};
