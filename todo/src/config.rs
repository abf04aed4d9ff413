//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Storage key the list is persisted under
    pub storage_key: String,
    /// How long a notification stays visible
    pub notification_duration: Duration,
    /// Log level for the demo binary's subscriber (trace, debug, info, warn, error)
    pub log_level: String,
}

impl TodoConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TODO_STORAGE_KEY` | `todos` |
    /// | `TODO_NOTIFICATION_MS` | `2000` |
    /// | `TODO_LOG_LEVEL` | `info` |
    ///
    /// Missing or unparsable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            storage_key: lookup("TODO_STORAGE_KEY")
                .filter(|key| !key.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            notification_duration: lookup("TODO_NOTIFICATION_MS")
                .and_then(|ms| ms.trim().parse::<u64>().ok())
                .map_or(defaults.notification_duration, Duration::from_millis),
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the notification duration
    #[must_use]
    pub const fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: "todos".to_string(),
            notification_duration: Duration::from_secs(2),
            log_level: "info".to_string(),
        }
    }
}
