//! Configuration for the todo widget front end.
//!
//! Settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TODO_WIDGET_COMMIT_KEY` | `Enter` | Key that commits the input field |
//! | `TODO_WIDGET_LOG_LEVEL` | `info` | Default log level when `RUST_LOG` is unset |
//!
//! # Example
//!
//! ```no_run
//! use todo_widget::config::WidgetConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WidgetConfig::from_env()?;
//! println!("Commit key: {}", config.commit_key);
//! # Ok(())
//! # }
//! ```

use crate::types::{Key, ParseKeyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the commit key
pub const COMMIT_KEY_VAR: &str = "TODO_WIDGET_COMMIT_KEY";
/// Environment variable naming the default log level
pub const LOG_LEVEL_VAR: &str = "TODO_WIDGET_LOG_LEVEL";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable held a key name we do not know
    #[error("Invalid value for {var}: {source}")]
    InvalidKey {
        /// Variable name
        var: &'static str,
        /// Parse failure
        #[source]
        source: ParseKeyError,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Key that commits the input field
    pub commit_key: Key,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl WidgetConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(COMMIT_KEY_VAR) {
            config.commit_key = key.parse().map_err(|source| ConfigError::InvalidKey {
                var: COMMIT_KEY_VAR,
                source,
            })?;
        }

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = level.trim().to_lowercase();
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "invalid log_level: {}. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            commit_key: Key::Enter,
            log_level: "info".to_string(),
        }
    }
}
