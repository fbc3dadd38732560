//! Process configuration.
//!
//! Settings are read from a JSON document, with every field optional, and
//! can then be overridden from `TASKTREE_*` environment variables. Loading
//! happens once at start-up; the resulting [`AppConfig`] is passed to
//! [`crate::app`] explicitly.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`DatabaseConfig::url`].
pub const DATABASE_URL_ENV: &str = "TASKTREE_DATABASE_URL";
/// Environment variable overriding [`DatabaseConfig::max_connections`].
pub const MAX_CONNECTIONS_ENV: &str = "TASKTREE_DB_MAX_CONNECTIONS";
/// Environment variable overriding [`DatabaseConfig::connect_timeout_secs`].
pub const CONNECT_TIMEOUT_ENV: &str = "TASKTREE_DB_CONNECT_TIMEOUT_SECS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting has an unusable value.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Setting or environment variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/tasktree".to_owned(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl AppConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] for unusable settings.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the default configuration overridden from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides resolved through `lookup`, keyed by environment
    /// variable name, then validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an override cannot be
    /// parsed or the merged configuration is unusable.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(raw) = lookup(MAX_CONNECTIONS_ENV) {
            self.database.max_connections = parse_number(MAX_CONNECTIONS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            self.database.connect_timeout_secs = parse_number(CONNECT_TIMEOUT_ENV, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the settings can be used to build a pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty URL or a zero
    /// connection limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "database.url",
                value: self.database.url.clone(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections",
                value: "0".to_owned(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}
