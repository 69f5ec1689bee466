//! Process configuration read from the environment.
//!
//! # Invariants
//! - `TODO_DATABASE_URL` is mandatory; the server never starts without it.
//! - Every other setting has a default.

use thiserror::Error;
use todo_core::{default_log_level, DbTarget};

pub const DATABASE_URL_VAR: &str = "TODO_DATABASE_URL";
pub const HOST_VAR: &str = "TODO_HOST";
pub const PORT_VAR: &str = "TODO_PORT";
pub const LOG_LEVEL_VAR: &str = "TODO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TODO_LOG_DIR";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// Startup configuration failure. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0} in environment")]
    Missing(&'static str),
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Server settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database: DbTarget,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    /// - `ConfigError::Missing` when the connection string is absent.
    /// - `ConfigError::Invalid` when the connection string or port cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = var(DATABASE_URL_VAR).ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let database = DbTarget::parse(&database_url).map_err(|err| ConfigError::Invalid {
            name: DATABASE_URL_VAR,
            message: err.to_string(),
        })?;

        let port = match var(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|err| ConfigError::Invalid {
                name: PORT_VAR,
                message: format!("`{raw}` is not a valid port ({err})"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database,
            host: var(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_level: var(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var(LOG_DIR_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, DATABASE_URL_VAR, PORT_VAR};
    use rstest::rstest;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use todo_core::DbTarget;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn missing_database_url_is_fatal() {
        let err = ServerConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_URL_VAR));
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let err = ServerConfig::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DATABASE_URL_VAR));
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "sqlite://todo.db")]))
                .unwrap();
        assert_eq!(config.database, DbTarget::File(PathBuf::from("todo.db")));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.log_dir.is_none());
    }

    #[rstest]
    #[case("0.0.0.0", "8080", 8080)]
    #[case("localhost", "1", 1)]
    fn host_and_port_are_read(#[case] host: &str, #[case] port: &str, #[case] expected: u16) {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            ("TODO_HOST", host),
            (PORT_VAR, port),
        ]))
        .unwrap();
        assert_eq!(config.host, host);
        assert_eq!(config.port, expected);
    }

    #[rstest]
    #[case("http")]
    #[case("70000")]
    fn invalid_port_is_rejected(#[case] port: &str) {
        let err = ServerConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (PORT_VAR, port),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == PORT_VAR));
    }
}
