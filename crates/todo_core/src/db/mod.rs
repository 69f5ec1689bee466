//! SQLite storage bootstrap, schema migrations and the shared connection.
//!
//! # Responsibility
//! - Parse the store connection string into an open target.
//! - Open and configure SQLite connections for the todo store.
//! - Apply schema migrations in deterministic order.
//! - Hold the single process-wide connection, opened on first use.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;
mod shared;

pub use open::{open_db, open_db_in_memory, open_target};
pub use shared::SharedConnection;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    InvalidConnectionString(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidConnectionString(message) => {
                write!(f, "invalid connection string: {message}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidConnectionString(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Where the store lives, as named by the connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    /// Private in-memory database, lost on process exit.
    Memory,
    /// SQLite database file.
    File(PathBuf),
}

impl DbTarget {
    /// Parses a store connection string.
    ///
    /// Accepted forms:
    /// - `sqlite::memory:` or `:memory:` -> in-memory store
    /// - `sqlite://<path>` or `sqlite:<path>` -> file store
    /// - any other non-empty value -> file path
    ///
    /// # Errors
    /// - Returns `DbError::InvalidConnectionString` for blank input or a
    ///   scheme prefix with no path.
    pub fn parse(connection_string: &str) -> DbResult<Self> {
        let trimmed = connection_string.trim();
        if trimmed.is_empty() {
            return Err(DbError::InvalidConnectionString(
                "connection string cannot be empty".to_string(),
            ));
        }
        if trimmed == ":memory:" || trimmed == "sqlite::memory:" {
            return Ok(Self::Memory);
        }

        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        if path.is_empty() {
            return Err(DbError::InvalidConnectionString(format!(
                "`{trimmed}` does not name a database path"
            )));
        }
        Ok(Self::File(PathBuf::from(path)))
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}
