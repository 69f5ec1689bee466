//! Process-wide store connection with lazy, coalesced initialization.
//!
//! # Responsibility
//! - Open the store on first demand and reuse it for the process lifetime.
//! - Serialize access to the `!Sync` SQLite connection.
//!
//! # Invariants
//! - At most one connection is opened per `SharedConnection`.
//! - Concurrent first callers wait on the in-flight open instead of racing.
//! - A failed open leaves the handle empty; the next caller retries.

use super::{open_target, DbError, DbResult, DbTarget};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rusqlite::Connection;

/// Lazily-opened, shared store connection.
pub struct SharedConnection {
    target: DbTarget,
    cell: OnceCell<Mutex<Connection>>,
}

impl SharedConnection {
    /// Creates an unopened handle for `target`. No I/O happens here.
    pub fn new(target: DbTarget) -> Self {
        Self {
            target,
            cell: OnceCell::new(),
        }
    }

    /// Returns whether the connection has been opened.
    pub fn is_open(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns the shared connection, opening it on first use.
    ///
    /// # Errors
    /// - Propagates open/bootstrap failures; the handle stays unopened.
    pub fn get(&self) -> DbResult<&Mutex<Connection>> {
        if let Some(conn) = self.cell.get() {
            return Ok(conn);
        }

        self.cell.get_or_try_init(|| {
            debug!(
                "event=db_connect module=db status=start mode={}",
                self.target.mode()
            );
            open_target(&self.target).map(Mutex::new).inspect_err(|err| {
                warn!(
                    "event=db_connect module=db status=error mode={} error={}",
                    self.target.mode(),
                    err
                );
            })
        })
    }

    /// Runs `op` with exclusive access to the shared connection.
    pub fn with<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let handle = self.get()?;
        let conn = handle.lock();
        op(&conn)
    }
}
