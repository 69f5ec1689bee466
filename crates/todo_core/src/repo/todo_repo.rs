//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert / list / partial update / delete over `todos` storage.
//! - Assign the internal record identifier and creation timestamp.
//!
//! # Invariants
//! - `list_all` is ordered by `created_at DESC`, ties broken by insertion
//!   order (newest first).
//! - `update` only writes the fields present in the patch.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::todo::{NewTodo, RecordId, Todo, TodoPatch, TodoValidationError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    record_id,
    id,
    title,
    is_completed,
    created_at
FROM todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the item store.
pub trait TodoRepository {
    fn insert(&self, todo: &NewTodo) -> RepoResult<Todo>;
    fn list_all(&self) -> RepoResult<Vec<Todo>>;
    fn update(&self, record_id: &str, patch: &TodoPatch) -> RepoResult<Todo>;
    fn delete(&self, record_id: &str) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find(&self, record_id: &str) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE record_id = ?1;"))?;
        let mut rows = stmt.query([record_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_todo_row(row)?)),
            None => Ok(None),
        }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn insert(&self, todo: &NewTodo) -> RepoResult<Todo> {
        let record = Todo {
            record_id: Uuid::new_v4().simple().to_string(),
            title: todo.title.clone(),
            id: todo.id.clone(),
            is_completed: todo.is_completed,
            created_at: now_millis(),
        };

        self.conn.execute(
            "INSERT INTO todos (
                record_id,
                id,
                title,
                is_completed,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.record_id.as_str(),
                record.id.as_str(),
                record.title.as_str(),
                bool_to_int(record.is_completed),
                record.created_at.timestamp_millis(),
            ],
        )?;

        Ok(record)
    }

    fn list_all(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn update(&self, record_id: &str, patch: &TodoPatch) -> RepoResult<Todo> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = COALESCE(?1, title),
                is_completed = COALESCE(?2, is_completed)
             WHERE record_id = ?3;",
            params![
                patch.title.as_deref(),
                patch.is_completed.map(bool_to_int),
                record_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record_id.to_string()));
        }

        self.find(record_id)?
            .ok_or_else(|| RepoError::NotFound(record_id.to_string()))
    }

    fn delete(&self, record_id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE record_id = ?1;", [record_id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(record_id.to_string()));
        }

        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in todos.is_completed"
            )));
        }
    };

    let created_at_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_at_ms).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid created_at value `{created_at_ms}` in todos.created_at"
        ))
    })?;

    Ok(Todo {
        record_id: row.get("record_id")?,
        title: row.get("title")?,
        id: row.get("id")?,
        is_completed,
        created_at,
    })
}

// Stored at millisecond precision; truncate up front so the returned record
// equals what a later read produces.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
