//! In-memory `TodoApi` double for state and view tests.

use crate::api::{ClientError, TodoApi};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use todo_core::{NewTodo, Todo, TodoPatch};

/// How the fake answers the next calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ok,
    Status(u16),
    Offline,
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    calls: Vec<String>,
    next_record: u64,
    mode: Option<Mode>,
}

/// Stores records in memory and records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let api = Self::default();
        api.inner.lock().unwrap().todos = todos;
        api
    }

    pub fn set_mode(&self, mode: Mode) {
        self.inner.lock().unwrap().mode = Some(mode);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn stored(&self) -> Vec<Todo> {
        self.inner.lock().unwrap().todos.clone()
    }

    fn begin(&self, call: String) -> Result<std::sync::MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        match inner.mode.unwrap_or(Mode::Ok) {
            Mode::Ok => Ok(inner),
            Mode::Status(code) => Err(ClientError::Status(code)),
            Mode::Offline => Err(ClientError::Transport("connection refused".to_string())),
        }
    }
}

pub fn todo(record_id: &str, id: &str, title: &str, is_completed: bool) -> Todo {
    Todo {
        record_id: record_id.to_string(),
        title: title.to_string(),
        id: id.to_string(),
        is_completed,
        created_at: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap(),
    }
}

impl TodoApi for FakeApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let inner = self.begin("GET".to_string())?;
        Ok(inner.todos.clone())
    }

    async fn create(&self, new_todo: &NewTodo) -> Result<Todo, ClientError> {
        let mut inner = self.begin("POST".to_string())?;
        inner.next_record += 1;
        let created = todo(
            &format!("r{}", inner.next_record),
            &new_todo.id,
            &new_todo.title,
            new_todo.is_completed,
        );
        inner.todos.insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, record_id: &str, patch: &TodoPatch) -> Result<Todo, ClientError> {
        let mut inner = self.begin(format!("PUT {record_id}"))?;
        let entry = inner
            .todos
            .iter_mut()
            .find(|todo| todo.record_id == record_id)
            .ok_or(ClientError::Status(404))?;
        *entry = entry.patched(patch);
        Ok(entry.clone())
    }

    async fn delete(&self, record_id: &str) -> Result<(), ClientError> {
        let mut inner = self.begin(format!("DELETE {record_id}"))?;
        inner.todos.retain(|todo| todo.record_id != record_id);
        Ok(())
    }
}
