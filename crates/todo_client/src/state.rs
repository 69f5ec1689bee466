//! Session task list and its reconciliation rules.
//!
//! # Invariants
//! - Entries are matched by client `id`; requests address records by `_id`.
//! - A failed call leaves the list as it was, except for `delete`, which
//!   removes the entry once the request has completed with any status.
//! - The summary is derived from the list on every call, never cached.

use crate::api::{ClientError, TodoApi};
use crate::view::SummaryView;
use log::{debug, warn};
use todo_core::{NewTodo, Todo, TodoPatch};
use uuid::Uuid;

/// In-memory task list for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Looks up an entry by client `id`.
    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Completed and total counts for the summary view.
    pub fn summary(&self) -> SummaryView {
        SummaryView {
            completed: self.todos.iter().filter(|todo| todo.is_completed).count(),
            total: self.todos.len(),
        }
    }

    /// Replaces the list with the server's. On failure the list is kept.
    pub async fn load<A: TodoApi>(&mut self, api: &A) -> bool {
        match api.list().await {
            Ok(todos) => {
                debug!("event=list_load module=state status=ok count={}", todos.len());
                self.todos = todos;
                true
            }
            Err(err) => {
                warn!("event=list_load module=state status=error error={err}");
                false
            }
        }
    }

    /// Sends a new task with a freshly minted `id` and appends the stored record.
    pub async fn create<A: TodoApi>(&mut self, api: &A, title: &str) -> Option<Todo> {
        let new_todo = NewTodo::new(title, Uuid::new_v4().to_string(), false);
        match api.create(&new_todo).await {
            Ok(created) => {
                self.todos.push(created.clone());
                Some(created)
            }
            Err(err) => {
                warn!("event=todo_create module=state status=error error={err}");
                None
            }
        }
    }

    /// Flips completion of the entry with client `id`.
    pub async fn toggle_complete<A: TodoApi>(&mut self, api: &A, id: &str) -> bool {
        let Some(current) = self.find(id) else {
            return false;
        };
        let patch = TodoPatch::completion(!current.is_completed);
        self.apply_patch(api, id, patch).await
    }

    /// Sets the title of the entry with client `id`.
    pub async fn edit_title<A: TodoApi>(&mut self, api: &A, id: &str, title: &str) -> bool {
        self.apply_patch(api, id, TodoPatch::title(title)).await
    }

    /// Deletes the entry with client `id`.
    ///
    /// The entry is dropped as soon as the request completes; the response
    /// status is not inspected.
    pub async fn delete<A: TodoApi>(&mut self, api: &A, id: &str) -> bool {
        let Some(record_id) = self.find(id).map(|todo| todo.record_id.clone()) else {
            return false;
        };
        match api.delete(&record_id).await {
            Ok(()) | Err(ClientError::Status(_)) => {
                self.todos.retain(|todo| todo.id != id);
                true
            }
            Err(err) => {
                warn!("event=todo_delete module=state status=error error={err}");
                false
            }
        }
    }

    async fn apply_patch<A: TodoApi>(&mut self, api: &A, id: &str, patch: TodoPatch) -> bool {
        let Some(record_id) = self.find(id).map(|todo| todo.record_id.clone()) else {
            return false;
        };
        match api.update(&record_id, &patch).await {
            Ok(updated) => {
                for entry in self.todos.iter_mut().filter(|todo| todo.id == id) {
                    *entry = updated.clone();
                }
                true
            }
            Err(err) => {
                warn!("event=todo_update module=state status=error error={err}");
                false
            }
        }
    }
}
