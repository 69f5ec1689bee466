//! Todo use-case service.
//!
//! # Responsibility
//! - Provide the item-store entry points used by the endpoints.
//! - Enforce field presence on creation before touching storage.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::todo::{NewTodoDraft, Todo, TodoPatch};
use crate::repo::todo_repo::{RepoResult, TodoRepository};
use log::debug;

/// Use-case service wrapper for todo CRUD operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a todo from a client-synthesized payload.
    ///
    /// # Contract
    /// - `title`, `id` and `is_completed` must all be present.
    /// - No other validation is performed; store constraints still apply.
    pub fn create_todo(&self, draft: NewTodoDraft) -> RepoResult<Todo> {
        let new_todo = draft.validate()?;
        let todo = self.repo.insert(&new_todo)?;
        debug!(
            "event=todo_insert module=service status=ok record_id={}",
            todo.record_id
        );
        Ok(todo)
    }

    /// Lists every todo, newest first.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let todos = self.repo.list_all()?;
        debug!(
            "event=todo_list module=service status=ok count={}",
            todos.len()
        );
        Ok(todos)
    }

    /// Applies a partial update addressed by internal record ID.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_todo(&self, record_id: &str, patch: &TodoPatch) -> RepoResult<Todo> {
        self.repo.update(record_id, patch)
    }

    /// Deletes a todo by internal record ID.
    pub fn delete_todo(&self, record_id: &str) -> RepoResult<()> {
        self.repo.delete(record_id)
    }
}
