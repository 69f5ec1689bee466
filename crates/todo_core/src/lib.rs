//! Core domain logic for the to-do list service.
//! This crate is the single source of truth for the item store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, DbTarget, SharedConnection};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{NewTodo, NewTodoDraft, RecordId, Todo, TodoPatch, TodoValidationError};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::todo_service::TodoService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
