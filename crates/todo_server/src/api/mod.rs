//! Routing and shared request state.
//!
//! # Routes
//!
//! | Path | Methods | Purpose |
//! |---|---|---|
//! | `/` | GET | browser page |
//! | `/health` | GET | liveness probe |
//! | `/api/todos` | GET, POST | collection endpoint |
//! | `/api/todos?id=<_id>` | PUT, DELETE | item endpoint |
//!
//! `/api/handler` and `/api/items` are aliases of `/api/todos`. Any other
//! method on the todo routes answers 405 with an `Allow` header.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ApiErrorResponse};

use axum::routing::{get, MethodRouter};
use axum::Router;
use std::sync::Arc;
use todo_core::{DbTarget, SharedConnection};

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SharedConnection>,
}

impl AppState {
    /// Creates state for `target`; the connection opens on first request.
    pub fn new(target: DbTarget) -> Self {
        Self {
            db: Arc::new(SharedConnection::new(target)),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let todos: MethodRouter<AppState> = get(handlers::list_todos)
        .post(handlers::create_todo)
        .put(handlers::update_todo)
        .delete(handlers::delete_todo)
        .fallback(handlers::method_not_allowed);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/todos", todos.clone())
        .route("/api/handler", todos.clone())
        .route("/api/items", todos)
        .with_state(state)
}
