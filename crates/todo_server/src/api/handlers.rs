//! Request handlers for the collection and item endpoints.
//!
//! # Invariants
//! - Handlers hold no state; every call performs at most one store operation.
//! - Store work runs on the blocking pool against the shared connection.
//! - DELETE answers 204 whether or not a record was removed.

use super::error::{ApiError, ApiErrorResponse};
use super::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use todo_core::{
    core_version, NewTodoDraft, RepoError, RepoResult, SqliteTodoRepository, Todo, TodoPatch,
    TodoService,
};

/// Methods served on the todo routes, as advertised in `Allow`.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Item-scoping query: `?id=<internal record id>`.
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub id: Option<String>,
}

impl ItemQuery {
    fn require_id(self) -> Result<String, ApiErrorResponse> {
        self.id.filter(|id| !id.is_empty()).ok_or_else(|| {
            ApiErrorResponse::bad_request("MISSING_ID", "missing `id` query parameter")
        })
    }
}

/// GET on the collection: every todo, newest first.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Todo>>, ApiErrorResponse> {
    let started_at = Instant::now();
    let todos = run_store(&state, |service| service.list_todos()).await?;
    info!(
        "event=todo_list module=api status=ok count={} duration_ms={}",
        todos.len(),
        started_at.elapsed().as_millis()
    );
    Ok(Json(todos))
}

/// POST on the collection: stores a client-synthesized todo.
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTodoDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiErrorResponse> {
    let started_at = Instant::now();
    let draft = decode_body(body, "todo_create")?;
    let todo = run_store(&state, move |service| service.create_todo(draft)).await?;
    info!(
        "event=todo_create module=api status=ok record_id={} duration_ms={}",
        todo.record_id,
        started_at.elapsed().as_millis()
    );
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT on an item: merges the body into the addressed record.
pub async fn update_todo(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
    body: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiErrorResponse> {
    let started_at = Instant::now();
    let record_id = query.require_id()?;
    let patch = decode_body(body, "todo_update")?;
    let lookup_id = record_id.clone();
    let result = run_store(&state, move |service| {
        service.update_todo(&lookup_id, &patch)
    })
    .await;

    match result {
        Ok(todo) => {
            info!(
                "event=todo_update module=api status=ok record_id={} duration_ms={}",
                record_id,
                started_at.elapsed().as_millis()
            );
            Ok(Json(todo))
        }
        Err(err) => {
            if err.status == StatusCode::NOT_FOUND {
                info!("event=todo_update module=api status=not_found record_id={record_id}");
            }
            Err(err)
        }
    }
}

/// DELETE on an item. Absence of the record is not an error.
pub async fn delete_todo(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<StatusCode, ApiErrorResponse> {
    let started_at = Instant::now();
    let record_id = query.require_id()?;
    let lookup_id = record_id.clone();
    let removed = run_store(&state, move |service| {
        match service.delete_todo(&lookup_id) {
            Ok(()) => Ok(true),
            Err(RepoError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    })
    .await?;

    info!(
        "event=todo_delete module=api status=ok record_id={} removed={} duration_ms={}",
        record_id,
        removed,
        started_at.elapsed().as_millis()
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unsupported methods on the todo routes.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    warn!("event=method_not_allowed module=api status=rejected method={method}");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        format!("Method {method} Not Allowed"),
    )
}

/// Serves the browser page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe. Reports whether the store has been opened yet.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": core_version(),
        "store": if state.db.is_open() { "open" } else { "idle" },
    }))
}

/// Unwraps a JSON body.
///
/// Well-formed JSON whose fields fail to deserialize (wrong types) is a store
/// level failure and answers with the generic 500, like a missing field.
/// Anything the extractor rejects earlier keeps its own 4xx status.
fn decode_body<T>(
    body: Result<Json<T>, JsonRejection>,
    event: &str,
) -> Result<T, ApiErrorResponse> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonDataError(err)) => {
            error!("event={event} module=api status=error error={err}");
            Err(ApiErrorResponse::internal_error("An internal error occurred"))
        }
        Err(rejection) => {
            warn!("event={event} module=api status=rejected error={rejection}");
            Err(ApiErrorResponse::new(
                rejection.status(),
                ApiError::new("INVALID_BODY", rejection.body_text()),
            ))
        }
    }
}

async fn run_store<T, F>(state: &AppState, op: F) -> Result<T, ApiErrorResponse>
where
    T: Send + 'static,
    F: FnOnce(&TodoService<SqliteTodoRepository<'_>>) -> RepoResult<T> + Send + 'static,
{
    let db = Arc::clone(&state.db);
    let joined = tokio::task::spawn_blocking(move || {
        db.with(|conn| op(&TodoService::new(SqliteTodoRepository::new(conn))))
    })
    .await;

    match joined {
        Ok(result) => result.map_err(ApiErrorResponse::from),
        Err(err) => {
            warn!("event=store_task module=api status=error error={err}");
            Err(ApiErrorResponse::internal_error("An internal error occurred"))
        }
    }
}
