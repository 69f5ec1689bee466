//! Typed access to the todo endpoints.
//!
//! # Invariants
//! - Item calls address records by internal `_id`, never by client `id`.
//! - Any non-2xx status is reported as `ClientError::Status`.

use log::debug;
use reqwest::{Client, Response};
use thiserror::Error;
use todo_core::{NewTodo, Todo, TodoPatch};

const COLLECTION_PATH: &str = "/api/todos";

/// Failure of a single endpoint call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The response body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Endpoint operations used by the state container.
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create(&self, todo: &NewTodo) -> Result<Todo, ClientError>;
    async fn update(&self, record_id: &str, patch: &TodoPatch) -> Result<Todo, ClientError>;
    async fn delete(&self, record_id: &str) -> Result<(), ClientError>;
}

/// `TodoApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    base_url: String,
    http: Client,
}

impl HttpTodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.base_url)
    }
}

impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response)?).await
    }

    async fn create(&self, todo: &NewTodo) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(todo)
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response)?).await
    }

    async fn update(&self, record_id: &str, patch: &TodoPatch) -> Result<Todo, ClientError> {
        let response = self
            .http
            .put(self.collection_url())
            .query(&[("id", record_id)])
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        decode(check_status(response)?).await
    }

    async fn delete(&self, record_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.collection_url())
            .query(&[("id", record_id)])
            .send()
            .await
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }
}

fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    debug!(
        "event=api_call module=client status={} url={}",
        status.as_u16(),
        response.url().path()
    );
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status(status.as_u16()))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::HttpTodoApi;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = HttpTodoApi::new("http://localhost:3000/");
        assert_eq!(api.collection_url(), "http://localhost:3000/api/todos");
    }
}
