//! Todo domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its wire shape.
//! - Define creation and partial-update payloads.
//!
//! # Invariants
//! - `id` is client-issued and immutable after creation.
//! - `created_at` is assigned once by the store and only used for ordering.
//! - A `TodoPatch` never touches `id`, `_id` or `createdAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned internal identifier used for update/delete addressing.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = String;

/// A persisted task.
///
/// Field names on the wire follow the document-store shape consumed by the
/// browser client (`_id`, `is_completed`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Internal identifier assigned by the store.
    #[serde(rename = "_id")]
    pub record_id: RecordId,
    pub title: String,
    /// Client-issued identity, unique across all stored tasks.
    pub id: String,
    pub is_completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Returns a copy with `patch` applied.
    pub fn patched(&self, patch: &TodoPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(is_completed) = patch.is_completed {
            next.is_completed = is_completed;
        }
        next
    }
}

/// Creation payload: the client-synthesized part of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub id: String,
    pub is_completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, id: impl Into<String>, is_completed: bool) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            is_completed,
        }
    }
}

/// Creation payload as received over the wire, before presence checks.
///
/// Every field is optional so that absent fields reach the store boundary
/// and fail there instead of in the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoDraft {
    pub title: Option<String>,
    pub id: Option<String>,
    pub is_completed: Option<bool>,
}

impl NewTodoDraft {
    /// Checks that every required field is present.
    ///
    /// # Errors
    /// - Returns `TodoValidationError::MissingField` naming the first absent field.
    pub fn validate(self) -> Result<NewTodo, TodoValidationError> {
        let title = self
            .title
            .ok_or(TodoValidationError::MissingField("title"))?;
        let id = self.id.ok_or(TodoValidationError::MissingField("id"))?;
        let is_completed = self
            .is_completed
            .ok_or(TodoValidationError::MissingField("is_completed"))?;
        Ok(NewTodo {
            title,
            id,
            is_completed,
        })
    }
}

impl From<NewTodo> for NewTodoDraft {
    fn from(value: NewTodo) -> Self {
        Self {
            title: Some(value.title),
            id: Some(value.id),
            is_completed: Some(value.is_completed),
        }
    }
}

/// Partial update for a stored task.
///
/// Unknown keys in the incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            is_completed: None,
        }
    }

    pub fn completion(is_completed: bool) -> Self {
        Self {
            title: None,
            is_completed: Some(is_completed),
        }
    }
}

/// Creation payload rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    MissingField(&'static str),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "todo validation failed: `{field}` is required"),
        }
    }
}

impl Error for TodoValidationError {}
