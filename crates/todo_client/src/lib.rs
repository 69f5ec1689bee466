//! Client side of the to-do list.
//!
//! # Responsibility
//! - Talk to the collection/item endpoints through a typed API.
//! - Hold the session's task list and reconcile it with server responses.
//! - Render the summary, list, row and creation form views.

pub mod api;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{ClientError, HttpTodoApi, TodoApi};
pub use state::TodoList;
pub use view::{CreationForm, FormOutcome, ListView, RowMode, RowView, SummaryView};
