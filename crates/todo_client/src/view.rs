//! Terminal renderings of the summary, list, row and creation form.
//!
//! Views own no task data. Rows and the form hold only UI state (edit mode,
//! input text) and route every action through `TodoList`.

use crate::api::TodoApi;
use crate::state::TodoList;
use todo_core::Todo;

/// Shown when the list has no entries.
pub const EMPTY_PLACEHOLDER: &str = "Seems lonely in here, what are you up to?";

const STRIKE_ON: &str = "\u{1b}[9m";
const STYLE_OFF: &str = "\u{1b}[0m";

/// Progress summary, derived from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryView {
    pub completed: usize,
    pub total: usize,
}

impl SummaryView {
    pub fn render(&self) -> String {
        format!(
            "Task Done  {}/{}\nKeep it up",
            self.completed, self.total
        )
    }
}

/// The task list.
pub struct ListView;

impl ListView {
    /// One display-mode row per task, or the placeholder when empty.
    pub fn render(todos: &[Todo]) -> String {
        if todos.is_empty() {
            return EMPTY_PLACEHOLDER.to_string();
        }
        todos
            .iter()
            .enumerate()
            .map(|(position, todo)| {
                format!("{:>2}. {}", position + 1, RowView::new(&todo.id).render(todo))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Display,
    Editing,
}

/// One task row, keyed by client `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    id: String,
    mode: RowMode,
}

impl RowView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: RowMode::Display,
        }
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    /// Edit control: switches to an input pre-filled with the title.
    pub fn begin_edit(&mut self) {
        self.mode = RowMode::Editing;
    }

    /// Input lost focus.
    pub fn blur(&mut self) {
        self.mode = RowMode::Display;
    }

    /// One keystroke in edit mode; `text` is the whole input value.
    ///
    /// Every call sends an update right away. There is no debounce and no
    /// ordering between in-flight updates.
    pub async fn input<A: TodoApi>(&self, list: &mut TodoList, api: &A, text: &str) -> bool {
        if self.mode != RowMode::Editing {
            return false;
        }
        list.edit_title(api, &self.id, text).await
    }

    /// Toggle-complete control.
    pub async fn toggle<A: TodoApi>(&self, list: &mut TodoList, api: &A) -> bool {
        list.toggle_complete(api, &self.id).await
    }

    /// Delete control.
    pub async fn delete<A: TodoApi>(&self, list: &mut TodoList, api: &A) -> bool {
        list.delete(api, &self.id).await
    }

    pub fn render(&self, todo: &Todo) -> String {
        match self.mode {
            RowMode::Editing => format!("> {}_", todo.title),
            RowMode::Display => {
                let (marker, title) = if todo.is_completed {
                    ("●", format!("{STRIKE_ON}{}{STYLE_OFF}", todo.title))
                } else {
                    ("○", todo.title.clone())
                };
                format!("{marker} {title}  [edit] [delete]  ({})", todo.id)
            }
        }
    }
}

/// Result of submitting the creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Empty or whitespace-only input; nothing was sent.
    Rejected,
    /// The create call failed; the input is kept.
    Failed,
    Created(Todo),
}

/// Single-input creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationForm {
    input: String,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submits the current input. The input is cleared only on success.
    pub async fn submit<A: TodoApi>(&mut self, list: &mut TodoList, api: &A) -> FormOutcome {
        if self.input.trim().is_empty() {
            return FormOutcome::Rejected;
        }
        match list.create(api, &self.input).await {
            Some(created) => {
                self.input.clear();
                FormOutcome::Created(created)
            }
            None => FormOutcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{todo, FakeApi, Mode};

    #[test]
    fn summary_renders_progress() {
        let view = SummaryView {
            completed: 1,
            total: 3,
        };
        assert!(view.render().contains("1/3"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(ListView::render(&[]), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn list_renders_one_row_per_task() {
        let todos = vec![todo("r1", "u1", "a", false), todo("r2", "u2", "b", true)];
        let rendered = ListView::render(&todos);
        assert!(!rendered.ends_with('\n'));
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("(u1)"));
        assert!(rendered.contains("(u2)"));
    }

    #[test]
    fn completed_row_is_struck_through() {
        let row = RowView::new("u1");
        assert!(row
            .render(&todo("r1", "u1", "done", true))
            .contains("\u{1b}[9mdone"));
        assert!(!row
            .render(&todo("r1", "u1", "open", false))
            .contains("\u{1b}[9m"));
    }

    #[test]
    fn edit_mode_shows_input_until_blur() {
        let mut row = RowView::new("u1");
        let item = todo("r1", "u1", "draft", false);

        row.begin_edit();
        assert_eq!(row.mode(), RowMode::Editing);
        assert_eq!(row.render(&item), "> draft_");

        row.blur();
        assert_eq!(row.mode(), RowMode::Display);
    }

    #[tokio::test]
    async fn every_keystroke_sends_an_update() {
        let api = FakeApi::with_todos(vec![todo("r1", "u1", "Bu", false)]);
        let mut list = TodoList::new();
        list.load(&api).await;
        let mut row = RowView::new("u1");

        assert!(!row.input(&mut list, &api, "ignored").await);

        row.begin_edit();
        for text in ["Buy", "Buy ", "Buy m"] {
            assert!(row.input(&mut list, &api, text).await);
        }
        row.blur();

        assert_eq!(list.find("u1").unwrap().title, "Buy m");
        assert_eq!(api.calls(), vec!["GET", "PUT r1", "PUT r1", "PUT r1"]);
    }

    #[tokio::test]
    async fn whitespace_submit_sends_nothing() {
        let api = FakeApi::default();
        let mut list = TodoList::new();
        let mut form = CreationForm::new();
        form.set_input("   \t");

        assert_eq!(form.submit(&mut list, &api).await, FormOutcome::Rejected);
        assert!(api.calls().is_empty());
        assert!(list.todos().is_empty());
        assert_eq!(form.input(), "   \t");
    }

    #[tokio::test]
    async fn submit_clears_input_only_on_success() {
        let api = FakeApi::default();
        let mut list = TodoList::new();
        let mut form = CreationForm::new();

        api.set_mode(Mode::Status(500));
        form.set_input("Buy milk");
        assert_eq!(form.submit(&mut list, &api).await, FormOutcome::Failed);
        assert_eq!(form.input(), "Buy milk");

        api.set_mode(Mode::Ok);
        let outcome = form.submit(&mut list, &api).await;
        assert!(matches!(outcome, FormOutcome::Created(ref todo) if todo.title == "Buy milk"));
        assert_eq!(form.input(), "");
        assert_eq!(list.todos().len(), 1);
    }

    #[tokio::test]
    async fn row_controls_route_through_list() {
        let api = FakeApi::with_todos(vec![todo("r1", "u1", "a", false)]);
        let mut list = TodoList::new();
        list.load(&api).await;
        let row = RowView::new("u1");

        assert!(row.toggle(&mut list, &api).await);
        assert_eq!(list.summary().completed, 1);

        assert!(row.delete(&mut list, &api).await);
        assert_eq!(ListView::render(list.todos()), EMPTY_PLACEHOLDER);
    }
}
