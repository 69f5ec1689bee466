//! `todo` command-line client.
//!
//! Loads the list, performs one action, then prints the summary and list.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use todo_client::{CreationForm, FormOutcome, HttpTodoApi, ListView, RowView, TodoList};
use todo_core::init_logging;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Manage the to-do list over HTTP")]
struct Cli {
    /// Base URL of the todo server.
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Log level written to stderr.
    #[arg(long, env = "TODO_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the list (default).
    List,
    /// Add a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Toggle completion of the task with this id.
    Toggle { id: String },
    /// Replace the title of the task with this id.
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete the task with this id.
    Rm { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level, None) {
        eprintln!("todo: logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let api = HttpTodoApi::new(cli.url);
    let mut list = TodoList::new();
    list.load(&api).await;

    let applied = match cli.command.unwrap_or(Command::List) {
        Command::List => true,
        Command::Add { title } => {
            let mut form = CreationForm::new();
            form.set_input(title.join(" "));
            matches!(
                form.submit(&mut list, &api).await,
                FormOutcome::Created(_)
            )
        }
        Command::Toggle { id } => RowView::new(id).toggle(&mut list, &api).await,
        Command::Edit { id, title } => {
            let mut row = RowView::new(id);
            row.begin_edit();
            let applied = row.input(&mut list, &api, &title.join(" ")).await;
            row.blur();
            applied
        }
        Command::Rm { id } => RowView::new(id).delete(&mut list, &api).await,
    };

    println!("{}\n", list.summary().render());
    println!("{}", ListView::render(list.todos()));

    if applied {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn multi_word_titles_are_collected() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy", "oat", "milk"]).unwrap();
        match cli.command {
            Some(Command::Add { title }) => assert_eq!(title.join(" "), "Buy oat milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_lists() {
        let cli = Cli::try_parse_from(["todo", "--url", "http://example:8080"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.url, "http://example:8080");
    }
}
