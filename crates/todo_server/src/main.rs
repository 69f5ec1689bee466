//! `todo-server` entry point.
//!
//! # Environment Variables
//!
//! - `TODO_DATABASE_URL`: store connection string (required), e.g.
//!   `sqlite://todo.db` or `sqlite::memory:`
//! - `TODO_HOST`: bind host (default: `127.0.0.1`)
//! - `TODO_PORT`: bind port (default: `3000`)
//! - `TODO_LOG_LEVEL`: `trace|debug|info|warn|error`
//! - `TODO_LOG_DIR`: absolute directory for rolling log files (default: stderr)

use log::error;
use std::process::ExitCode;
use todo_core::init_logging;
use todo_server::{serve, ServerConfig};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todo-server: configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("todo-server: logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("event=runtime_start module=server status=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(serve(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_run module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
