//! HTTP surface for the to-do list.
//!
//! # Responsibility
//! - Expose the collection and item endpoints over the core item store.
//! - Serve the browser page that drives those endpoints.
//! - Load process configuration from the environment.

pub mod api;
pub mod config;

pub use api::{build_router, AppState};
pub use config::{ConfigError, ServerConfig};

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

/// Binds the configured address and serves until a shutdown signal arrives.
///
/// The store connection is not opened here; the first request opens it.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::new(config.database.clone());
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "event=server_listen module=server status=ok addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(
                    "event=signal_install module=server status=error signal=sigterm error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
