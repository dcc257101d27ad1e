//! Roster lookup server
//!
//! Usage:
//!     roster-server --db roster.db --port 8080
//!     ROSTER_DB=roster.db ROSTER_STRATEGY=query-time roster-server

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use roster_server::logging::{self, prefix};
use roster_server::{build_service, router, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::init_with_filter(&config.log_level);

    info!("{} Starting roster-server {}", prefix::OPEN, env!("CARGO_PKG_VERSION"));
    config.validate()?;
    let addr = config.socket_addr()?;

    let service = build_service(&config)?;

    let sweeper = config
        .cache_sweep_interval()
        .map(|every| service.cache().clone().spawn_sweeper(every));

    let listener = TcpListener::bind(addr).await?;
    info!("{} Listening on http://{}", prefix::OPEN, listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    info!("{} Shutdown complete", prefix::CLOSE);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("{} Received Ctrl+C, shutting down", prefix::CLOSE);
        }
        _ = terminate => {
            info!("{} Received terminate signal, shutting down", prefix::CLOSE);
        }
    }
}
