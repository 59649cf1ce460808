//! # Bazaar API
//!
//! HTTP server entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (3000) ───► axum Router ───► bazaar-db ───► SQLite   │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                              bazaar-core                                │
//! │                  (filters, envelopes, error mapping)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use bazaar_api::{app, ApiConfig, AppState};
use bazaar_db::Database;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("loading configuration")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Bazaar API server...");
    info!(
        addr = %config.socket_addr(),
        database = %config.database_path.display(),
        strict_price_params = config.strict_price_params,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;
    info!("Database ready");

    let router = app(AppState::new(db.clone(), config.price_parsing()));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
