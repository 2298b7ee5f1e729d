//! cricket-api - Cricket match ingestion and lookup service
//!
//! Accepts batches of match JSON files, stores the new ones in SQLite and
//! serves them back grouped by tournament and year.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cricket_common::config::{ConfigOverrides, ServiceConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_api::db::SqliteMatchStore;
use cricket_api::{build_router, AppState, UploadLimits};

/// Command-line arguments for cricket-api
#[derive(Parser, Debug)]
#[command(name = "cricket-api")]
#[command(about = "Cricket match ingestion and lookup service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "CRICKET_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "CRICKET_HOST")]
    host: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "CRICKET_DATABASE")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "CRICKET_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CRICKET_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ServiceConfig::resolve(ConfigOverrides {
        config_file: args.config,
        database_path: args.database,
        host: args.host,
        port: args.port,
        log_level: args.log_level,
    })
    .context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    info!(
        "Starting cricket-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config.config_file {
        Some(path) => info!("Loaded config file: {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }
    info!("Database path: {}", config.database_path.display());

    // Opened once here, closed once after the server drains
    let store = SqliteMatchStore::open(&config.database_path)
        .await
        .context("Failed to open database")?;
    info!("Connected to SQLite database");

    let limits = UploadLimits {
        max_body_bytes: config.max_body_bytes,
        max_file_bytes: config.max_file_bytes,
    };
    let state = AppState::new(Arc::new(store.clone()), limits);
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("cricket-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Upload endpoint: http://{}/api/match/upload", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins; otherwise the configured level for our crates
fn init_tracing(level: &str) {
    let default_filter = match level {
        "trace" | "debug" => format!(
            "cricket_api={level},cricket_common={level},tower_http=debug"
        ),
        _ => format!("cricket_api={level},cricket_common={level},tower_http=warn"),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
