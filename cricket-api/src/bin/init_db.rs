//! init-db - create or verify the cricket match database
//!
//! Runs the same initialization the service does at startup, then reports
//! the Matches table layout and how many matches are stored.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cricket_common::config::{ConfigOverrides, ServiceConfig};
use cricket_common::db::{count_matches, init_database, matches_table_info};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "init-db")]
#[command(about = "Create or verify the cricket match database")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, env = "CRICKET_DATABASE")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "CRICKET_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = ServiceConfig::resolve(ConfigOverrides {
        config_file: args.config,
        database_path: args.database,
        ..Default::default()
    })
    .context("Failed to load configuration")?;

    if let Some(path) = &config.config_file {
        info!("Loaded config file: {}", path.display());
    }

    let db_path = config.database_path;
    if db_path.exists() {
        info!("Database file already exists at: {}", db_path.display());
    } else {
        info!("Creating new database file at: {}", db_path.display());
    }

    let pool = init_database(&db_path)
        .await
        .context("Database initialization failed")?;

    info!("Verifying database structure...");
    let columns = matches_table_info(&pool).await?;
    info!("Matches table structure:");
    for column in &columns {
        info!(
            "   - {}: {}{}{}",
            column.name,
            column.column_type,
            if column.primary_key { " (PRIMARY KEY)" } else { "" },
            if column.not_null { " NOT NULL" } else { "" }
        );
    }

    let count = count_matches(&pool).await?;
    info!("Current matches in database: {}", count);
    info!("Database initialized successfully at {}", db_path.display());

    pool.close().await;
    Ok(())
}
