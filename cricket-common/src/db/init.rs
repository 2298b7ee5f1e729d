//! Database initialization
//!
//! Opens (creating on first run) the SQLite database that holds match
//! records. Table and column names match the existing cricket.db layout,
//! so databases created by earlier releases open unchanged.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// SQLite busy timeout applied to every connection
const BUSY_TIMEOUT_MS: u32 = 5000;

/// One column as reported by `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets readers proceed while an upload is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    let pragma_sql = format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS);
    sqlx::query(&pragma_sql).execute(&pool).await?;

    create_matches_table(&pool).await?;
    create_match_key_index(&pool).await;

    info!("Matches table ready");
    Ok(pool)
}

/// Create the Matches table
///
/// One row per accepted match file. `JsonData` holds the document text
/// exactly as uploaded.
pub async fn create_matches_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Matches (
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            TournamentName TEXT NOT NULL,
            Year TEXT NOT NULL,
            MatchId TEXT NOT NULL,
            JsonData TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Enforce the (TournamentName, MatchId) dedup key at the storage level
///
/// Best effort: a database written by an older service may already hold
/// duplicate pairs, in which case the index cannot be built. Uploads still
/// dedup through the existence check, only the concurrent-request race is
/// left uncovered.
pub async fn create_match_key_index(pool: &SqlitePool) {
    let result = sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_matches_tournament_match
        ON Matches (TournamentName, MatchId)
        "#,
    )
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!(
            error = %e,
            "Could not create unique index on (TournamentName, MatchId); continuing without it"
        );
    }
}

/// Column layout of the Matches table
pub async fn matches_table_info(pool: &SqlitePool) -> Result<Vec<ColumnInfo>> {
    let rows = sqlx::query("PRAGMA table_info(Matches)")
        .fetch_all(pool)
        .await?;

    // PRAGMA table_info returns: (cid, name, type, notnull, dflt_value, pk)
    Ok(rows
        .iter()
        .map(|row| ColumnInfo {
            name: row.get::<String, _>(1),
            column_type: row.get::<String, _>(2),
            not_null: row.get::<i64, _>(3) != 0,
            primary_key: row.get::<i64, _>(5) != 0,
        })
        .collect())
}

/// Number of stored match records
pub async fn count_matches(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Matches")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
