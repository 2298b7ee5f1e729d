//! SQLite implementation of [`MatchStore`]

use async_trait::async_trait;
use cricket_common::db::{MatchRecord, MatchSummary, NewMatch, Tournament};
use cricket_common::Result;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::path::Path;

use super::MatchStore;

/// Match store backed by a SQLite connection pool
#[derive(Clone)]
pub struct SqliteMatchStore {
    pool: SqlitePool,
}

impl SqliteMatchStore {
    /// Wrap an already initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file and its schema
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = cricket_common::db::init_database(db_path).await?;
        Ok(Self::new(pool))
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; called once at shutdown
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}

fn record_from_row(row: &SqliteRow) -> MatchRecord {
    MatchRecord {
        id: row.get("Id"),
        tournament_name: row.get("TournamentName"),
        year: row.get("Year"),
        match_id: row.get("MatchId"),
        json_data: row.get("JsonData"),
    }
}

#[async_trait]
impl MatchStore for SqliteMatchStore {
    async fn insert_match(&self, new_match: NewMatch<'_>) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO Matches (TournamentName, Year, MatchId, JsonData)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(new_match.tournament_name)
        .bind(new_match.year)
        .bind(new_match.match_id)
        .bind(new_match.json_data)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn match_exists(&self, tournament_name: &str, match_id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM Matches WHERE TournamentName = ? AND MatchId = ?",
        )
        .bind(tournament_name)
        .bind(match_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn tournaments(&self) -> Result<Vec<Tournament>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT TournamentName FROM Matches ORDER BY TournamentName ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(Tournament::new).collect())
    }

    async fn years(&self, tournament_name: &str) -> Result<Vec<String>> {
        let years: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT Year FROM Matches WHERE TournamentName = ? ORDER BY Year DESC",
        )
        .bind(tournament_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(years)
    }

    async fn matches_for_year(
        &self,
        tournament_name: &str,
        year: &str,
    ) -> Result<Vec<MatchSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT Id, MatchId, JsonData
            FROM Matches
            WHERE TournamentName = ? AND Year = ?
            ORDER BY Id ASC
            "#,
        )
        .bind(tournament_name)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| MatchSummary {
                id: row.get("Id"),
                match_id: row.get("MatchId"),
                json_data: row.get("JsonData"),
            })
            .collect())
    }

    async fn all_matches(&self, tournament_name: &str) -> Result<Vec<MatchRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT Id, TournamentName, Year, MatchId, JsonData
            FROM Matches
            WHERE TournamentName = ?
            ORDER BY Id ASC
            "#,
        )
        .bind(tournament_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    async fn match_by_id(&self, id: i64) -> Result<Option<MatchRecord>> {
        let row = sqlx::query(
            r#"
            SELECT Id, TournamentName, Year, MatchId, JsonData
            FROM Matches
            WHERE Id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }
}
