//! Read-only match lookups
//!
//! Thin layer over [`MatchStore`] that validates path parameters and turns
//! a missing record into [`ApiError::NotFound`].

use cricket_common::db::{MatchRecord, MatchSummary, Tournament};
use std::sync::Arc;

use crate::db::MatchStore;
use crate::error::{ApiError, ApiResult};
use crate::services::metadata_extractor::parse_leading_integer;

/// Query operations exposed to the HTTP layer
#[derive(Clone)]
pub struct MatchQueryService {
    store: Arc<dyn MatchStore>,
}

impl MatchQueryService {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    pub async fn tournaments(&self) -> ApiResult<Vec<Tournament>> {
        Ok(self.store.tournaments().await?)
    }

    pub async fn years(&self, tournament_name: &str) -> ApiResult<Vec<String>> {
        Ok(self.store.years(tournament_name).await?)
    }

    /// Matches of a tournament year; `year` is raw path text
    ///
    /// The year is normalized the same way uploads normalize seasons, so
    /// "2023abc" looks up "2023".
    pub async fn matches_for_year(
        &self,
        tournament_name: &str,
        year: &str,
    ) -> ApiResult<Vec<MatchSummary>> {
        let year = parse_leading_integer(year)
            .ok_or_else(|| ApiError::BadRequest("Invalid year parameter".to_string()))?;

        Ok(self
            .store
            .matches_for_year(tournament_name, &year.to_string())
            .await?)
    }

    pub async fn all_matches(&self, tournament_name: &str) -> ApiResult<Vec<MatchRecord>> {
        Ok(self.store.all_matches(tournament_name).await?)
    }

    /// Stored document text of one match; `id` is raw path text
    pub async fn match_document(&self, id: &str) -> ApiResult<String> {
        let id = parse_leading_integer(id)
            .ok_or_else(|| ApiError::BadRequest("Invalid match ID".to_string()))?;

        let record = self
            .store
            .match_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;

        // Stored text was parsed on the way in; anything else is corruption
        if serde_json::from_str::<serde::de::IgnoredAny>(&record.json_data).is_err() {
            return Err(ApiError::Internal(format!(
                "Stored document for match {} is not valid JSON",
                record.id
            )));
        }

        Ok(record.json_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteMatchStore;
    use cricket_common::db::NewMatch;

    async fn service_with_store() -> (MatchQueryService, SqliteMatchStore, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SqliteMatchStore::open(&temp_dir.path().join("cricket.db"))
            .await
            .unwrap();
        (MatchQueryService::new(Arc::new(store.clone())), store, temp_dir)
    }

    async fn insert(store: &SqliteMatchStore, year: &str, match_id: &str, json: &str) -> i64 {
        store
            .insert_match(NewMatch {
                tournament_name: "IPL",
                year,
                match_id,
                json_data: json,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_year_parameter_is_normalized() {
        let (service, store, _dir) = service_with_store().await;
        insert(&store, "2023", "a.json", "{}").await;

        let matches = service.matches_for_year("IPL", "2023abc").await.unwrap();
        assert_eq!(matches.len(), 1);

        let err = service.matches_for_year("IPL", "abc").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "Invalid year parameter"));
    }

    #[tokio::test]
    async fn test_match_document_round_trip() {
        let (service, store, _dir) = service_with_store().await;
        let raw = "{ \"info\" : {\"season\": 2023.50, \"b\": [1,2]} }\n";
        let id = insert(&store, "2023", "a.json", raw).await;

        let document = service.match_document(&id.to_string()).await.unwrap();
        assert_eq!(document, raw);
    }

    #[tokio::test]
    async fn test_match_document_errors() {
        let (service, store, _dir) = service_with_store().await;
        let id = insert(&store, "2023", "a.json", "{}").await;

        let err = service.match_document(&(id + 1).to_string()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = service.match_document("abc").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "Invalid match ID"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_internal_error() {
        let (service, store, _dir) = service_with_store().await;
        let id = insert(&store, "2023", "a.json", "not json").await;

        let err = service.match_document(&id.to_string()).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
