//! Batch ingestion of uploaded match files
//!
//! Each file runs parse → extract → duplicate check → insert to completion
//! before the next one starts. Whatever goes wrong with one file becomes
//! that file's [`FileOutcome`]; it never stops the rest of the batch.

use cricket_common::db::NewMatch;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::db::MatchStore;
use crate::models::{BatchResult, FileOutcome, UploadedFile};
use crate::services::duplicate_checker::DuplicateChecker;
use crate::services::metadata_extractor::extract_metadata;

/// Runs upload batches against a match store
#[derive(Clone)]
pub struct BatchIngestor {
    store: Arc<dyn MatchStore>,
}

impl BatchIngestor {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Process every file in order and summarize the outcomes
    pub async fn ingest(&self, files: &[UploadedFile]) -> BatchResult {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            let outcome = self.process_file(file).await;
            outcomes.push((file.name.as_str(), outcome));
        }

        let result = BatchResult::from_outcomes(outcomes);
        debug_assert_eq!(result.total(), files.len());

        info!(
            files = files.len(),
            uploaded = result.uploaded,
            failed = result.failed,
            duplicates = result.duplicates,
            "Upload batch processed"
        );

        result
    }

    /// Classify a single file, storing it when it is new
    pub async fn process_file(&self, file: &UploadedFile) -> FileOutcome {
        let text = match std::str::from_utf8(&file.content) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %file.name, error = %e, "File is not valid UTF-8 text");
                return FileOutcome::ParseFailed {
                    reason: e.to_string(),
                };
            }
        };

        let document: Value = match serde_json::from_str(text) {
            Ok(document) => document,
            Err(e) => {
                warn!(file = %file.name, error = %e, "File is not valid JSON");
                return FileOutcome::ParseFailed {
                    reason: e.to_string(),
                };
            }
        };

        let metadata = extract_metadata(&document);

        let checker = DuplicateChecker::new(self.store.as_ref());
        match checker
            .is_duplicate(&metadata.tournament_name, &file.name)
            .await
        {
            Ok(true) => {
                debug!(
                    file = %file.name,
                    tournament = %metadata.tournament_name,
                    "Match already stored"
                );
                return FileOutcome::Duplicate;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(file = %file.name, error = %e, "Duplicate check failed");
                return FileOutcome::StoreFailed {
                    reason: e.to_string(),
                };
            }
        }

        let new_match = NewMatch {
            tournament_name: &metadata.tournament_name,
            year: &metadata.year,
            match_id: &file.name,
            json_data: text,
        };

        match self.store.insert_match(new_match).await {
            Ok(id) => {
                debug!(
                    file = %file.name,
                    id,
                    tournament = %metadata.tournament_name,
                    year = %metadata.year,
                    "Match stored"
                );
                FileOutcome::Inserted { id }
            }
            // Another request stored the same key between our check and insert
            Err(e) if e.is_unique_violation() => {
                debug!(file = %file.name, "Match stored concurrently by another upload");
                FileOutcome::Duplicate
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "Failed to store match");
                FileOutcome::StoreFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
