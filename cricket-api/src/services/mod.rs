//! Ingestion and query services

pub mod batch_ingest;
pub mod duplicate_checker;
pub mod match_queries;
pub mod metadata_extractor;

pub use batch_ingest::BatchIngestor;
pub use duplicate_checker::DuplicateChecker;
pub use match_queries::MatchQueryService;
pub use metadata_extractor::{extract_metadata, MatchMetadata};
