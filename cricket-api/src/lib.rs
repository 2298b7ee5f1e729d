//! cricket-api library
//!
//! Match file ingestion (parse, extract, dedup, store) and read-only
//! lookups grouped by tournament and year, served over HTTP.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::db::MatchStore;
use crate::services::{BatchIngestor, MatchQueryService};

/// Request and per-file size limits for uploads
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_body_bytes: usize,
    pub max_file_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: cricket_common::config::DEFAULT_MAX_BODY_BYTES,
            max_file_bytes: cricket_common::config::DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Batch upload processing
    pub ingestor: BatchIngestor,
    /// Read-only lookups
    pub queries: MatchQueryService,
    pub limits: UploadLimits,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create application state around an opened store
    pub fn new(store: Arc<dyn MatchStore>, limits: UploadLimits) -> Self {
        Self {
            ingestor: BatchIngestor::new(store.clone()),
            queries: MatchQueryService::new(store),
            limits,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    // The static `all` segment wins over `:year`
    let match_routes = Router::new()
        .route("/upload", post(api::upload_matches))
        .route("/tournaments", get(api::list_tournaments))
        .route("/years/:tournament_name", get(api::list_years))
        .route("/matches/:tournament_name/all", get(api::list_all_matches))
        .route("/matches/:tournament_name/:year", get(api::list_matches))
        .route("/match/:id", get(api::get_match_json));

    let max_body_bytes = state.limits.max_body_bytes;

    Router::new()
        .nest("/api/match", match_routes)
        .merge(api::health_routes())
        .fallback(api::route_not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
