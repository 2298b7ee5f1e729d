//! HTTP API handlers for cricket-api

pub mod health;
pub mod matches;
pub mod upload;

pub use health::health_routes;
pub use matches::{get_match_json, list_all_matches, list_matches, list_tournaments, list_years};
pub use upload::upload_matches;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
