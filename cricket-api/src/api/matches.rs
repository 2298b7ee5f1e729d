//! Match query endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use cricket_common::db::{MatchRecord, MatchSummary, Tournament};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/match/tournaments
pub async fn list_tournaments(State(state): State<AppState>) -> ApiResult<Json<Vec<Tournament>>> {
    Ok(Json(state.queries.tournaments().await?))
}

/// GET /api/match/years/:tournament_name
pub async fn list_years(
    State(state): State<AppState>,
    Path(tournament_name): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.queries.years(&tournament_name).await?))
}

/// GET /api/match/matches/:tournament_name/:year
pub async fn list_matches(
    State(state): State<AppState>,
    Path((tournament_name, year)): Path<(String, String)>,
) -> ApiResult<Json<Vec<MatchSummary>>> {
    Ok(Json(
        state
            .queries
            .matches_for_year(&tournament_name, &year)
            .await?,
    ))
}

/// GET /api/match/matches/:tournament_name/all
pub async fn list_all_matches(
    State(state): State<AppState>,
    Path(tournament_name): Path<String>,
) -> ApiResult<Json<Vec<MatchRecord>>> {
    Ok(Json(state.queries.all_matches(&tournament_name).await?))
}

/// GET /api/match/match/:id
///
/// Responds with the stored document text unchanged.
pub async fn get_match_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let document = state.queries.match_document(&id).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], document).into_response())
}
