//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ResultsQuery};
use crate::comparison::{ComparedResult, compare_to_reference};
use crate::optimizer::{LocationId, OptimizationSummary};

/// `GET /summary` → 200 + `OptimizationSummary` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<OptimizationSummary> {
    Json(state.summary.clone())
}

/// Returns every result, optionally compared and filtered.
///
/// `GET /results` → 200 + `Vec<ComparedResult>` JSON
/// `GET /results?reference=N` → deltas against location N
/// `GET /results?meets_target=true` → only target-meeting locations
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> Json<Vec<ComparedResult>> {
    let compared = compare_to_reference(&state.results, query.reference, state.target);
    let filtered = compared
        .into_iter()
        .filter(|c| query.meets_target.is_none_or(|want| c.result.meets_target == want))
        .collect();
    Json(filtered)
}

/// Returns one location.
///
/// `GET /results/{id}` → 200 + `ComparedResult` JSON
/// `GET /results/{unknown}` → 404 + `ErrorResponse`
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<LocationId>,
    Query(query): Query<ResultsQuery>,
) -> impl IntoResponse {
    compare_to_reference(&state.results, query.reference, state.target)
        .into_iter()
        .find(|c| c.result.location_id() == location_id)
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("no result for location {location_id}"),
                }),
            )
        })
}
