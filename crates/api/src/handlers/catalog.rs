//! Handlers for the read-only series catalog.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /series
pub async fn list_series(State(state): State<AppState>) -> impl IntoResponse {
    let series = state.club.catalog().series().to_vec();
    Json(DataResponse { data: series })
}

/// GET /series/{series}
///
/// One series with its books in reading order.
pub async fn get_series(
    State(state): State<AppState>,
    Path(series): Path<String>,
) -> AppResult<impl IntoResponse> {
    let series = state.club.catalog().require_series(&series)?.clone();
    Ok(Json(DataResponse { data: series }))
}
