//! Handlers for reading progress and the club overview.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use bookclub_core::catalog::Ordinal;
use serde::Deserialize;

use crate::config::split_list;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `PUT /series/{series}/progress/{user}`.
///
/// Both fields are taken as plain numbers so out-of-range values reach
/// domain validation and come back as `INVALID_ARGUMENT`.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub book_ordinal: f64,
    pub percent: i32,
}

/// Query parameters for the club overview.
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// Comma-separated member names.
    #[serde(default)]
    pub members: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /series/{series}/progress/{user}
///
/// Stored progress, or the unsaved default (first book, 0%).
pub async fn get_progress(
    State(state): State<AppState>,
    Path((series, user)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let progress = state.club.tracker().get_progress(&user, &series).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// PUT /series/{series}/progress/{user}
pub async fn update_progress(
    State(state): State<AppState>,
    Path((series, user)): Path<(String, String)>,
    AppJson(input): AppJson<UpdateProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let book_ordinal = Ordinal::new(input.book_ordinal)?;
    let progress = state
        .club
        .tracker()
        .update_progress(&user, &series, book_ordinal, input.percent)
        .await?;
    Ok(Json(DataResponse { data: progress }))
}

/// GET /series/{series}/overview?members=a,b
///
/// Each member's progress and the furthest book the whole group has reached.
pub async fn club_overview(
    State(state): State<AppState>,
    Path(series): Path<String>,
    AppQuery(params): AppQuery<OverviewParams>,
) -> AppResult<impl IntoResponse> {
    let members = split_list(&params.members);
    let overview = state.club.overview(&series, &members).await?;
    Ok(Json(DataResponse { data: overview }))
}
