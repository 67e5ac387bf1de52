//! Handlers for per-book discussions.
//!
//! Every handler here goes through [`bookclub_core::club::BookClub`], so the
//! reader's or author's progress is applied before any comment is listed or
//! stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookclub_core::catalog::Ordinal;
use bookclub_core::club::Feed;
use bookclub_core::discussion::Comment;
use bookclub_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters naming the reader.
#[derive(Debug, Deserialize)]
pub struct ReaderParams {
    pub user: String,
}

/// Body of `POST /series/{series}/books/{ordinal}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub author: String,
    pub chapter: i64,
    pub content: String,
}

/// A reader's view of one book's discussion.
///
/// Locked feeds serialize as `{"locked": true}` only.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        match feed {
            Feed::Locked => Self {
                locked: true,
                ceiling: None,
                comments: None,
            },
            Feed::Open { ceiling, comments } => Self {
                locked: false,
                ceiling: Some(ceiling),
                comments: Some(comments),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CeilingResponse {
    pub user: String,
    pub series: String,
    pub book_ordinal: Ordinal,
    pub ceiling: u32,
}

fn parse_chapter(chapter: i64) -> Result<u32, CoreError> {
    u32::try_from(chapter)
        .map_err(|_| CoreError::InvalidArgument(format!("Invalid chapter number {chapter}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /series/{series}/books/{ordinal}/comments?user=
///
/// Comments the reader has reached, or `{"locked": true}` for a book they
/// have not started.
pub async fn list_feed(
    State(state): State<AppState>,
    Path((series, ordinal)): Path<(String, String)>,
    AppQuery(params): AppQuery<ReaderParams>,
) -> AppResult<impl IntoResponse> {
    let ordinal: Ordinal = ordinal.parse()?;
    let feed = state
        .club
        .discussion_feed(&params.user, &series, ordinal)
        .await?;
    Ok(Json(DataResponse {
        data: FeedResponse::from(feed),
    }))
}

/// POST /series/{series}/books/{ordinal}/comments
///
/// Rejected with 403 when the chapter is past the author's own progress.
pub async fn post_comment(
    State(state): State<AppState>,
    Path((series, ordinal)): Path<(String, String)>,
    AppJson(input): AppJson<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let ordinal: Ordinal = ordinal.parse()?;
    let chapter = parse_chapter(input.chapter)?;

    let comment = state
        .club
        .post_comment(&input.author, &series, ordinal, chapter, &input.content)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /series/{series}/books/{ordinal}/ceiling?user=
pub async fn get_ceiling(
    State(state): State<AppState>,
    Path((series, ordinal)): Path<(String, String)>,
    AppQuery(params): AppQuery<ReaderParams>,
) -> AppResult<impl IntoResponse> {
    let ordinal: Ordinal = ordinal.parse()?;
    let ceiling = state.club.ceiling(&params.user, &series, ordinal).await?;
    Ok(Json(DataResponse {
        data: CeilingResponse {
            user: params.user,
            series,
            book_ordinal: ordinal,
            ceiling,
        },
    }))
}
