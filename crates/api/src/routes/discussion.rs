//! Route definitions for per-book discussions.
//!
//! Merged into the `/series` tree by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::discussion;
use crate::state::AppState;

/// Discussion routes.
///
/// ```text
/// GET    /{series}/books/{ordinal}/comments   -> list_feed (?user)
/// POST   /{series}/books/{ordinal}/comments   -> post_comment
/// GET    /{series}/books/{ordinal}/ceiling    -> get_ceiling (?user)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{series}/books/{ordinal}/comments",
            get(discussion::list_feed).post(discussion::post_comment),
        )
        .route(
            "/{series}/books/{ordinal}/ceiling",
            get(discussion::get_ceiling),
        )
}
