//! Route definitions for the catalog and reading progress.
//!
//! Mounted at `/series` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{catalog, progress};
use crate::state::AppState;

/// Series routes.
///
/// ```text
/// GET    /                           -> list_series
/// GET    /{series}                   -> get_series
/// GET    /{series}/overview          -> club_overview (?members)
/// GET    /{series}/progress/{user}   -> get_progress
/// PUT    /{series}/progress/{user}   -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_series))
        .route("/{series}", get(catalog::get_series))
        .route("/{series}/overview", get(progress::club_overview))
        .route(
            "/{series}/progress/{user}",
            get(progress::get_progress).put(progress::update_progress),
        )
}
