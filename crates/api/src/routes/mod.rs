pub mod discussion;
pub mod health;
pub mod series;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /series                                          list catalog series
/// /series/{series}                                 one series with its books
/// /series/{series}/overview                        club overview (?members=a,b)
/// /series/{series}/progress/{user}                 get, update (PUT)
/// /series/{series}/books/{ordinal}/comments        gated feed (?user=), post
/// /series/{series}/books/{ordinal}/ceiling         reader's ceiling (?user=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(
        "/series",
        series::router().merge(discussion::router()),
    )
}
