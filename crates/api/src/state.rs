use std::sync::Arc;

use bookclub_core::club::BookClub;
use bookclub_core::store::SharedStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Progress tracker, spoiler gate and discussion repository.
    pub club: BookClub,
    /// The store behind `club`, kept for health probes.
    pub store: SharedStore,
    pub config: Arc<ServerConfig>,
}
