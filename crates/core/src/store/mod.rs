//! Storage backend seam.
//!
//! The book club persists two kinds of document: one progress record per
//! (user, series) and an append-only collection of discussion comments. Each
//! write is a single document, so the backend only needs per-document
//! atomicity; there are no cross-document transactions.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::discussion::{Comment, CommentQuery};
use crate::error::CoreError;
use crate::progress::ReadingProgress;

/// A document store holding progress records and discussion comments.
///
/// Implementations report every backend failure as
/// [`CoreError::StorageUnavailable`] and never retry on their own.
#[async_trait]
pub trait BookClubStore: Send + Sync {
    /// Point read of the `(user, series)` progress record.
    async fn find_progress(
        &self,
        user: &str,
        series: &str,
    ) -> Result<Option<ReadingProgress>, CoreError>;

    /// Insert or fully replace the `(user, series)` progress record.
    async fn upsert_progress(
        &self,
        progress: &ReadingProgress,
    ) -> Result<ReadingProgress, CoreError>;

    /// Comments for one book with `chapter <= query.max_chapter`, ordered by
    /// chapter, then creation time, then insertion order.
    async fn list_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>, CoreError>;

    /// Persist a new comment and return it as stored.
    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, CoreError>;

    /// Cheap connectivity probe used by health checks.
    async fn ping(&self) -> Result<(), CoreError>;
}

/// Handle shared by the tracker, the repository and the HTTP state.
pub type SharedStore = Arc<dyn BookClubStore>;
