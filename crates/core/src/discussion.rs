//! Per-chapter discussion comments.
//!
//! Comments are immutable once written. Reads are filtered by a chapter
//! ceiling and always come back in feed order: earlier chapters first and,
//! within a chapter, oldest first.
//!
//! The repository deliberately does not consult the spoiler gate on writes;
//! authorizing the author against their own progress happens at the call
//! site (see [`crate::club::BookClub::post_comment`]).

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Book, Catalog, Ordinal};
use crate::error::CoreError;
use crate::progress::validate_user;
use crate::store::SharedStore;
use crate::types::{CommentId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of comment content in characters, after trimming.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A stored discussion comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub series: String,
    pub book_ordinal: Ordinal,
    pub chapter: u32,
    pub author: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Filter for a single book's feed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentQuery {
    pub series: String,
    pub book_ordinal: Ordinal,
    /// Inclusive chapter ceiling.
    pub max_chapter: u32,
}

impl CommentQuery {
    pub fn matches(&self, comment: &Comment) -> bool {
        comment.series == self.series
            && comment.book_ordinal == self.book_ordinal
            && comment.chapter <= self.max_chapter
    }
}

/// Feed ordering: chapter ascending, then creation time ascending.
///
/// Stores sort stably with this so equal timestamps keep insertion order.
pub fn feed_order(a: &Comment, b: &Comment) -> Ordering {
    a.chapter
        .cmp(&b.chapter)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that `chapter` exists in `book` (1-based, inclusive).
pub fn validate_chapter(book: &Book, chapter: u32) -> Result<(), CoreError> {
    if chapter < 1 || chapter > book.chapter_count {
        return Err(CoreError::InvalidArgument(format!(
            "Chapter must be between 1 and {} for '{}', got {chapter}",
            book.chapter_count, book.title
        )));
    }
    Ok(())
}

/// Validate comment content and return it trimmed.
pub fn validate_comment_content(content: &str) -> Result<&str, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidArgument(
            "Comment content cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::InvalidArgument(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Stores and lists comments for catalog books.
#[derive(Clone)]
pub struct DiscussionRepository {
    catalog: Arc<Catalog>,
    store: SharedStore,
}

impl DiscussionRepository {
    pub fn new(catalog: Arc<Catalog>, store: SharedStore) -> Self {
        Self { catalog, store }
    }

    /// All comments on the book with `chapter <= ceiling`, in feed order.
    ///
    /// An unknown series or book yields an empty feed, as does a zero ceiling.
    pub async fn list_comments(
        &self,
        series: &str,
        book_ordinal: Ordinal,
        ceiling: u32,
    ) -> Result<Vec<Comment>, CoreError> {
        if ceiling == 0 || self.catalog.find_book(series, book_ordinal).is_none() {
            return Ok(Vec::new());
        }

        let query = CommentQuery {
            series: series.to_string(),
            book_ordinal,
            max_chapter: ceiling,
        };
        self.store.list_comments(&query).await
    }

    /// Validate and persist a new comment.
    ///
    /// Checks the chapter against the book and rejects empty content or
    /// author. Does not check the author's reading progress.
    pub async fn add_comment(
        &self,
        series: &str,
        book_ordinal: Ordinal,
        chapter: u32,
        author: &str,
        content: &str,
    ) -> Result<Comment, CoreError> {
        let series = self.catalog.require_series(series)?;
        let book = series.require_book(book_ordinal)?;
        validate_user(author)?;
        validate_chapter(book, chapter)?;
        let content = validate_comment_content(content)?;

        let comment = Comment {
            id: Uuid::now_v7(),
            series: series.name.clone(),
            book_ordinal,
            chapter,
            author: author.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let stored = self.store.insert_comment(&comment).await?;

        tracing::info!(
            comment_id = %stored.id,
            series = %stored.series,
            book = %stored.book_ordinal,
            chapter = stored.chapter,
            author = %stored.author,
            "Discussion comment added"
        );
        Ok(stored)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
