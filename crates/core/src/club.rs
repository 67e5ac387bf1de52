//! The book-club facade.
//!
//! Wires the progress tracker, the spoiler gate and the discussion
//! repository together. This is the only place that reads and writes
//! discussion content on behalf of a user, so it is where the author's own
//! progress is checked before a comment is accepted.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, Ordinal};
use crate::discussion::{validate_chapter, Comment, DiscussionRepository};
use crate::error::CoreError;
use crate::progress::{safe_to_discuss, ProgressTracker, ReadingProgress};
use crate::spoiler::{authorize_comment, feed_access, max_readable_chapter, FeedAccess};
use crate::store::SharedStore;
use crate::types::Timestamp;

/// What a reader sees when opening a book's discussion.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    /// The reader has not started this book; nothing was queried.
    Locked,
    /// Comments up to `ceiling`, in feed order.
    Open {
        ceiling: u32,
        comments: Vec<Comment>,
    },
}

/// One member's line on the club overview.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProgress {
    pub user: String,
    pub book_ordinal: Ordinal,
    /// `None` if the stored ordinal no longer exists in the catalog.
    pub book_title: Option<String>,
    pub percent: u8,
    pub last_update: Option<Timestamp>,
}

/// Every member's progress in a series, plus the group-safe book.
#[derive(Debug, Clone, Serialize)]
pub struct ClubOverview {
    pub series: String,
    pub members: Vec<MemberProgress>,
    /// Everything through this book is safe for the whole group.
    pub safe_to_discuss: Option<Ordinal>,
}

#[derive(Clone)]
pub struct BookClub {
    catalog: Arc<Catalog>,
    tracker: ProgressTracker,
    discussions: DiscussionRepository,
}

impl BookClub {
    pub fn new(catalog: Arc<Catalog>, store: SharedStore) -> Self {
        Self {
            tracker: ProgressTracker::new(Arc::clone(&catalog), Arc::clone(&store)),
            discussions: DiscussionRepository::new(Arc::clone(&catalog), store),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn discussions(&self) -> &DiscussionRepository {
        &self.discussions
    }

    /// The reader's chapter ceiling for one book.
    pub async fn ceiling(
        &self,
        user: &str,
        series: &str,
        book_ordinal: Ordinal,
    ) -> Result<u32, CoreError> {
        let book = self.catalog.require_series(series)?.require_book(book_ordinal)?;
        let progress = self.tracker.get_progress(user, series).await?;
        Ok(max_readable_chapter(&progress, book))
    }

    /// The spoiler-safe comment feed for `user` on one book.
    pub async fn discussion_feed(
        &self,
        user: &str,
        series: &str,
        book_ordinal: Ordinal,
    ) -> Result<Feed, CoreError> {
        let book = self.catalog.require_series(series)?.require_book(book_ordinal)?;
        let progress = self.tracker.get_progress(user, series).await?;

        match feed_access(&progress, book) {
            FeedAccess::Locked => {
                tracing::debug!(user, series, book = %book_ordinal, "Feed locked, book not started");
                Ok(Feed::Locked)
            }
            FeedAccess::Open { ceiling } => {
                let comments = self
                    .discussions
                    .list_comments(series, book_ordinal, ceiling)
                    .await?;
                Ok(Feed::Open { ceiling, comments })
            }
        }
    }

    /// Post a comment, refusing chapters past the author's own progress.
    pub async fn post_comment(
        &self,
        author: &str,
        series: &str,
        book_ordinal: Ordinal,
        chapter: u32,
        content: &str,
    ) -> Result<Comment, CoreError> {
        let book = self.catalog.require_series(series)?.require_book(book_ordinal)?;
        validate_chapter(book, chapter)?;
        let progress = self.tracker.get_progress(author, series).await?;

        if let Err(err) = authorize_comment(&progress, book, chapter) {
            tracing::warn!(
                author,
                series,
                book = %book_ordinal,
                chapter,
                "Rejected comment past author's progress"
            );
            return Err(err);
        }

        self.discussions
            .add_comment(series, book_ordinal, chapter, author, content)
            .await
    }

    /// Progress of each member in `series` and the lowest shared book.
    pub async fn overview(
        &self,
        series: &str,
        members: &[String],
    ) -> Result<ClubOverview, CoreError> {
        let catalog_series = self.catalog.require_series(series)?;

        let mut progress: Vec<ReadingProgress> = Vec::with_capacity(members.len());
        for member in members {
            progress.push(self.tracker.get_progress(member, series).await?);
        }

        let safe = safe_to_discuss(&progress);
        let members = progress
            .into_iter()
            .map(|p| MemberProgress {
                book_title: catalog_series.book(p.book_ordinal).map(|b| b.title.clone()),
                user: p.user,
                book_ordinal: p.book_ordinal,
                percent: p.percent,
                last_update: p.last_update,
            })
            .collect();

        Ok(ClubOverview {
            series: catalog_series.name.clone(),
            members,
            safe_to_discuss: safe,
        })
    }
}
