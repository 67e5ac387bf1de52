//! [`BookClubStore`] backed by PostgreSQL.

use async_trait::async_trait;
use bookclub_core::discussion::{Comment, CommentQuery};
use bookclub_core::error::CoreError;
use bookclub_core::progress::ReadingProgress;
use bookclub_core::store::BookClubStore;

use crate::error::DbError;
use crate::models::comment::CreateComment;
use crate::models::progress::UpsertProgress;
use crate::repositories::{CommentRepo, ProgressRepo};
use crate::DbPool;

/// Every failure, including malformed rows, surfaces as `StorageUnavailable`.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookClubStore for PgStore {
    async fn find_progress(
        &self,
        user: &str,
        series: &str,
    ) -> Result<Option<ReadingProgress>, CoreError> {
        let row = ProgressRepo::find(&self.pool, user, series)
            .await
            .map_err(DbError::from)?;
        Ok(row.map(ReadingProgress::try_from).transpose()?)
    }

    async fn upsert_progress(
        &self,
        progress: &ReadingProgress,
    ) -> Result<ReadingProgress, CoreError> {
        let row = ProgressRepo::upsert(&self.pool, &UpsertProgress::from(progress))
            .await
            .map_err(DbError::from)?;
        Ok(ReadingProgress::try_from(row)?)
    }

    async fn list_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>, CoreError> {
        let max_chapter = i32::try_from(query.max_chapter).unwrap_or(i32::MAX);
        let rows = CommentRepo::list_up_to_chapter(
            &self.pool,
            &query.series,
            query.book_ordinal.value(),
            max_chapter,
        )
        .await
        .map_err(DbError::from)?;

        let comments = rows
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, CoreError> {
        let input = CreateComment::try_from(comment)?;
        let row = CommentRepo::create(&self.pool, &input)
            .await
            .map_err(DbError::from)?;
        Ok(Comment::try_from(row)?)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(())
    }
}
