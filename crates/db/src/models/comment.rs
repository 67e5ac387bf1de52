//! Discussion comment rows (`discussion_comments` table).

use bookclub_core::catalog::Ordinal;
use bookclub_core::discussion::Comment;
use bookclub_core::types::{CommentId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::error::DbError;

/// A row from the `discussion_comments` table (without the `seq` tie-breaker).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentRow {
    pub id: CommentId,
    pub series: String,
    pub book_ordinal: f64,
    pub chapter: i32,
    pub author: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a comment that has already been validated.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub id: CommentId,
    pub series: String,
    pub book_ordinal: f64,
    pub chapter: i32,
    pub author: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl TryFrom<&Comment> for CreateComment {
    type Error = DbError;

    fn try_from(comment: &Comment) -> Result<Self, Self::Error> {
        let chapter = i32::try_from(comment.chapter).map_err(|_| DbError::Malformed {
            table: "discussion_comments",
            reason: format!("chapter {} does not fit in INTEGER", comment.chapter),
        })?;
        Ok(Self {
            id: comment.id,
            series: comment.series.clone(),
            book_ordinal: comment.book_ordinal.value(),
            chapter,
            author: comment.author.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        })
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = DbError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let book_ordinal = Ordinal::new(row.book_ordinal).map_err(|e| DbError::Malformed {
            table: "discussion_comments",
            reason: e.to_string(),
        })?;
        let chapter = u32::try_from(row.chapter)
            .ok()
            .filter(|c| *c >= 1)
            .ok_or_else(|| DbError::Malformed {
                table: "discussion_comments",
                reason: format!("chapter {} out of range", row.chapter),
            })?;

        Ok(Comment {
            id: row.id,
            series: row.series,
            book_ordinal,
            chapter,
            author: row.author,
            content: row.content,
            created_at: row.created_at,
        })
    }
}
