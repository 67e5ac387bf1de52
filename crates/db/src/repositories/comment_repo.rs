//! Repository for the `discussion_comments` table.

use sqlx::PgPool;

use crate::models::comment::{CommentRow, CreateComment};

/// Column list for discussion_comments queries.
const COMMENT_COLUMNS: &str = "id, series, book_ordinal, chapter, author, content, created_at";

/// Feed ordering. `seq` keeps insertion order when timestamps collide.
const FEED_ORDER: &str = "chapter ASC, created_at ASC, seq ASC";

/// Append-only storage of discussion comments.
pub struct CommentRepo;

impl CommentRepo {
    /// List one book's comments with `chapter <= max_chapter`, in feed order.
    pub async fn list_up_to_chapter(
        pool: &PgPool,
        series: &str,
        book_ordinal: f64,
        max_chapter: i32,
    ) -> Result<Vec<CommentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM discussion_comments \
             WHERE series = $1 AND book_ordinal = $2 AND chapter <= $3 \
             ORDER BY {FEED_ORDER}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(series)
            .bind(book_ordinal)
            .bind(max_chapter)
            .fetch_all(pool)
            .await
    }

    /// Insert a comment, returning the stored row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<CommentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussion_comments \
                (id, series, book_ordinal, chapter, author, content, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, CommentRow>(&query)
            .bind(input.id)
            .bind(&input.series)
            .bind(input.book_ordinal)
            .bind(input.chapter)
            .bind(&input.author)
            .bind(&input.content)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }
}
