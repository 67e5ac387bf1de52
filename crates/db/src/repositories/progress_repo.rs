//! Repository for the `reading_progress` table.

use sqlx::PgPool;

use crate::models::progress::{ProgressRow, UpsertProgress};

/// Column list for reading_progress queries.
const PROGRESS_COLUMNS: &str = "user_name, series, book_ordinal, percent, last_update";

/// Point reads and full-replacement upserts of reading progress.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Find the progress row for `(user_name, series)`.
    pub async fn find(
        pool: &PgPool,
        user_name: &str,
        series: &str,
    ) -> Result<Option<ProgressRow>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM reading_progress \
             WHERE user_name = $1 AND series = $2"
        );
        sqlx::query_as::<_, ProgressRow>(&query)
            .bind(user_name)
            .bind(series)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a progress row. Creates if absent, replaces every column if present.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertProgress,
    ) -> Result<ProgressRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_progress (user_name, series, book_ordinal, percent, last_update) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_name, series) DO UPDATE \
             SET book_ordinal = EXCLUDED.book_ordinal, \
                 percent = EXCLUDED.percent, \
                 last_update = EXCLUDED.last_update \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, ProgressRow>(&query)
            .bind(&input.user_name)
            .bind(&input.series)
            .bind(input.book_ordinal)
            .bind(input.percent)
            .bind(input.last_update)
            .fetch_one(pool)
            .await
    }
}
