//! Reading progress rows (`reading_progress` table).

use bookclub_core::catalog::Ordinal;
use bookclub_core::progress::ReadingProgress;
use bookclub_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

use crate::error::DbError;

/// A row from the `reading_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressRow {
    pub user_name: String,
    pub series: String,
    pub book_ordinal: f64,
    pub percent: i16,
    pub last_update: Timestamp,
}

/// DTO for the full-replacement upsert.
#[derive(Debug, Clone)]
pub struct UpsertProgress {
    pub user_name: String,
    pub series: String,
    pub book_ordinal: f64,
    pub percent: i16,
    pub last_update: Timestamp,
}

impl From<&ReadingProgress> for UpsertProgress {
    fn from(progress: &ReadingProgress) -> Self {
        Self {
            user_name: progress.user.clone(),
            series: progress.series.clone(),
            book_ordinal: progress.book_ordinal.value(),
            percent: i16::from(progress.percent),
            // The tracker always stamps updates; fall back to now for direct callers.
            last_update: progress.last_update.unwrap_or_else(chrono::Utc::now),
        }
    }
}

impl TryFrom<ProgressRow> for ReadingProgress {
    type Error = DbError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let book_ordinal = Ordinal::new(row.book_ordinal).map_err(|e| DbError::Malformed {
            table: "reading_progress",
            reason: e.to_string(),
        })?;
        let percent = u8::try_from(row.percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| DbError::Malformed {
                table: "reading_progress",
                reason: format!("percent {} out of range", row.percent),
            })?;

        Ok(ReadingProgress {
            user: row.user_name,
            series: row.series,
            book_ordinal,
            percent,
            last_update: Some(row.last_update),
        })
    }
}
