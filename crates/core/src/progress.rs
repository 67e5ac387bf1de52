//! Reading progress per (user, series).
//!
//! Progress is overwritten wholesale on every update (last write wins) and
//! never deleted. A user with no stored record is treated as being at 0% of
//! the first book in the series; that default is computed, not persisted.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Ordinal, Series};
use crate::error::CoreError;
use crate::store::SharedStore;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Completion is expressed as a whole percentage.
pub const MAX_PERCENT: i32 = 100;

/// Maximum length of a user name.
pub const MAX_USER_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How far a user has read in one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub user: String,
    pub series: String,
    /// The book the user is currently reading.
    pub book_ordinal: Ordinal,
    /// Completion of the current book, `0..=100`.
    pub percent: u8,
    /// `None` when this is the computed default rather than a stored record.
    pub last_update: Option<Timestamp>,
}

impl ReadingProgress {
    /// The lazy default: 0% into the first book of the series.
    pub fn starting(user: &str, series: &Series) -> Self {
        Self {
            user: user.to_string(),
            series: series.name.clone(),
            book_ordinal: series.first_book().ordinal,
            percent: 0,
            last_update: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a user name: non-empty after trimming and within the length limit.
pub fn validate_user(user: &str) -> Result<(), CoreError> {
    if user.trim().is_empty() {
        return Err(CoreError::InvalidArgument(
            "User name must not be empty".to_string(),
        ));
    }
    if user.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(CoreError::InvalidArgument(format!(
            "User name exceeds maximum length of {MAX_USER_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a completion percentage and narrow it to its stored width.
pub fn validate_percent(percent: i32) -> Result<u8, CoreError> {
    if !(0..=MAX_PERCENT).contains(&percent) {
        return Err(CoreError::InvalidArgument(format!(
            "Progress percent must be between 0 and {MAX_PERCENT}, got {percent}"
        )));
    }
    Ok(percent as u8)
}

/// The lowest current book across a group of readers.
///
/// Everything up to and including this book is safe for the whole group to
/// discuss. Returns `None` for an empty group.
pub fn safe_to_discuss(members: &[ReadingProgress]) -> Option<Ordinal> {
    members.iter().map(|p| p.book_ordinal).min()
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Reads and writes [`ReadingProgress`] through the storage backend.
#[derive(Clone)]
pub struct ProgressTracker {
    catalog: Arc<Catalog>,
    store: SharedStore,
}

impl ProgressTracker {
    pub fn new(catalog: Arc<Catalog>, store: SharedStore) -> Self {
        Self { catalog, store }
    }

    /// Stored progress for `(user, series)`, or the unpersisted default.
    pub async fn get_progress(
        &self,
        user: &str,
        series: &str,
    ) -> Result<ReadingProgress, CoreError> {
        validate_user(user)?;
        let series = self.catalog.require_series(series)?;

        match self.store.find_progress(user, &series.name).await? {
            Some(progress) => Ok(progress),
            None => Ok(ReadingProgress::starting(user, series)),
        }
    }

    /// Replace the `(user, series)` record and stamp `last_update`.
    ///
    /// Nothing is written when validation fails.
    pub async fn update_progress(
        &self,
        user: &str,
        series: &str,
        book_ordinal: Ordinal,
        percent: i32,
    ) -> Result<ReadingProgress, CoreError> {
        validate_user(user)?;
        let series = self.catalog.require_series(series)?;
        series.require_book(book_ordinal)?;
        let percent = validate_percent(percent)?;

        let record = ReadingProgress {
            user: user.to_string(),
            series: series.name.clone(),
            book_ordinal,
            percent,
            last_update: Some(Utc::now()),
        };
        let stored = self.store.upsert_progress(&record).await?;

        tracing::info!(
            user = %stored.user,
            series = %stored.series,
            book = %stored.book_ordinal,
            percent = stored.percent,
            "Reading progress updated"
        );
        Ok(stored)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::store::memory::MemoryStore;

    const ZODIAC: &str = "Zodiac Academy Universe";

    fn ord(v: f64) -> Ordinal {
        Ordinal::new(v).unwrap()
    }

    fn tracker() -> (ProgressTracker, Arc<MemoryStore>) {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let store = Arc::new(MemoryStore::new());
        (ProgressTracker::new(catalog, store.clone()), store)
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn percent_bounds() {
        assert_eq!(validate_percent(0).unwrap(), 0);
        assert_eq!(validate_percent(100).unwrap(), 100);
        assert_matches!(validate_percent(-1), Err(CoreError::InvalidArgument(_)));
        assert_matches!(validate_percent(101), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn user_name_rules() {
        assert!(validate_user("Snick").is_ok());
        assert!(validate_user("   ").is_err());
        assert!(validate_user(&"x".repeat(MAX_USER_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn user_name_limit_counts_characters_not_bytes() {
        // Three bytes per character in UTF-8.
        assert!(validate_user(&"読".repeat(MAX_USER_NAME_LENGTH)).is_ok());
        assert!(validate_user(&"読".repeat(MAX_USER_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn safe_to_discuss_is_lowest_current_book() {
        let catalog = Catalog::builtin().unwrap();
        let series = catalog.require_series(ZODIAC).unwrap();
        let mut snick = ReadingProgress::starting("Snick", series);
        snick.book_ordinal = ord(5.5);
        let mut ketchup = ReadingProgress::starting("Ketchup", series);
        ketchup.book_ordinal = ord(4.0);

        assert_eq!(safe_to_discuss(&[snick, ketchup]), Some(ord(4.0)));
        assert_eq!(safe_to_discuss(&[]), None);
    }

    // -- get_progress --------------------------------------------------------

    #[tokio::test]
    async fn missing_progress_defaults_to_first_book_without_writing() {
        let (tracker, store) = tracker();

        let progress = tracker.get_progress("Snick", ZODIAC).await.unwrap();
        assert_eq!(progress.book_ordinal, ord(0.5));
        assert_eq!(progress.percent, 0);
        assert!(progress.last_update.is_none());
        assert_eq!(store.progress_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_series_is_invalid() {
        let (tracker, _) = tracker();
        assert_matches!(
            tracker.get_progress("Snick", "Not A Series").await,
            Err(CoreError::InvalidArgument(_))
        );
    }

    // -- update_progress -----------------------------------------------------

    #[tokio::test]
    async fn update_then_get_round_trips() {
        let (tracker, _) = tracker();

        let stored = tracker
            .update_progress("Snick", ZODIAC, ord(5.0), 50)
            .await
            .unwrap();
        assert!(stored.last_update.is_some());

        let fetched = tracker.get_progress("Snick", ZODIAC).await.unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn update_is_idempotent_modulo_timestamp() {
        let (tracker, store) = tracker();

        let first = tracker
            .update_progress("Snick", ZODIAC, ord(2.0), 30)
            .await
            .unwrap();
        let second = tracker
            .update_progress("Snick", ZODIAC, ord(2.0), 30)
            .await
            .unwrap();

        assert_eq!(first.book_ordinal, second.book_ordinal);
        assert_eq!(first.percent, second.percent);
        assert_eq!(store.progress_count().await, 1);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let (tracker, _) = tracker();

        tracker
            .update_progress("Snick", ZODIAC, ord(7.0), 90)
            .await
            .unwrap();
        tracker
            .update_progress("Snick", ZODIAC, ord(3.0), 10)
            .await
            .unwrap();

        let fetched = tracker.get_progress("Snick", ZODIAC).await.unwrap();
        assert_eq!(fetched.book_ordinal, ord(3.0));
        assert_eq!(fetched.percent, 10);
    }

    #[tokio::test]
    async fn out_of_range_percent_leaves_prior_progress() {
        let (tracker, _) = tracker();
        let before = tracker
            .update_progress("Snick", ZODIAC, ord(2.0), 40)
            .await
            .unwrap();

        let result = tracker
            .update_progress("Snick", ZODIAC, ord(5.5), 150)
            .await;
        assert_matches!(result, Err(CoreError::InvalidArgument(msg)) if msg.contains("percent"));

        let after = tracker.get_progress("Snick", ZODIAC).await.unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn unknown_ordinal_is_rejected_without_write() {
        let (tracker, store) = tracker();

        let result = tracker
            .update_progress("Snick", ZODIAC, ord(2.5), 10)
            .await;
        assert_matches!(result, Err(CoreError::InvalidArgument(msg)) if msg.contains("does not exist"));
        assert_eq!(store.progress_count().await, 0);
    }

    #[tokio::test]
    async fn progress_is_per_series() {
        let (tracker, _) = tracker();
        tracker
            .update_progress("Snick", "The Hunger Games", ord(3.0), 80)
            .await
            .unwrap();

        let zodiac = tracker.get_progress("Snick", ZODIAC).await.unwrap();
        assert_eq!(zodiac.book_ordinal, ord(0.5));
        let hg = tracker.get_progress("Snick", "The Hunger Games").await.unwrap();
        assert_eq!(hg.book_ordinal, ord(3.0));
    }

    #[tokio::test]
    async fn storage_outage_surfaces_as_unavailable() {
        let (tracker, store) = tracker();
        store.set_available(false);

        assert_matches!(
            tracker.update_progress("Snick", ZODIAC, ord(1.0), 10).await,
            Err(CoreError::StorageUnavailable(_))
        );
        assert_matches!(
            tracker.get_progress("Snick", ZODIAC).await,
            Err(CoreError::StorageUnavailable(_))
        );
    }
}
