//! In-process [`BookClubStore`], used by tests and by the API server when no
//! database is configured. Data does not survive a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookClubStore;
use crate::discussion::{feed_order, Comment, CommentQuery};
use crate::error::CoreError;
use crate::progress::ReadingProgress;

type ProgressKey = (String, String);

pub struct MemoryStore {
    progress: RwLock<HashMap<ProgressKey, ReadingProgress>>,
    /// Kept in insertion order; the feed sort is stable over it.
    comments: RwLock<Vec<Comment>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            progress: RwLock::new(HashMap::new()),
            comments: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn progress_count(&self) -> usize {
        self.progress.read().await.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.comments.read().await.len()
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CoreError::StorageUnavailable(
                "In-memory store is marked unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl BookClubStore for MemoryStore {
    async fn find_progress(
        &self,
        user: &str,
        series: &str,
    ) -> Result<Option<ReadingProgress>, CoreError> {
        self.check_available()?;
        let key = (user.to_string(), series.to_string());
        Ok(self.progress.read().await.get(&key).cloned())
    }

    async fn upsert_progress(
        &self,
        progress: &ReadingProgress,
    ) -> Result<ReadingProgress, CoreError> {
        self.check_available()?;
        let key = (progress.user.clone(), progress.series.clone());
        self.progress.write().await.insert(key, progress.clone());
        Ok(progress.clone())
    }

    async fn list_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>, CoreError> {
        self.check_available()?;
        let mut matching: Vec<Comment> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        matching.sort_by(feed_order);
        Ok(matching)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<Comment, CoreError> {
        self.check_available()?;
        let mut comments = self.comments.write().await;
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(CoreError::InvalidArgument(format!(
                "Comment {} already exists",
                comment.id
            )));
        }
        comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.check_available()
    }
}
