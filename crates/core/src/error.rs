/// Domain error shared by every book-club operation.
///
/// Absence of data (no progress yet, no comments for a book) is never an
/// error; it is modelled as a default or empty result instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A caller-supplied value violates an invariant. No state was changed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The author tried to discuss a chapter past their own progress.
    #[error("Chapter {chapter} is past your reading progress (safe through chapter {ceiling})")]
    SpoilerLocked { chapter: u32, ceiling: u32 },

    /// The storage backend could not be reached or returned an error.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
