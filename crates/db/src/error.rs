use bookclub_core::error::CoreError;

/// Failures inside the PostgreSQL backend.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored row no longer satisfies the domain invariants.
    #[error("Malformed row in {table}: {reason}")]
    Malformed { table: &'static str, reason: String },
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Storage backend failure");
        CoreError::StorageUnavailable(err.to_string())
    }
}
