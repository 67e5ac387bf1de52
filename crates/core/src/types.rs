/// Comment identities are UUIDv7, so they sort roughly by creation time.
pub type CommentId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
