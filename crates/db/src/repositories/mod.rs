//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async queries
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod progress_repo;

pub use comment_repo::CommentRepo;
pub use progress_repo::ProgressRepo;
