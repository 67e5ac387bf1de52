//! Domain logic for the spoiler-safe book club.
//!
//! - [`catalog`]: the read-only series/book table.
//! - [`progress`]: per (user, series) reading progress.
//! - [`spoiler`]: progress → highest safe chapter.
//! - [`discussion`]: per-chapter comments, filtered by that ceiling.
//! - [`club`]: the facade that composes the three.
//! - [`store`]: the storage backend trait and an in-memory implementation.

pub mod catalog;
pub mod club;
pub mod discussion;
pub mod error;
pub mod progress;
pub mod spoiler;
pub mod store;
pub mod types;
