//! The spoiler gate.
//!
//! Converts a reader's progress into the highest chapter of a book that is
//! safe to show them (the *ceiling*). Every read and write of discussion
//! content is filtered through [`max_readable_chapter`].

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::Book;
use crate::error::CoreError;
use crate::progress::ReadingProgress;

/// Highest chapter of `book` that `progress` has reached.
///
/// - Past this book: every chapter is unlocked.
/// - On this book: `floor(percent / 100 * chapter_count)`, clamped to the book.
/// - Before this book: `0`. Callers must treat the book as locked rather than
///   querying with a zero ceiling.
pub fn max_readable_chapter(progress: &ReadingProgress, book: &Book) -> u32 {
    match progress.book_ordinal.cmp(&book.ordinal) {
        Ordering::Greater => book.chapter_count,
        Ordering::Equal => {
            let read = u64::from(progress.percent) * u64::from(book.chapter_count) / 100;
            read.min(u64::from(book.chapter_count)) as u32
        }
        Ordering::Less => 0,
    }
}

/// Whether a reader may open a book's discussion at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum FeedAccess {
    /// The reader has not started this book.
    Locked,
    /// Comments up to and including `ceiling` are visible. May be 0 when the
    /// reader has only just started the book.
    Open { ceiling: u32 },
}

pub fn feed_access(progress: &ReadingProgress, book: &Book) -> FeedAccess {
    if progress.book_ordinal < book.ordinal {
        FeedAccess::Locked
    } else {
        FeedAccess::Open {
            ceiling: max_readable_chapter(progress, book),
        }
    }
}

/// Check that the author has read `chapter` before they discuss it.
///
/// Returns the author's ceiling on success.
pub fn authorize_comment(
    progress: &ReadingProgress,
    book: &Book,
    chapter: u32,
) -> Result<u32, CoreError> {
    let ceiling = max_readable_chapter(progress, book);
    if chapter > ceiling {
        return Err(CoreError::SpoilerLocked { chapter, ceiling });
    }
    Ok(ceiling)
}
