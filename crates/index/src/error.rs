//! Index Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An index construction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Both variants mean the dataset is unusable; there is no partial-corpus mode.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tables decoded fine, but do not have the fixed corpus cardinalities.
    #[display(
        "corrupted data: verses ({verses}/{}), chapters ({chapters}/{}), pages ({pages}/{}), page metadata ({metadata}/{})",
        crate::VERSE_COUNT,
        crate::CHAPTER_COUNT,
        crate::PAGE_COUNT,
        crate::PAGE_COUNT
    )]
    InvalidDataCount {
        verses: usize,
        chapters: usize,
        pages: usize,
        metadata: usize,
    },
    /// An entity references something outside the corpus, or breaks the
    /// ordering the index relies upon.
    #[display("inconsistent {entity} {id}: {reason}")]
    Inconsistent {
        entity: &'static str,
        id: usize,
        reason: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same dataset, same answer.
        false
    }

    pub(crate) fn inconsistent(entity: &'static str, id: usize, reason: impl Into<String>) -> Self {
        Self::Inconsistent { entity, id, reason: reason.into() }
    }
}
