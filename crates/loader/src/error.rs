//! Loader Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use mushaf_index::error::{Error as IndexError, ErrorKind as IndexErrorKind};

/// A load error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every kind ends the load attempt; nothing is retried automatically.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required document is absent from the source.
    #[display("data source not found: {_0}")]
    SourceNotFound(#[error(not(source))] String),
    /// A document exists but is not valid JSON of the expected shape. The
    /// decoder's own error is the child frame.
    #[display("failed to decode data source: {_0}")]
    DecodeError(#[error(not(source))] String),
    /// The documents decoded, but the corpus they describe is unusable
    /// (wrong cardinalities or inconsistent ranges).
    #[display("invalid corpus data: {_0}")]
    InvalidData(IndexErrorKind),
    /// A load is already in flight on this store.
    #[display("corpus is already loading")]
    AlreadyLoading,
    /// Reading a document failed for a reason other than it being absent.
    #[display("I/O error reading: {_0}")]
    Io(#[error(not(source))] String),
    /// The blocking decode task was cancelled or panicked.
    #[display("load task interrupted")]
    Interrupted,
}
impl ErrorKind {
    /// Convert an index construction error into a load error, preserving the
    /// index crate's `Exn` frame (error tree) as a child in its own error tree.
    #[track_caller]
    pub fn index(err: IndexError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::InvalidData(inner))
    }

    /// The observed cardinalities, if this is a count mismatch.
    pub fn data_count(&self) -> Option<(usize, usize, usize, usize)> {
        match self {
            Self::InvalidData(IndexErrorKind::InvalidDataCount { verses, chapters, pages, metadata }) => {
                Some((*verses, *chapters, *pages, *metadata))
            },
            _ => None,
        }
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Interrupted | Self::AlreadyLoading)
    }
}
