//! Where the dataset documents come from.
//!
//! The loader only ever asks a [`Source`] for a document by name and gets
//! its raw bytes back; decoding and validation happen afterwards, the same
//! way for every source.

mod directory;
#[cfg(feature = "embedded")]
mod embedded;
#[cfg(any(test, feature = "mock"))]
mod memory;

pub use self::directory::Directory;
#[cfg(feature = "embedded")]
pub use self::embedded::Embedded;
#[cfg(any(test, feature = "mock"))]
pub use self::memory::Memory;
use crate::error::Result;
use async_trait::async_trait;
use std::borrow::Cow;

/// Read-only access to the dataset documents.
///
/// # Errors
///
/// Implementations raise [`SourceNotFound`](crate::error::ErrorKind::SourceNotFound)
/// for an absent document and [`Io`](crate::error::ErrorKind::Io) for any
/// other failure to read one.
#[async_trait]
pub trait Source: Send + Sync {
    /// Name of the source, used for logging only.
    fn name(&self) -> &str;

    /// Fetch the raw bytes of a document.
    async fn read(&self, document: &str) -> Result<Cow<'static, [u8]>>;
}
