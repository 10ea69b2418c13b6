//! Range-indexed model of a fixed, paginated text.
//!
//! The corpus is three nested tables: 6236 verses, grouped into 114 chapters
//! and laid out over 604 pages. Chapters and pages never own their verses;
//! they store closed id ranges into the verse table (and into each other),
//! so every cross-lookup is a direct index or a slice of a backing table.
//!
//! Each page also carries [`PageMetadata`](models::PageMetadata): the glyph
//! text it is drawn with and the ordered spans tying runs of that text to
//! verses, which is what selections snap onto.
//!
//! A [`Corpus`] is validated once on construction and never changes after,
//! so it can be shared freely between threads.

mod corpus;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
mod validate;

pub use crate::corpus::Corpus;

/// Number of verses in the corpus.
pub const VERSE_COUNT: usize = 6236;
/// Number of chapters in the corpus.
pub const CHAPTER_COUNT: usize = 114;
/// Number of pages in the corpus.
pub const PAGE_COUNT: usize = 604;
