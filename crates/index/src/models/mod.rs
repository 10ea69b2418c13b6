mod chapter;
mod metadata;
mod page;
mod range;
mod verse;

pub use self::chapter::Chapter;
pub use self::metadata::{PageMetadata, Span};
pub use self::page::Page;
pub use self::range::{IdRange, TextRange};
pub use self::verse::Verse;

/// 1-based verse id, `1..=6236`.
pub type VerseId = u16;
/// 1-based chapter id, `1..=114`.
pub type ChapterId = u16;
/// 1-based page id, `1..=604`.
pub type PageId = u16;
/// 1-based quarter-section id.
pub type QuarterId = u16;
