use super::{ChapterId, PageId, QuarterId, VerseId};

/// The smallest unit of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verse {
    /// Global ordinal, `1..=6236`.
    pub id: VerseId,
    /// Ordinal within the owning chapter, starting at 1.
    pub number: u16,
    pub text: String,
    pub chapter: ChapterId,
    pub quarter: QuarterId,
    pub page: PageId,
}
