use super::{ChapterId, IdRange};

/// A named grouping of consecutive verses.
///
/// Chapters partition the verses: their verse ranges are contiguous and
/// increase with the chapter id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chapter {
    pub id: ChapterId,
    pub verses: IdRange,
    pub pages: IdRange,
    pub quarters: IdRange,
}
impl Chapter {
    /// Number of verses in this chapter.
    pub fn len(&self) -> usize {
        self.verses.len()
    }
}
