use super::{IdRange, PageId};

/// A fixed print-layout unit.
///
/// Pages partition the verses just like chapters do, but may share chapters
/// with their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub id: PageId,
    pub verses: IdRange,
    pub chapters: IdRange,
    pub quarters: IdRange,
}
