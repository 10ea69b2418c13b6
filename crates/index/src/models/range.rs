use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;

/// A closed, 1-based range of entity ids (`start..=end`).
///
/// Chapters and pages describe their contents with these: a chapter's verse
/// range, a page's chapter range, and so on. Never empty; construction
/// rejects `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange {
    start: u16,
    end: u16,
}
impl IdRange {
    /// Returns `None` if `start > end`.
    pub fn new(start: u16, end: u16) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A range covering a single id.
    pub fn single(id: u16) -> Self {
        Self { start: id, end: id }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ids covered; always at least one.
    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn contains(&self, id: u16) -> bool {
        (self.start..=self.end).contains(&id)
    }

    /// Zero-based index bounds for slicing a backing table.
    pub(crate) fn as_indices(&self) -> RangeInclusive<usize> {
        usize::from(self.start) - 1..=usize::from(self.end) - 1
    }
}
impl Display for IdRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}...{}", self.start, self.end)
    }
}

/// A half-open range into a page's glyph text, counted in UTF-16 code units.
///
/// Used both for spans (the reference blocks a selection snaps onto) and for
/// selections themselves. A zero `length` is a caret, not an empty selection.
/// The derived ordering (by `location`, then `length`) is the canonical order
/// for snapped selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}
impl TextRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// A zero-length range at `location`.
    pub fn caret(location: usize) -> Self {
        Self { location, length: 0 }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }

    pub fn is_caret(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if `offset` falls within `[location, end)`. A caret
    /// range contains nothing.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.location && offset < self.end()
    }

    /// Returns `true` if both ranges share at least one offset.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.location.max(other.location) < self.end().min(other.end())
    }
}
impl Display for TextRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}, {}}}", self.location, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn id_range_rejects_inverted_bounds() {
        assert!(IdRange::new(5, 4).is_none());
        assert_eq!(IdRange::new(4, 4), Some(IdRange::single(4)));
    }

    #[test]
    fn id_range_len_and_indices() {
        let range = IdRange::new(8, 293).unwrap();
        assert_eq!(range.len(), 286);
        assert_eq!(range.as_indices(), 7..=292);
        assert!(range.contains(8));
        assert!(range.contains(293));
        assert!(!range.contains(294));
        assert_eq!(range.to_string(), "8...293");
    }

    #[rstest]
    #[case(TextRange::new(0, 5), 0, true)]
    #[case(TextRange::new(0, 5), 4, true)]
    #[case(TextRange::new(0, 5), 5, false)]
    #[case(TextRange::caret(3), 3, false)]
    fn text_range_contains(#[case] range: TextRange, #[case] offset: usize, #[case] expected: bool) {
        assert_eq!(range.contains(offset), expected);
    }

    #[rstest]
    #[case(TextRange::new(0, 5), TextRange::new(3, 4), true)]
    #[case(TextRange::new(0, 5), TextRange::new(5, 4), false)]
    #[case(TextRange::new(10, 4), TextRange::new(4, 8), true)]
    #[case(TextRange::new(10, 4), TextRange::caret(11), false)]
    fn text_range_overlaps(#[case] a: TextRange, #[case] b: TextRange, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[test]
    fn text_range_canonical_order() {
        let mut ranges = vec![TextRange::new(10, 4), TextRange::new(0, 9), TextRange::new(0, 5)];
        ranges.sort();
        assert_eq!(ranges, vec![TextRange::new(0, 5), TextRange::new(0, 9), TextRange::new(10, 4)]);
    }
}
