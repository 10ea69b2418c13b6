use super::{ChapterId, TextRange};
use std::collections::BTreeMap;

/// A run of glyph text belonging to one verse (or verse fragment).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// Key of the owning verse, as written in the dataset.
    pub reference: String,
    pub location: usize,
    pub length: usize,
}
impl Span {
    pub fn new(reference: impl Into<String>, location: usize, length: usize) -> Self {
        Self { reference: reference.into(), location, length }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.location, self.length)
    }
}

/// Everything needed to draw a single page and resolve selections on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// The literal rendered string for the page.
    pub glyphs: String,
    /// Chapter id to the line its heading band is drawn on, for chapters whose
    /// heading falls on this page.
    pub headers: Option<BTreeMap<ChapterId, u16>>,
    /// Sorted by `location`, non-overlapping. Gaps between spans are
    /// decoration and whitespace that belong to no verse.
    pub spans: Vec<Span>,
}
impl PageMetadata {
    pub fn new(glyphs: impl Into<String>, spans: Vec<Span>) -> Self {
        Self { glyphs: glyphs.into(), headers: None, spans }
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (ChapterId, u16)>) -> Self {
        self.headers = Some(headers.into_iter().collect());
        self
    }

    /// Length of the glyph text in UTF-16 code units, the unit of every offset.
    pub fn utf16_len(&self) -> usize {
        self.glyphs.encode_utf16().count()
    }

    /// The span ranges in order; the block list handed to the selection snapper.
    pub fn ranges(&self) -> Vec<TextRange> {
        self.spans.iter().map(Span::range).collect()
    }

    /// Chapter headings on this page as `(chapter, line)`, ascending by chapter.
    pub fn headers(&self) -> impl Iterator<Item = (ChapterId, u16)> + '_ {
        self.headers.iter().flat_map(|h| h.iter().map(|(chapter, line)| (*chapter, *line)))
    }

    /// The span covering `offset`, if any.
    pub fn span_at(&self, offset: usize) -> Option<&Span> {
        let after = self.spans.partition_point(|s| s.location <= offset);
        after.checked_sub(1).map(|i| &self.spans[i]).filter(|s| s.range().contains(offset))
    }

    /// Maps snapped ranges back onto the spans they were snapped to. Ranges
    /// that do not match a span exactly are skipped.
    pub fn spans_for<'a>(&'a self, ranges: &[TextRange]) -> Vec<&'a Span> {
        ranges
            .iter()
            .filter_map(|range| {
                let index = self.spans.binary_search_by_key(&range.location, |s| s.location).ok()?;
                Some(&self.spans[index]).filter(|s| s.length == range.length)
            })
            .collect()
    }

    /// The glyph text covered by `range`.
    ///
    /// Out-of-bounds ends are clamped to the text, so this never panics. An
    /// offset that splits a surrogate pair rounds up to the next character.
    pub fn text(&self, range: TextRange) -> &str {
        let start = byte_offset(&self.glyphs, range.location);
        let end = byte_offset(&self.glyphs, range.end()).max(start);
        &self.glyphs[start..end]
    }
}

/// Converts a UTF-16 offset into a byte offset on a character boundary.
fn byte_offset(text: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (index, c) in text.char_indices() {
        if units >= utf16 {
            return index;
        }
        units += c.len_utf16();
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page() -> PageMetadata {
        // Three verses with a separator between each.
        PageMetadata::new(
            "abcde fghi jk",
            vec![Span::new("1:1", 0, 5), Span::new("1:2", 6, 4), Span::new("1:3", 11, 2)],
        )
        .with_headers([(2, 7), (1, 0)])
    }

    #[rstest]
    #[case(0, Some("1:1"))]
    #[case(4, Some("1:1"))]
    #[case(5, None)]
    #[case(6, Some("1:2"))]
    #[case(12, Some("1:3"))]
    #[case(13, None)]
    #[case(500, None)]
    fn span_at_offset(#[case] offset: usize, #[case] expected: Option<&str>) {
        let page = page();
        assert_eq!(page.span_at(offset).map(|s| s.reference.as_str()), expected);
    }

    #[test]
    fn spans_for_exact_ranges_only() {
        let page = page();
        let spans = page.spans_for(&[TextRange::new(6, 4), TextRange::new(0, 4), TextRange::new(11, 2)]);
        let references: Vec<_> = spans.iter().map(|s| s.reference.as_str()).collect();
        assert_eq!(references, vec!["1:2", "1:3"]);
    }

    #[rstest]
    #[case(TextRange::new(0, 5), "abcde")]
    #[case(TextRange::new(6, 4), "fghi")]
    #[case(TextRange::new(11, 50), "jk")]
    #[case(TextRange::new(40, 2), "")]
    #[case(TextRange::caret(3), "")]
    fn text_is_clamped(#[case] range: TextRange, #[case] expected: &str) {
        assert_eq!(page().text(range), expected);
    }

    #[test]
    fn text_counts_utf16_units() {
        // U+1D400 is two UTF-16 units, U+FB51 is one.
        let page = PageMetadata::new("\u{1D400}\u{FB51}x", vec![]);
        assert_eq!(page.utf16_len(), 4);
        assert_eq!(page.text(TextRange::new(2, 1)), "\u{FB51}");
        assert_eq!(page.text(TextRange::new(0, 2)), "\u{1D400}");
    }

    #[test]
    fn headers_sorted_by_chapter() {
        assert_eq!(page().headers().collect::<Vec<_>>(), vec![(1, 0), (2, 7)]);
        assert_eq!(PageMetadata::new("", vec![]).headers().count(), 0);
    }
}
