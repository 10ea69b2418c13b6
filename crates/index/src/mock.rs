//! Synthetic corpus for tests.
//!
//! Chapters have their real lengths; pages and quarter-sections split the
//! verses as evenly as possible. Every page gets one span per verse, with a
//! single separator glyph between spans, and a heading for every chapter that
//! starts on it. The result passes all of [`Corpus::new`]'s checks.
//!
//! Panics are deliberate here: if the fixture is wrong, the test should not pass.

use crate::models::{Chapter, IdRange, Page, PageMetadata, Span, Verse};
use crate::{CHAPTER_COUNT, Corpus, PAGE_COUNT, VERSE_COUNT};

/// Verses per chapter.
pub const CHAPTER_LENGTHS: [u16; CHAPTER_COUNT] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135, 112, 78, 118, 64, 77,
    227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53, 89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55,
    78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12, 12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36,
    25, 22, 17, 19, 26, 30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];
/// Quarter-sections in the synthetic corpus.
pub const QUARTER_COUNT: usize = 240;
/// Separator drawn between two verses; belongs to no span.
pub const SEPARATOR: char = ' ';
/// A presentation-form glyph, one UTF-16 unit wide.
const GLYPH: char = '\u{FB51}';

/// Raw tables, for tests that want to break them before building a corpus.
pub type Tables = (Vec<Verse>, Vec<Chapter>, Vec<Page>, Vec<PageMetadata>);

/// A valid corpus built from [`tables`].
pub fn synthetic() -> Corpus {
    let (verses, chapters, pages, metadata) = tables();
    match Corpus::new(verses, chapters, pages, metadata) {
        Ok(corpus) => corpus,
        Err(err) => panic!("synthetic corpus is invalid: {err:?}"),
    }
}

pub fn tables() -> Tables {
    let verses = verses();
    let chapters = (1..=CHAPTER_COUNT as u16)
        .map(|id| {
            let group = group(&verses, |v| v.chapter == id);
            Chapter {
                id,
                verses: span_of(group, |v| v.id),
                pages: span_of(group, |v| v.page),
                quarters: span_of(group, |v| v.quarter),
            }
        })
        .collect();
    let pages = (1..=PAGE_COUNT as u16)
        .map(|id| {
            let group = group(&verses, |v| v.page == id);
            Page {
                id,
                verses: span_of(group, |v| v.id),
                chapters: span_of(group, |v| v.chapter),
                quarters: span_of(group, |v| v.quarter),
            }
        })
        .collect();
    let metadata = (1..=PAGE_COUNT as u16).map(|id| page_metadata(group(&verses, |v| v.page == id))).collect();
    (verses, chapters, pages, metadata)
}

fn verses() -> Vec<Verse> {
    let mut verses = Vec::with_capacity(VERSE_COUNT);
    for (chapter, length) in (1u16..).zip(CHAPTER_LENGTHS) {
        for number in 1..=length {
            let index = verses.len();
            verses.push(Verse {
                id: index as u16 + 1,
                number,
                text: format!("verse {chapter}:{number}"),
                chapter,
                quarter: (index * QUARTER_COUNT / VERSE_COUNT) as u16 + 1,
                page: (index * PAGE_COUNT / VERSE_COUNT) as u16 + 1,
            });
        }
    }
    verses
}

/// The contiguous run of verses matching `belongs`.
fn group(verses: &[Verse], belongs: impl Fn(&Verse) -> bool) -> &[Verse] {
    let start = verses.iter().position(&belongs).expect("every entity owns at least one verse");
    let length = verses[start..].iter().take_while(|&v| belongs(v)).count();
    &verses[start..start + length]
}

fn span_of(group: &[Verse], key: impl Fn(&Verse) -> u16) -> IdRange {
    let (first, last) = (key(&group[0]), key(&group[group.len() - 1]));
    IdRange::new(first, last).expect("synthetic ranges are ascending")
}

fn page_metadata(group: &[Verse]) -> PageMetadata {
    let mut glyphs = String::new();
    let mut spans = Vec::with_capacity(group.len());
    let mut headers = Vec::new();
    for (line, verse) in (0u16..).zip(group) {
        if !glyphs.is_empty() {
            glyphs.push(SEPARATOR);
        }
        if verse.number == 1 {
            headers.push((verse.chapter, line % 15));
        }
        let length = 2 + usize::from(verse.number % 5);
        let location = glyphs.encode_utf16().count();
        glyphs.extend(std::iter::repeat_n(GLYPH, length));
        spans.push(Span::new(format!("{}:{}", verse.chapter, verse.number), location, length));
    }
    let metadata = PageMetadata::new(glyphs, spans);
    if headers.is_empty() { metadata } else { metadata.with_headers(headers) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_lengths_sum_to_verse_count() {
        assert_eq!(CHAPTER_LENGTHS.iter().map(|&l| usize::from(l)).sum::<usize>(), VERSE_COUNT);
    }

    #[test]
    fn spans_leave_separator_gaps() {
        let corpus = synthetic();
        let metadata = corpus.metadata(1);
        let ranges = metadata.ranges();
        assert_eq!(ranges.len(), corpus.verses_in_page(corpus.page(1)).len());
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end() + 1, pair[1].location);
        }
        assert_eq!(metadata.headers().next(), Some((1, 0)));
    }
}
