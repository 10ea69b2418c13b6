//! Structural checks run once when a [`Corpus`] is built.
//!
//! Lookups index straight into the backing tables and slicing trusts the
//! stored ranges, so anything that could make either of those panic (or
//! silently return the wrong entity) is rejected here instead.

use crate::error::{ErrorKind, Result};
use crate::models::{IdRange, PageMetadata};
use crate::{CHAPTER_COUNT, Corpus, PAGE_COUNT, VERSE_COUNT};

pub(crate) fn validate(corpus: &Corpus) -> Result<()> {
    counts(corpus)?;
    dense_ids("verse", corpus.verses.iter().map(|v| v.id))?;
    dense_ids("chapter", corpus.chapters.iter().map(|c| c.id))?;
    dense_ids("page", corpus.pages.iter().map(|p| p.id))?;
    partition("chapter", corpus.chapters.iter().map(|c| (c.id, c.verses)))?;
    partition("page", corpus.pages.iter().map(|p| (p.id, p.verses)))?;
    for chapter in &corpus.chapters {
        within("chapter", chapter.id, "page", chapter.pages, PAGE_COUNT)?;
    }
    for page in &corpus.pages {
        within("page", page.id, "chapter", page.chapters, CHAPTER_COUNT)?;
    }
    verses(corpus)?;
    for (page, metadata) in (1..).zip(&corpus.metadata) {
        spans(page, metadata)?;
    }
    Ok(())
}

fn counts(corpus: &Corpus) -> Result<()> {
    let (verses, chapters, pages, metadata) =
        (corpus.verses.len(), corpus.chapters.len(), corpus.pages.len(), corpus.metadata.len());
    if verses != VERSE_COUNT || chapters != CHAPTER_COUNT || pages != PAGE_COUNT || metadata != PAGE_COUNT {
        tracing::warn!(verses, chapters, pages, metadata, "Corpus cardinalities do not match");
        exn::bail!(ErrorKind::InvalidDataCount { verses, chapters, pages, metadata });
    }
    Ok(())
}

fn dense_ids(entity: &'static str, ids: impl Iterator<Item = u16>) -> Result<()> {
    for (expected, id) in (1..).zip(ids) {
        if id != expected {
            exn::bail!(ErrorKind::inconsistent(entity, usize::from(id), format!("found at position {expected}")));
        }
    }
    Ok(())
}

/// Checks that consecutive verse ranges tile `1..=VERSE_COUNT` with no gaps
/// or overlaps.
fn partition(entity: &'static str, ranges: impl Iterator<Item = (u16, IdRange)>) -> Result<()> {
    let mut next: u16 = 1;
    for (id, range) in ranges {
        if range.start() != next {
            exn::bail!(ErrorKind::inconsistent(
                entity,
                usize::from(id),
                format!("verse range {range} should start at verse {next}"),
            ));
        }
        next = range.end().saturating_add(1);
    }
    if usize::from(next) != VERSE_COUNT + 1 {
        exn::bail!(ErrorKind::inconsistent(entity, usize::from(next), "verse ranges do not end at the last verse"));
    }
    Ok(())
}

fn within(entity: &'static str, id: u16, target: &str, range: IdRange, count: usize) -> Result<()> {
    if range.start() == 0 || usize::from(range.end()) > count {
        exn::bail!(ErrorKind::inconsistent(entity, usize::from(id), format!("{target} range {range} out of bounds")));
    }
    Ok(())
}

fn verses(corpus: &Corpus) -> Result<()> {
    let mut quarter = 1;
    for verse in &corpus.verses {
        let id = usize::from(verse.id);
        let chapter = corpus.get_chapter(verse.chapter);
        if !chapter.is_some_and(|c| c.verses.contains(verse.id)) {
            exn::bail!(ErrorKind::inconsistent("verse", id, format!("not inside chapter {}", verse.chapter)));
        }
        let page = corpus.get_page(verse.page);
        if !page.is_some_and(|p| p.verses.contains(verse.id)) {
            exn::bail!(ErrorKind::inconsistent("verse", id, format!("not inside page {}", verse.page)));
        }
        // Quarter-sections are only ever looked up by slicing, which needs them ordered.
        if verse.quarter < quarter {
            exn::bail!(ErrorKind::inconsistent("verse", id, format!("quarter {} precedes {quarter}", verse.quarter)));
        }
        quarter = verse.quarter;
    }
    Ok(())
}

fn spans(page: usize, metadata: &PageMetadata) -> Result<()> {
    let length = metadata.utf16_len();
    let mut end = 0;
    for span in &metadata.spans {
        if span.location < end {
            exn::bail!(ErrorKind::inconsistent(
                "page metadata",
                page,
                format!("span {} overlaps or precedes the previous span", span.range()),
            ));
        }
        end = span.range().end();
        if end > length {
            exn::bail!(ErrorKind::inconsistent(
                "page metadata",
                page,
                format!("span {} ends past the glyph text ({length})", span.range()),
            ));
        }
    }
    Ok(())
}
