use crate::error::Result;
use crate::models::{Chapter, ChapterId, IdRange, Page, PageId, PageMetadata, QuarterId, Verse, VerseId};
use crate::{PAGE_COUNT, validate};
use std::ops::RangeInclusive;
use tracing::instrument;

/// The fully loaded, read-only corpus.
///
/// All ids are 1-based. The plain accessors ([`verse`](Self::verse),
/// [`chapter`](Self::chapter), [`page`](Self::page),
/// [`metadata`](Self::metadata)) index straight into the backing tables and
/// **panic** on an out-of-range id: ids are expected to come from the corpus
/// itself or from bounded UI state. Ids from anywhere else (deep links, user
/// input) should go through the `get_*` variants or [`clamp_page`](Self::clamp_page).
///
/// Nothing is mutated after [`Corpus::new`], so a shared reference (or an
/// `Arc<Corpus>`) can be read from any number of threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub(crate) verses: Vec<Verse>,
    pub(crate) chapters: Vec<Chapter>,
    pub(crate) pages: Vec<Page>,
    pub(crate) metadata: Vec<PageMetadata>,
}

impl Corpus {
    /// Builds the corpus from decoded tables, ordered by id, and the page
    /// metadata ordered by page id.
    ///
    /// # Errors
    ///
    /// - [`InvalidDataCount`](crate::error::ErrorKind::InvalidDataCount) if
    ///   the tables do not have exactly 6236 verses, 114 chapters, 604 pages
    ///   and 604 page metadata entries.
    /// - [`Inconsistent`](crate::error::ErrorKind::Inconsistent) if ids are
    ///   not dense, ranges do not partition the verses, cross-references are
    ///   out of bounds, or a page's spans are unordered.
    #[instrument(skip_all, fields(verses = verses.len(), chapters = chapters.len(), pages = pages.len()))]
    pub fn new(
        verses: Vec<Verse>,
        chapters: Vec<Chapter>,
        pages: Vec<Page>,
        metadata: Vec<PageMetadata>,
    ) -> Result<Self> {
        let corpus = Self { verses, chapters, pages, metadata };
        validate::validate(&corpus)?;
        tracing::debug!("Corpus validated");
        Ok(corpus)
    }

    pub fn verse(&self, id: VerseId) -> &Verse {
        &self.verses[usize::from(id) - 1]
    }

    pub fn chapter(&self, id: ChapterId) -> &Chapter {
        &self.chapters[usize::from(id) - 1]
    }

    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[usize::from(id) - 1]
    }

    pub fn metadata(&self, page: PageId) -> &PageMetadata {
        &self.metadata[usize::from(page) - 1]
    }

    pub fn get_verse(&self, id: VerseId) -> Option<&Verse> {
        self.verses.get(usize::from(id).checked_sub(1)?)
    }

    pub fn get_chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.get(usize::from(id).checked_sub(1)?)
    }

    pub fn get_page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(usize::from(id).checked_sub(1)?)
    }

    pub fn get_metadata(&self, page: PageId) -> Option<&PageMetadata> {
        self.metadata.get(usize::from(page).checked_sub(1)?)
    }

    /// Forces an arbitrary page number into `1..=604`.
    pub fn clamp_page(id: i64) -> PageId {
        // Clamped to a bound that fits, so the cast cannot truncate.
        id.clamp(1, PAGE_COUNT as i64) as PageId
    }

    /// Every verse, in id order.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Every chapter, in id order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Every page, in id order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn verses_in_chapter(&self, chapter: &Chapter) -> &[Verse] {
        &self.verses[chapter.verses.as_indices()]
    }

    pub fn verses_in_page(&self, page: &Page) -> &[Verse] {
        &self.verses[page.verses.as_indices()]
    }

    pub fn chapters_in_page(&self, page: &Page) -> &[Chapter] {
        &self.chapters[page.chapters.as_indices()]
    }

    pub fn pages_in_chapter(&self, chapter: &Chapter) -> &[Page] {
        &self.pages[chapter.pages.as_indices()]
    }

    /// Verses with ids in `range`, clamped to the corpus.
    pub fn verses_in(&self, range: RangeInclusive<VerseId>) -> &[Verse] {
        clamped(&self.verses, range)
    }

    /// Chapters with ids in `range`, clamped to the corpus.
    pub fn chapters_in(&self, range: RangeInclusive<ChapterId>) -> &[Chapter] {
        clamped(&self.chapters, range)
    }

    /// Pages with ids in `range`, clamped to the corpus.
    pub fn pages_in(&self, range: RangeInclusive<PageId>) -> &[Page] {
        clamped(&self.pages, range)
    }

    /// Verses belonging to a quarter-section; empty for an unknown quarter.
    pub fn verses_in_quarter(&self, quarter: QuarterId) -> &[Verse] {
        let start = self.verses.partition_point(|v| v.quarter < quarter);
        let end = self.verses.partition_point(|v| v.quarter <= quarter);
        &self.verses[start..end]
    }

    pub fn chapter_of(&self, verse: &Verse) -> &Chapter {
        self.chapter(verse.chapter)
    }

    pub fn page_of(&self, verse: &Verse) -> &Page {
        self.page(verse.page)
    }

    /// The pages a range of verses is printed on.
    pub fn pages_of(&self, verses: IdRange) -> IdRange {
        let (first, last) = (self.verse(verses.start()), self.verse(verses.end()));
        IdRange::new(first.page, last.page).unwrap_or(IdRange::single(first.page))
    }
}

fn clamped<T>(table: &[T], range: RangeInclusive<u16>) -> &[T] {
    let start = usize::from(*range.start()).max(1);
    let end = usize::from(*range.end()).min(table.len());
    if start > end { &[] } else { &table[start - 1..end] }
}
