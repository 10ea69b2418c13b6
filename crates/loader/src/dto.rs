//! Wire shapes of the two dataset documents.
//!
//! Kept apart from the index models so the domain types stay free of serde
//! and of the dataset's key names.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mushaf_index::models::{Chapter, IdRange, Page, PageMetadata, Span, Verse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

pub(crate) type IndexTables = (Vec<Verse>, Vec<Chapter>, Vec<Page>);

/// `[lower, upper]`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[u16; 2]", into = "[u16; 2]")]
pub(crate) struct RangeProxy(IdRange);
impl TryFrom<[u16; 2]> for RangeProxy {
    type Error = String;
    fn try_from([lower, upper]: [u16; 2]) -> std::result::Result<Self, Self::Error> {
        IdRange::new(lower, upper)
            .map(Self)
            .ok_or_else(|| format!("range lower bound {lower} exceeds upper bound {upper}"))
    }
}
impl From<RangeProxy> for [u16; 2] {
    fn from(range: RangeProxy) -> Self {
        [range.0.start(), range.0.end()]
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct IndexDocument {
    pub ayas: Vec<VerseProxy>,
    pub suras: Vec<ChapterProxy>,
    pub sofhas: Vec<PageProxy>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct VerseProxy {
    id: u16,
    number: u16,
    text: String,
    #[serde(rename = "sura")]
    chapter: u16,
    #[serde(rename = "rubu")]
    quarter: u16,
    #[serde(rename = "sofha")]
    page: u16,
}
impl From<&Verse> for VerseProxy {
    fn from(verse: &Verse) -> Self {
        Self {
            id: verse.id,
            number: verse.number,
            text: verse.text.clone(),
            chapter: verse.chapter,
            quarter: verse.quarter,
            page: verse.page,
        }
    }
}
impl From<VerseProxy> for Verse {
    fn from(verse: VerseProxy) -> Self {
        Self {
            id: verse.id,
            number: verse.number,
            text: verse.text,
            chapter: verse.chapter,
            quarter: verse.quarter,
            page: verse.page,
        }
    }
}

/// Other range keys in the dataset (`juz_range`, `hizb_range`) are ignored.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ChapterProxy {
    id: u16,
    #[serde(rename = "aya_range")]
    verses: RangeProxy,
    #[serde(rename = "sofha_range")]
    pages: RangeProxy,
    #[serde(rename = "rubu_range")]
    quarters: RangeProxy,
}
impl From<&Chapter> for ChapterProxy {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            verses: RangeProxy(chapter.verses),
            pages: RangeProxy(chapter.pages),
            quarters: RangeProxy(chapter.quarters),
        }
    }
}
impl From<ChapterProxy> for Chapter {
    fn from(chapter: ChapterProxy) -> Self {
        Self {
            id: chapter.id,
            verses: chapter.verses.0,
            pages: chapter.pages.0,
            quarters: chapter.quarters.0,
        }
    }
}

/// Written with `rubu_range`. Read through [`PageRecord`], which also takes the
/// quarter range from `juz_range`.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PageRecord")]
pub(crate) struct PageProxy {
    id: u16,
    #[serde(rename = "aya_range")]
    verses: RangeProxy,
    #[serde(rename = "sura_range")]
    chapters: RangeProxy,
    #[serde(rename = "rubu_range")]
    quarters: RangeProxy,
}

/// A page as it appears on the wire. The dataset stores the page's quarter
/// range under `juz_range`; when both keys are present `juz_range` wins.
#[derive(Deserialize)]
struct PageRecord {
    id: u16,
    #[serde(rename = "aya_range")]
    verses: RangeProxy,
    #[serde(rename = "sura_range")]
    chapters: RangeProxy,
    #[serde(rename = "juz_range", default)]
    juz: Option<RangeProxy>,
    #[serde(rename = "rubu_range", default)]
    rubu: Option<RangeProxy>,
}
impl TryFrom<PageRecord> for PageProxy {
    type Error = String;
    fn try_from(record: PageRecord) -> std::result::Result<Self, Self::Error> {
        let quarters = record
            .juz
            .or(record.rubu)
            .ok_or_else(|| format!("page {} has neither `juz_range` nor `rubu_range`", record.id))?;
        Ok(Self { id: record.id, verses: record.verses, chapters: record.chapters, quarters })
    }
}
impl From<&Page> for PageProxy {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            verses: RangeProxy(page.verses),
            chapters: RangeProxy(page.chapters),
            quarters: RangeProxy(page.quarters),
        }
    }
}
impl From<PageProxy> for Page {
    fn from(page: PageProxy) -> Self {
        Self {
            id: page.id,
            verses: page.verses.0,
            chapters: page.chapters.0,
            quarters: page.quarters.0,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct MetadataProxy {
    #[serde(rename = "text")]
    glyphs: String,
    #[serde(rename = "headers_lines", default, skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<u16, u16>>,
    spans: Vec<SpanProxy>,
}
impl From<&PageMetadata> for MetadataProxy {
    fn from(metadata: &PageMetadata) -> Self {
        Self {
            glyphs: metadata.glyphs.clone(),
            headers: metadata.headers.clone(),
            spans: metadata.spans.iter().map(SpanProxy::from).collect(),
        }
    }
}
impl From<MetadataProxy> for PageMetadata {
    fn from(metadata: MetadataProxy) -> Self {
        Self {
            glyphs: metadata.glyphs,
            headers: metadata.headers,
            spans: metadata.spans.into_iter().map(Span::from).collect(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SpanProxy {
    reference: String,
    location: usize,
    length: usize,
}
impl From<&Span> for SpanProxy {
    fn from(span: &Span) -> Self {
        Self {
            reference: span.reference.clone(),
            location: span.location,
            length: span.length,
        }
    }
}
impl From<SpanProxy> for Span {
    fn from(span: SpanProxy) -> Self {
        Span::new(span.reference, span.location, span.length)
    }
}

#[instrument(level = "debug", skip(bytes), fields(size = bytes.len()))]
pub(crate) fn decode_index(name: &str, bytes: &[u8]) -> Result<IndexTables> {
    let document: IndexDocument =
        serde_json::from_slice(bytes).or_raise(|| ErrorKind::DecodeError(name.to_string()))?;
    Ok((
        document.ayas.into_iter().map(Verse::from).collect(),
        document.suras.into_iter().map(Chapter::from).collect(),
        document.sofhas.into_iter().map(Page::from).collect(),
    ))
}

#[instrument(level = "debug", skip(bytes), fields(size = bytes.len()))]
pub(crate) fn decode_metadata(name: &str, bytes: &[u8]) -> Result<Vec<PageMetadata>> {
    let document: Vec<MetadataProxy> =
        serde_json::from_slice(bytes).or_raise(|| ErrorKind::DecodeError(name.to_string()))?;
    Ok(document.into_iter().map(PageMetadata::from).collect())
}
