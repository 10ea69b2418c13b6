//! In-memory source for testing.

use super::Source;
use crate::Documents;
use crate::dto::{ChapterProxy, IndexDocument, MetadataProxy, PageProxy, VerseProxy};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::OptionExt;
use mushaf_index::mock::{self, Tables};
use std::borrow::Cow;
use std::collections::HashMap;

/// Documents held in a map, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    documents: HashMap<String, Vec<u8>>,
}

impl Memory {
    pub fn with_documents(documents: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        Self {
            documents: documents.into_iter().map(|(name, data)| (name.into(), data.into())).collect(),
        }
    }

    /// The synthetic corpus from [`mushaf_index::mock`], encoded under the
    /// default document names.
    pub fn synthetic() -> Self {
        Self::from_tables(mock::tables())
    }

    /// Encode (possibly tampered) tables under the default document names.
    ///
    /// Panics if encoding fails, which would mean the fixture itself is broken.
    pub fn from_tables((verses, chapters, pages, metadata): Tables) -> Self {
        let index = IndexDocument {
            ayas: verses.iter().map(VerseProxy::from).collect(),
            suras: chapters.iter().map(ChapterProxy::from).collect(),
            sofhas: pages.iter().map(PageProxy::from).collect(),
        };
        let metadata: Vec<_> = metadata.iter().map(MetadataProxy::from).collect();
        let documents = Documents::default();
        let (Ok(index), Ok(metadata)) = (serde_json::to_vec(&index), serde_json::to_vec(&metadata)) else {
            panic!("Memory::from_tables: fixture tables failed to encode");
        };
        Self::with_documents([(documents.index, index), (documents.metadata, metadata)])
    }

    /// Replace (or add) a single document.
    pub fn with_document(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(name.into(), data.into());
        self
    }

    pub fn without_document(mut self, name: &str) -> Self {
        self.documents.remove(name);
        self
    }
}

#[async_trait]
impl Source for Memory {
    fn name(&self) -> &str {
        "memory"
    }

    async fn read(&self, document: &str) -> Result<Cow<'static, [u8]>> {
        self.documents
            .get(document)
            .map(|data| Cow::Owned(data.clone()))
            .ok_or_raise(|| ErrorKind::SourceNotFound(document.to_string()))
    }
}
