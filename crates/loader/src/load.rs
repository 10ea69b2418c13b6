use crate::SourceHandle;
use crate::dto::{self, IndexTables};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mushaf_index::Corpus;
use mushaf_index::models::PageMetadata;
use tracing::instrument;

/// Default name of the verse/chapter/page document.
pub const DEFAULT_INDEX_DOCUMENT: &str = "quran.min.json";
/// Default name of the per-page metadata document.
pub const DEFAULT_METADATA_DOCUMENT: &str = "sofha-meta.json";

/// Names of the two documents inside a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    pub index: String,
    pub metadata: String,
}
impl Default for Documents {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX_DOCUMENT.to_string(),
            metadata: DEFAULT_METADATA_DOCUMENT.to_string(),
        }
    }
}

/// Fetches, decodes and validates the corpus from a [`Source`](crate::Source).
///
/// A `Loader` holds no corpus itself; every [`load`](Self::load) builds a
/// fresh one. Use [`Store`](crate::Store) to load once and share the result.
#[derive(Clone)]
pub struct Loader {
    source: SourceHandle,
    documents: Documents,
}

impl Loader {
    pub fn new(source: SourceHandle) -> Self {
        Self { source, documents: Documents::default() }
    }

    pub fn with_documents(mut self, documents: Documents) -> Self {
        self.documents = documents;
        self
    }

    pub fn documents(&self) -> &Documents {
        &self.documents
    }

    /// Load the full corpus.
    ///
    /// Both documents are fetched and decoded concurrently; they only meet at
    /// validation, which needs both. Decoding runs on Tokio's blocking pool.
    ///
    /// # Errors
    ///
    /// - [`SourceNotFound`](ErrorKind::SourceNotFound) if either document is absent.
    /// - [`DecodeError`](ErrorKind::DecodeError) if either document is malformed.
    /// - [`InvalidData`](ErrorKind::InvalidData) if the decoded tables fail
    ///   validation, including the cardinality check.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn load(&self) -> Result<Corpus> {
        let ((verses, chapters, pages), metadata) = tokio::try_join!(self.fetch_index(), self.fetch_metadata())?;
        let corpus = Corpus::new(verses, chapters, pages, metadata).map_err(ErrorKind::index)?;
        tracing::debug!("Corpus built from source");
        Ok(corpus)
    }

    async fn fetch_index(&self) -> Result<IndexTables> {
        let name = self.documents.index.clone();
        let bytes = self.source.read(&name).await?;
        tracing::debug!(document = %name, size = bytes.len(), "Fetched index document");
        decode_blocking(move || dto::decode_index(&name, &bytes)).await
    }

    async fn fetch_metadata(&self) -> Result<Vec<PageMetadata>> {
        let name = self.documents.metadata.clone();
        let bytes = self.source.read(&name).await?;
        tracing::debug!(document = %name, size = bytes.len(), "Fetched metadata document");
        decode_blocking(move || dto::decode_metadata(&name, &bytes)).await
    }
}

async fn decode_blocking<T, F>(decode: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(decode).await.or_raise(|| ErrorKind::Interrupted)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Memory, Source};
    use mushaf_index::error::ErrorKind as IndexErrorKind;
    use mushaf_index::mock;
    use std::sync::Arc;

    #[tokio::test]
    async fn loads_synthetic_corpus() {
        let corpus = Loader::new(Arc::new(Memory::synthetic())).load().await.unwrap();
        assert_eq!(corpus, mock::synthetic());
    }

    #[tokio::test]
    async fn custom_document_names() {
        let source = Memory::synthetic();
        let documents = Documents { index: "index.json".to_string(), metadata: "meta.json".to_string() };
        let defaults = Documents::default();
        let index = source.read(&defaults.index).await.unwrap().into_owned();
        let metadata = source.read(&defaults.metadata).await.unwrap().into_owned();
        let source = Memory::with_documents([("index.json", index), ("meta.json", metadata)]);
        let loader = Loader::new(Arc::new(source)).with_documents(documents);
        assert!(loader.load().await.is_ok());
    }

    #[tokio::test]
    async fn missing_verse_is_invalid_data_count() {
        let (mut verses, chapters, pages, metadata) = mock::tables();
        verses.pop();
        let source = Memory::from_tables((verses, chapters, pages, metadata));
        let err = Loader::new(Arc::new(source)).load().await.unwrap_err();
        assert!(matches!(
            &*err,
            ErrorKind::InvalidData(IndexErrorKind::InvalidDataCount { verses: 6235, chapters: 114, pages: 604, .. })
        ));
        assert_eq!(err.data_count(), Some((6235, 114, 604, 604)));
    }

    #[tokio::test]
    async fn missing_document_is_source_not_found() {
        let source = Memory::synthetic().without_document(DEFAULT_METADATA_DOCUMENT);
        let err = Loader::new(Arc::new(source)).load().await.unwrap_err();
        assert_eq!(*err, ErrorKind::SourceNotFound(DEFAULT_METADATA_DOCUMENT.to_string()));
    }

    #[tokio::test]
    async fn malformed_document_is_decode_error() {
        let source = Memory::synthetic().with_document(DEFAULT_INDEX_DOCUMENT, "{\"ayas\": [{\"id\": \"one\"}]}");
        let err = Loader::new(Arc::new(source)).load().await.unwrap_err();
        assert_eq!(*err, ErrorKind::DecodeError(DEFAULT_INDEX_DOCUMENT.to_string()));
    }

    #[tokio::test]
    async fn inverted_range_is_decode_error() {
        let source = Memory::synthetic().with_document(
            DEFAULT_INDEX_DOCUMENT,
            r#"{"ayas":[],"suras":[{"id":1,"aya_range":[7,1],"sofha_range":[1,1],"rubu_range":[1,1]}],"sofhas":[]}"#,
        );
        let err = Loader::new(Arc::new(source)).load().await.unwrap_err();
        assert_eq!(*err, ErrorKind::DecodeError(DEFAULT_INDEX_DOCUMENT.to_string()));
    }
}
