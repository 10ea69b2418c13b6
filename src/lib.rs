//! A range-indexed model of a fixed, paginated text, and the selection
//! snapping built on it.
//!
//! - [`index`]: the verse, chapter and page tables and per-page glyph metadata.
//! - [`loader`]: decoding and validating the dataset, and the load-state [`Store`].
//! - [`select`]: snapping selections onto whole verse spans.
//! - [`config`]: layered configuration, turned into a [`Store`] by [`store`].

pub use mushaf_config as config;
pub use mushaf_index as index;
pub use mushaf_loader as loader;
pub use mushaf_select as select;

pub use mushaf_config::Config;
pub use mushaf_index::Corpus;
pub use mushaf_loader::{State, Store};

use mushaf_config::SourceConfig;
use mushaf_loader::error::Result;
use mushaf_loader::source::Directory;
use mushaf_loader::{Loader, SourceHandle};
use std::sync::Arc;

/// The source a configuration points at.
///
/// # Errors
///
/// [`SourceNotFound`](mushaf_loader::error::ErrorKind::SourceNotFound) for the
/// embedded source when this build was compiled without the `embedded` feature.
pub fn source(config: &SourceConfig) -> Result<SourceHandle> {
    Ok(match config {
        #[cfg(feature = "embedded")]
        SourceConfig::Embedded => Arc::new(mushaf_loader::source::Embedded),
        #[cfg(not(feature = "embedded"))]
        SourceConfig::Embedded => {
            tracing::warn!("Embedded dataset requested, but this build does not include one");
            exn::bail!(mushaf_loader::error::ErrorKind::SourceNotFound("embedded".to_string()));
        },
        SourceConfig::Directory { path } => Arc::new(Directory::new(path.clone())),
    })
}

/// An idle store over the configured source and documents. Nothing is read
/// until [`Store::load`].
#[tracing::instrument(skip_all)]
pub fn store(config: &Config) -> Result<Store> {
    let loader = Loader::new(source(&config.source)?).with_documents(config.documents.clone().into());
    tracing::debug!(source = ?config.source, "Store configured");
    Ok(Store::new(loader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushaf_config::DocumentsConfig;
    use mushaf_loader::error::ErrorKind;
    use mushaf_loader::source::{Memory, Source};
    use mushaf_loader::{DEFAULT_INDEX_DOCUMENT, DEFAULT_METADATA_DOCUMENT};
    use std::path::Path;
    use tempfile::TempDir;

    /// Writes the synthetic dataset into `dir` under the given names.
    async fn write_dataset(dir: &Path, index: &str, metadata: &str) {
        let memory = Memory::synthetic();
        let index_bytes = memory.read(DEFAULT_INDEX_DOCUMENT).await.unwrap();
        let metadata_bytes = memory.read(DEFAULT_METADATA_DOCUMENT).await.unwrap();
        std::fs::write(dir.join(index), index_bytes).unwrap();
        std::fs::write(dir.join(metadata), metadata_bytes).unwrap();
    }

    #[tokio::test]
    async fn store_from_directory_config() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), DEFAULT_INDEX_DOCUMENT, DEFAULT_METADATA_DOCUMENT).await;
        let config = Config {
            source: SourceConfig::Directory { path: dir.path().to_path_buf() },
            ..Config::default()
        };

        let store = store(&config).unwrap();
        assert_eq!(store.state(), State::Idle);
        let corpus = store.load().await.unwrap();
        assert_eq!(store.state(), State::Loaded);
        assert_eq!(corpus.pages().len(), index::PAGE_COUNT);
    }

    #[tokio::test]
    async fn store_uses_configured_document_names() {
        let dir = TempDir::new().unwrap();
        write_dataset(dir.path(), "index.json", "pages.json").await;
        let config = Config {
            source: SourceConfig::Directory { path: dir.path().to_path_buf() },
            documents: DocumentsConfig { index: "index.json".to_string(), metadata: "pages.json".to_string() },
        };
        assert!(store(&config).unwrap().load().await.is_ok());
    }

    #[tokio::test]
    async fn directory_without_dataset_fails_to_load() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            source: SourceConfig::Directory { path: dir.path().to_path_buf() },
            ..Config::default()
        };
        let store = store(&config).unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::SourceNotFound(_)));
        assert!(matches!(store.state(), State::Failed(_)));
        assert!(store.corpus().is_none());
    }

    #[cfg(feature = "embedded")]
    #[test]
    fn default_config_uses_embedded_source() {
        let source = source(&SourceConfig::Embedded).unwrap();
        assert_eq!(source.name(), "embedded");
    }
}
