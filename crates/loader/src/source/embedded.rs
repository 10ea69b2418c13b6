//! Dataset compiled into the binary.
//!
//! Documents under `assets/data/` at the workspace root are embedded at
//! compile time using [`rust-embed`](rust_embed). Debug builds read the
//! folder from disk instead, so the dataset can be swapped without a rebuild.

use super::Source;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::OptionExt;
use rust_embed::Embed;
use std::borrow::Cow;

#[derive(Embed)]
#[folder = "../../assets/data/"]
struct Assets;

/// The bundled dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Embedded;
impl Embedded {
    /// List the bundled JSON documents.
    pub fn list() -> Vec<Cow<'static, str>> {
        Assets::iter().filter(|f| f.ends_with(".json")).collect()
    }

    pub(crate) fn identifier(document: impl AsRef<str>) -> String {
        format!("embedded:{}", document.as_ref().trim().trim_start_matches("embedded:"))
    }
}

#[async_trait]
impl Source for Embedded {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn read(&self, document: &str) -> Result<Cow<'static, [u8]>> {
        let document = document.trim().trim_start_matches("embedded:");
        Assets::get(document).map(|f| f.data).ok_or_raise(|| ErrorKind::SourceNotFound(Self::identifier(document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_prefixed_once() {
        assert_eq!(Embedded::identifier("quran.min.json"), "embedded:quran.min.json");
        assert_eq!(Embedded::identifier("embedded:quran.min.json"), "embedded:quran.min.json");
    }

    #[test]
    fn list_only_has_json() {
        assert!(Embedded::list().iter().all(|name| name.ends_with(".json")));
    }

    #[tokio::test]
    async fn missing_document_is_source_not_found() {
        let err = Embedded.read("definitely-not-bundled.json").await.unwrap_err();
        assert_eq!(*err, ErrorKind::SourceNotFound("embedded:definitely-not-bundled.json".to_string()));
    }
}
