//! Dataset read from a directory at runtime.

use super::Source;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use std::borrow::Cow;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::instrument;

/// Documents are files directly inside `root`.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}
impl Directory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only plain file names (or relative paths without `..`) are accepted,
    /// anything else can never be found inside the root.
    fn resolve(&self, document: &str) -> Option<PathBuf> {
        let relative = Path::new(document);
        let plain = relative.components().all(|c| matches!(c, Component::Normal(_)));
        (plain && !document.is_empty()).then(|| self.root.join(relative))
    }
}

#[async_trait]
impl Source for Directory {
    fn name(&self) -> &str {
        "directory"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn read(&self, document: &str) -> Result<Cow<'static, [u8]>> {
        let Some(path) = self.resolve(document) else {
            exn::bail!(ErrorKind::SourceNotFound(document.to_string()));
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(e).or_raise(|| ErrorKind::SourceNotFound(path.display().to_string()))
            },
            Err(e) => Err(e).or_raise(|| ErrorKind::Io(path.display().to_string())),
        }
    }
}
