//! Layered configuration.
//!
//! Lowest to highest priority:
//!
//! 1. built-in defaults,
//! 2. `config.toml` in the platform configuration directory, if present,
//! 3. an explicit file (`.toml`, `.yaml`/`.yml` or `.json`),
//! 4. `MUSHAF_`-prefixed environment variables, nested keys split on `__`
//!    (`MUSHAF_SOURCE__PATH=/srv/mushaf`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use mushaf_loader::{DEFAULT_INDEX_DOCUMENT, DEFAULT_METADATA_DOCUMENT, Documents};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of every environment variable read into the configuration.
pub const ENV_PREFIX: &str = "MUSHAF_";
const APPLICATION: &str = "mushaf";
const USER_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub documents: DocumentsConfig,
}

/// Where the dataset documents are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Compiled into the binary.
    #[default]
    Embedded,
    /// Read from a directory at runtime.
    Directory { path: PathBuf },
}

/// Document names inside the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub index: String,
    pub metadata: String,
}
impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX_DOCUMENT.to_string(),
            metadata: DEFAULT_METADATA_DOCUMENT.to_string(),
        }
    }
}
impl From<DocumentsConfig> for Documents {
    fn from(documents: DocumentsConfig) -> Self {
        Documents { index: documents.index, metadata: documents.metadata }
    }
}

impl Config {
    /// Load from every layer, with `file` as the explicit file if given.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let user = user_config_file();
        Self::from_figment(&Self::figment(user.as_deref(), file)?)
    }

    /// The merged layers, before extraction.
    ///
    /// `user` is skipped silently when it does not exist; `file` must exist.
    pub fn figment(user: Option<&Path>, file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(user) = user {
            tracing::debug!(path = %user.display(), "Merging user configuration");
            figment = figment.merge(Toml::file_exact(user));
        }
        if let Some(file) = file {
            figment = merge_file(figment, file)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let SourceConfig::Directory { path } = &self.source
            && path.as_os_str().is_empty()
        {
            tracing::warn!("Directory source configured without a path");
            exn::bail!(ErrorKind::Invalid);
        }
        if self.documents.index.trim().is_empty() || self.documents.metadata.trim().is_empty() {
            tracing::warn!("Document names must not be empty");
            exn::bail!(ErrorKind::Invalid);
        }
        Ok(())
    }
}

/// `config.toml` in the platform configuration directory, if the platform has one.
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", APPLICATION).map(|dirs| dirs.config_dir().join(USER_CONFIG_FILE))
}

fn merge_file(figment: Figment, file: &Path) -> Result<Figment> {
    if !file.is_file() {
        exn::bail!(ErrorKind::FileNotFound(file.display().to_string()));
    }
    let extension = file.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    tracing::debug!(path = %file.display(), format = %extension, "Merging configuration file");
    Ok(match extension.as_str() {
        "toml" => figment.merge(Toml::file_exact(file)),
        "yaml" | "yml" => figment.merge(Yaml::file_exact(file)),
        "json" => figment.merge(Json::file_exact(file)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(extension)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    /// Environment variables are process-wide; every test that reads them runs jailed.
    fn jailed(test: impl FnOnce(&mut Jail)) {
        Jail::expect_with(|jail| {
            test(jail);
            Ok(())
        });
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        jailed(|_| {
            let config = Config::from_figment(&Config::figment(None, None).unwrap()).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.source, SourceConfig::Embedded);
            assert_eq!(Documents::from(config.documents), Documents::default());
        });
    }

    #[rstest]
    #[case("config.toml", "source = { type = \"directory\", path = \"/srv/mushaf\" }\n")]
    #[case("config.yaml", "source:\n  type: directory\n  path: /srv/mushaf\n")]
    #[case("config.yml", "source:\n  type: directory\n  path: /srv/mushaf\n")]
    #[case("config.json", r#"{"source": {"type": "directory", "path": "/srv/mushaf"}}"#)]
    fn explicit_file_formats(#[case] name: &str, #[case] contents: &str) {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, name, contents);
            let config = Config::from_figment(&Config::figment(None, Some(&path)).unwrap()).unwrap();
            assert_eq!(config.source, SourceConfig::Directory { path: PathBuf::from("/srv/mushaf") });
            assert_eq!(config.documents, DocumentsConfig::default());
        });
    }

    #[test]
    fn explicit_file_overrides_user_file() {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let user = write(&dir, "user.toml", "[documents]\nindex = \"user.json\"\nmetadata = \"meta.json\"\n");
            let file = write(&dir, "explicit.toml", "[documents]\nindex = \"explicit.json\"\n");
            let config = Config::from_figment(&Config::figment(Some(&user), Some(&file)).unwrap()).unwrap();
            assert_eq!(config.documents.index, "explicit.json");
            assert_eq!(config.documents.metadata, "meta.json");
        });
    }

    #[test]
    fn missing_user_file_is_skipped() {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let user = dir.path().join("absent.toml");
            let config = Config::from_figment(&Config::figment(Some(&user), None).unwrap()).unwrap();
            assert_eq!(config, Config::default());
        });
    }

    #[test]
    fn environment_overrides_files() {
        jailed(|jail| {
            jail.create_file("config.toml", "[documents]\nindex = \"file.json\"\n").unwrap();
            jail.set_env("MUSHAF_DOCUMENTS__INDEX", "env.json");
            jail.set_env("MUSHAF_SOURCE__TYPE", "directory");
            jail.set_env("MUSHAF_SOURCE__PATH", "/data");
            let figment = Config::figment(None, Some(Path::new("config.toml"))).unwrap();
            let config = Config::from_figment(&figment).unwrap();
            assert_eq!(config.documents.index, "env.json");
            assert_eq!(config.source, SourceConfig::Directory { path: PathBuf::from("/data") });
        });
    }

    #[rstest]
    #[case("source = { type = \"ftp\" }\n")]
    #[case("source = { type = \"directory\" }\n")]
    #[case("source = { type = \"directory\", path = \"\" }\n")]
    #[case("[documents]\nindex = \" \"\n")]
    fn invalid_configuration(#[case] contents: &str) {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "config.toml", contents);
            let err = Config::from_figment(&Config::figment(None, Some(&path)).unwrap()).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
        });
    }

    #[test]
    fn unsupported_format() {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "config.ini", "source = embedded\n");
            let err = Config::figment(None, Some(&path)).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFormat("ini".to_string()));
        });
    }

    #[test]
    fn missing_explicit_file() {
        jailed(|_| {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("absent.toml");
            let err = Config::figment(None, Some(&path)).unwrap_err();
            assert_eq!(*err, ErrorKind::FileNotFound(path.display().to_string()));
        });
    }
}
