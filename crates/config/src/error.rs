//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The merged configuration does not describe a valid [`Config`](crate::Config).
    /// Fix the file or environment named in the child frame.
    #[display("invalid configuration")]
    Invalid,
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {_0}")]
    FileNotFound(#[error(not(source))] String),
    /// The configuration file extension is not one of `toml`, `yaml`, `yml` or `json`.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
