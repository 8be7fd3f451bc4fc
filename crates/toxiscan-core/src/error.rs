//! Error types for toxiscan-core.
//!
//! The analysis engine itself never fails: normalizing, counting, ranking and
//! reporting accept any input. Errors only come from the edges, when a
//! configuration or dictionary source cannot be read.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when reading a word source from disk.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source file does not exist.
    #[error("could not find {path}")]
    NotFound {
        /// The path that was looked up.
        path: Utf8PathBuf,
    },

    /// The source file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl SourceError {
    /// Classify an I/O error raised while opening `path`.
    pub fn from_io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Returns `true` when the source was simply absent.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;
