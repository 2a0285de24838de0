//! Error types for archive handling.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading or writing archives.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The file name does not carry a supported archive extension.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// I/O error during file operations.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ZIP container is damaged or could not be written.
    #[error("ZIP error in {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry would be written outside the extraction directory.
    #[error("archive entry '{entry}' escapes the extraction directory")]
    UnsafeEntry { entry: String },
}

impl ArchiveError {
    pub(crate) fn io(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }

    pub(crate) fn zip(path: &Path) -> impl FnOnce(zip::result::ZipError) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Zip { path, source }
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
