//! Error types for project operations.

use std::path::{Path, PathBuf};

use kodiak_archive::ArchiveError;
use kodiak_model::ModelError;
use kodiak_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur while initialising or archiving a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No `.kodiak` directory between the start directory and the filesystem root.
    #[error("{start} is not inside a Kodiak project")]
    NotAProject { start: PathBuf },

    /// `init` was pointed at a directory that already holds a project.
    #[error("{root} is already a Kodiak project")]
    ProjectAlreadyExists { root: PathBuf },

    /// A file appeared at a target path after it was chosen.
    #[error("refusing to overwrite existing file {path}")]
    TargetCollision { path: PathBuf },

    /// The Kodiak archive to import or rebuild against is missing.
    #[error("archive not found: {path}")]
    MissingArchive { path: PathBuf },

    /// File system error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Submission(#[from] ModelError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ProjectError {
    pub(crate) fn io(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotAProject { .. } => Some(
                "Run the command inside a project or pass --project-root.".into(),
            ),
            Self::ProjectAlreadyExists { root } => Some(format!(
                "Delete {} first to re-import with a different strategy.",
                root.display()
            )),
            Self::Submission(ModelError::MalformedSubmissionName { .. }) => Some(
                "Make sure the archive is an unmodified Kodiak submissions download.".into(),
            ),
            Self::Persistence(err) => err.suggestion(),
            _ => None,
        }
    }
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
