//! On-disk layout of a project.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ProjectError, Result};

/// Directory that marks a project root and holds its private state.
pub const STATE_DIR: &str = ".kodiak";

/// Name of the persisted source-to-target mapping inside [`STATE_DIR`].
pub const MAPPING_FILE: &str = "sourceTargetMapping";

const ORIGINAL_ARCHIVE_DIR: &str = "originalArchive";
const ORIGINAL_SUBMISSIONS_DIR: &str = "originalSubmissions";
const SUBMISSIONS_DIR: &str = "submissions";
const GRADED_SUBMISSIONS_DIR: &str = "gradedSubmissions";
const GRADED_ARCHIVE_DIR: &str = "gradedArchive";

/// Paths of every directory in a project rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the nearest enclosing project, starting at `start` and walking
    /// up through its ancestors.
    pub fn discover(start: &Path) -> Result<Self> {
        let resolved = start
            .canonicalize()
            .map_err(ProjectError::io("resolve", start))?;

        let root = resolved
            .ancestors()
            .find(|dir| dir.join(STATE_DIR).exists())
            .ok_or_else(|| ProjectError::NotAProject {
                start: start.to_path_buf(),
            })?;

        debug!(root = %root.display(), "Found project root");
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if the root already carries project state.
    pub fn is_project(&self) -> bool {
        self.state_dir().exists()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn mapping_file(&self) -> PathBuf {
        self.state_dir().join(MAPPING_FILE)
    }

    pub fn original_archive_dir(&self) -> PathBuf {
        self.root.join(ORIGINAL_ARCHIVE_DIR)
    }

    pub fn original_submissions_dir(&self) -> PathBuf {
        self.root.join(ORIGINAL_SUBMISSIONS_DIR)
    }

    pub fn submissions_dir(&self) -> PathBuf {
        self.root.join(SUBMISSIONS_DIR)
    }

    pub fn graded_submissions_dir(&self) -> PathBuf {
        self.root.join(GRADED_SUBMISSIONS_DIR)
    }

    pub fn graded_archive_dir(&self) -> PathBuf {
        self.root.join(GRADED_ARCHIVE_DIR)
    }

    /// Every directory `init` creates, state directory first.
    pub fn directories(&self) -> [PathBuf; 6] {
        [
            self.state_dir(),
            self.original_archive_dir(),
            self.original_submissions_dir(),
            self.submissions_dir(),
            self.graded_submissions_dir(),
            self.graded_archive_dir(),
        ]
    }

    /// Create the directory tree.
    pub fn create(&self) -> Result<()> {
        for dir in self.directories() {
            std::fs::create_dir_all(&dir).map_err(ProjectError::io("create directory", &dir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        layout.create().unwrap();
        let nested = layout.submissions_dir().join("Pelt_Lucy");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ProjectLayout::discover(&nested).unwrap();
        assert_eq!(found.root(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_discover_outside_project() {
        let temp = TempDir::new().unwrap();
        let err = ProjectLayout::discover(temp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotAProject { .. }));
    }

    #[test]
    fn test_create_marks_project() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path().join("hw"));
        assert!(!layout.is_project());
        layout.create().unwrap();
        assert!(layout.is_project());
        assert!(layout.directories().iter().all(|dir| dir.is_dir()));
    }
}
