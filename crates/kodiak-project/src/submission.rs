//! A submission staged in the original-submissions directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDateTime;
use kodiak_archive::{ArchiveFormat, extract_archive};
use kodiak_model::{ModelError, SubmissionFilename};

use crate::error::Result;
use crate::fs_util::{copy_new, set_mtime};

/// A staged submission file together with its decoded Kodiak name.
#[derive(Debug, Clone)]
pub struct SubmissionFile {
    path: PathBuf,
    source_name: String,
    name: SubmissionFilename,
    format: Option<ArchiveFormat>,
}

impl SubmissionFile {
    /// Decode the file name of a staged submission.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ModelError::MalformedSubmissionName {
                name: path.display().to_string(),
                reason: "file name is not valid UTF-8".into(),
            })?
            .to_string();
        let name = SubmissionFilename::parse(&source_name)?;
        let format = ArchiveFormat::detect(name.original_filename());

        Ok(Self {
            path: path.to_path_buf(),
            source_name,
            name,
            format,
        })
    }

    /// The entry name Kodiak gave this submission.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn name(&self) -> &SubmissionFilename {
        &self.name
    }

    pub fn student_key(&self) -> String {
        self.name.student_key()
    }

    pub fn submission_time(&self) -> NaiveDateTime {
        self.name.submission_time()
    }

    pub fn is_archive(&self) -> bool {
        self.format.is_some()
    }

    /// Name of the working-tree entry before any numbering: the student's
    /// original file name, or for archives that name without its extension.
    pub fn target_name(&self) -> &str {
        let original = self.name.original_filename();
        match self.format {
            Some(_) => ArchiveFormat::strip_extension(original).unwrap_or(original),
            None => original,
        }
    }

    /// Working-tree path before any numbering.
    pub fn bare_target(&self, submissions_dir: &Path) -> PathBuf {
        submissions_dir
            .join(self.student_key())
            .join(self.target_name())
    }

    pub fn submitted_at(&self) -> SystemTime {
        self.name.submission_system_time()
    }

    /// Set the staged file's modification time to the submission time.
    pub fn stamp_mtime(&self) -> Result<()> {
        set_mtime(&self.path, self.submitted_at())
    }

    /// Write this submission at `target`: archives are extracted into a
    /// directory, anything else is copied.
    pub fn write_to(&self, target: &Path) -> Result<()> {
        if self.is_archive() {
            extract_archive(&self.path, target, |_| true)?;
            Ok(())
        } else {
            copy_new(&self.path, target, self.submitted_at())
        }
    }
}
