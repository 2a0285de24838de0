//! Import staged submissions into the per-student working tree.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kodiak_model::{CollisionAction, DuplicateStrategy, ProcessingOrder};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ProjectError, Result};
use crate::submission::SubmissionFile;

/// A staged submission and the working-tree path it was written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub source: String,
    pub target: PathBuf,
}

/// Per-student import counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentImport {
    pub imported: usize,
    pub renamed: usize,
    pub skipped: usize,
}

/// Result of importing a batch of submissions.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Written submissions in the order they were written.
    pub imported: Vec<ImportedFile>,
    pub students: BTreeMap<String, StudentImport>,
}

impl ImportOutcome {
    pub fn skipped(&self) -> usize {
        self.students.values().map(|s| s.skipped).sum()
    }
}

/// Writes submissions into a submissions directory under a duplicates strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    strategy: DuplicateStrategy,
}

impl Importer {
    pub fn new(strategy: DuplicateStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> DuplicateStrategy {
        self.strategy
    }

    /// Order submissions for processing. The sort is stable, so submissions
    /// with equal times keep their given order.
    pub fn order<'a>(&self, files: &'a [SubmissionFile]) -> Vec<&'a SubmissionFile> {
        let mut ordered: Vec<&SubmissionFile> = files.iter().collect();
        match self.strategy.order() {
            ProcessingOrder::OldestFirst => ordered.sort_by_key(|f| f.submission_time()),
            ProcessingOrder::NewestFirst => ordered.sort_by_key(|f| Reverse(f.submission_time())),
        }
        ordered
    }

    /// Write every submission below `submissions_dir`.
    ///
    /// Student directories are created on demand. Under a numbering strategy
    /// every submission is written; under a skip strategy a submission whose
    /// bare target already exists is left out.
    pub fn run(&self, files: &[SubmissionFile], submissions_dir: &Path) -> Result<ImportOutcome> {
        let mut outcome = ImportOutcome::default();

        for file in self.order(files) {
            let student = file.student_key();
            let counts = outcome.students.entry(student.clone()).or_default();
            let student_dir = submissions_dir.join(&student);
            std::fs::create_dir_all(&student_dir)
                .map_err(ProjectError::io("create directory", &student_dir))?;

            let bare = file.bare_target(submissions_dir);
            let target = match self.strategy.on_collision() {
                CollisionAction::Skip if bare.exists() => {
                    debug!(source = file.source_name(), "Skipping superseded submission");
                    counts.skipped += 1;
                    continue;
                }
                CollisionAction::Skip => bare,
                CollisionAction::Number => {
                    let target = unique_target(&bare);
                    if target != bare {
                        counts.renamed += 1;
                    }
                    target
                }
            };

            debug!(
                source = file.source_name(),
                target = %target.display(),
                "Importing submission"
            );
            file.write_to(&target)?;
            counts.imported += 1;
            outcome.imported.push(ImportedFile {
                source: file.source_name().to_string(),
                target,
            });
        }

        info!(
            strategy = %self.strategy,
            imported = outcome.imported.len(),
            skipped = outcome.skipped(),
            "Imported submissions"
        );
        Ok(outcome)
    }
}

/// First free path for `candidate`: the path itself, else `stem (k)ext` for
/// the smallest `k >= 1` that does not exist.
pub fn unique_target(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut k: u32 = 1;
    loop {
        let numbered = candidate.with_file_name(format!("{stem} ({k}){extension}"));
        if !numbered.exists() {
            return numbered;
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn staged(dir: &Path, name: &str) -> SubmissionFile {
        let path = dir.join(name);
        fs::write(&path, name).unwrap();
        SubmissionFile::from_path(&path).unwrap()
    }

    #[test]
    fn test_unique_target_fills_first_gap() {
        let temp = TempDir::new().unwrap();
        let bare = temp.path().join("hw.txt");
        assert_eq!(unique_target(&bare), bare);

        fs::write(&bare, "").unwrap();
        fs::write(temp.path().join("hw (1).txt"), "").unwrap();
        fs::write(temp.path().join("hw (3).txt"), "").unwrap();
        assert_eq!(unique_target(&bare), temp.path().join("hw (2).txt"));
    }

    #[test]
    fn test_unique_target_directory_without_extension() {
        let temp = TempDir::new().unwrap();
        let bare = temp.path().join("CharlieB_HW4");
        fs::create_dir(&bare).unwrap();
        assert_eq!(unique_target(&bare), temp.path().join("CharlieB_HW4 (1)"));
    }

    #[test]
    fn test_newest_first_keeps_tie_order() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            staged(temp.path(), "1-1 - Lucy Pelt - Oct 1, 2023 1004 PM - a.txt"),
            staged(temp.path(), "1-2 - Lucy Pelt - Oct 1, 2023 1017 PM - b.txt"),
            staged(temp.path(), "1-3 - Lucy Pelt - Oct 1, 2023 1004 PM - c.txt"),
        ];
        let importer = Importer::new(DuplicateStrategy::NewestOnly);
        let order: Vec<&str> = importer
            .order(&files)
            .iter()
            .map(|f| f.name().original_filename())
            .collect();
        assert_eq!(order, ["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn test_skip_strategy_keeps_existing_targets() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        let submissions = temp.path().join("submissions");
        fs::create_dir_all(&staging).unwrap();
        let files = vec![
            staged(&staging, "1-1 - Lucy Pelt - Oct 1, 2023 1004 PM - hw.txt"),
            staged(&staging, "1-2 - Lucy Pelt - Oct 1, 2023 1017 PM - hw.txt"),
        ];

        let outcome = Importer::new(DuplicateStrategy::OldestOnly)
            .run(&files, &submissions)
            .unwrap();

        assert_eq!(outcome.imported.len(), 1);
        assert_eq!(outcome.skipped(), 1);
        let content = fs::read_to_string(submissions.join("Pelt_Lucy/hw.txt")).unwrap();
        assert_eq!(content, "1-1 - Lucy Pelt - Oct 1, 2023 1004 PM - hw.txt");
    }
}
