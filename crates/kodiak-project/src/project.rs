//! Project initialisation and graded archive export.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use kodiak_archive::{ArchiveFormat, create_archive, extract_archive_as};
use kodiak_model::DuplicateStrategy;
use kodiak_persistence::{
    SourceTargetMapping, compute_file_hash, load_mapping, save_mapping, verify_file_hash,
};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::ProjectConfig;
use crate::error::{ProjectError, Result};
use crate::fs_util::copy_preserving_mtime;
use crate::import::{Importer, StudentImport};
use crate::layout::ProjectLayout;
use crate::submission::SubmissionFile;

/// Summary of an `init` run.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub root: PathBuf,
    pub archive: String,
    pub duplicates: DuplicateStrategy,
    /// Submissions found in the archive.
    pub submissions: usize,
    pub imported: usize,
    pub skipped: usize,
    pub students: BTreeMap<String, StudentImport>,
}

/// Summary of an `archive` run.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub root: PathBuf,
    /// The archive ready for upload.
    pub output: PathBuf,
    /// Original submissions staged for the upload.
    pub originals: usize,
    /// Staged copies replaced by a working-tree file.
    pub replaced: usize,
    /// Staged copies replaced by a re-archived working-tree directory.
    pub repacked: usize,
    /// Mapping targets no longer present in the working tree.
    pub missing: Vec<String>,
    /// False if the kept copy of the original archive no longer matches
    /// the hash recorded at init.
    pub archive_verified: bool,
}

/// A project directory and the settings to run it with.
#[derive(Debug, Clone)]
pub struct Project {
    layout: ProjectLayout,
    config: ProjectConfig,
}

impl Project {
    /// A project rooted at `root`, which need not exist yet.
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            layout: ProjectLayout::new(root),
            config,
        }
    }

    /// The project enclosing `start`.
    pub fn open(start: &Path, config: ProjectConfig) -> Result<Self> {
        Ok(Self {
            layout: ProjectLayout::discover(start)?,
            config,
        })
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Create the project from a Kodiak submissions archive.
    pub fn init(&self, archive: &Path) -> Result<InitReport> {
        let layout = &self.layout;
        let span = info_span!("init", root = %layout.root().display());
        let _guard = span.enter();

        if layout.is_project() {
            return Err(ProjectError::ProjectAlreadyExists {
                root: layout.root().to_path_buf(),
            });
        }
        if !archive.is_file() {
            return Err(ProjectError::MissingArchive {
                path: archive.to_path_buf(),
            });
        }
        let archive_name = archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ProjectError::MissingArchive {
                path: archive.to_path_buf(),
            })?;

        // Kodiak downloads are zip files even when saved without an extension.
        let format = ArchiveFormat::detect_path(archive).unwrap_or(ArchiveFormat::Zip);

        layout.create()?;

        let archive_copy = layout.original_archive_dir().join(&archive_name);
        copy_preserving_mtime(archive, &archive_copy)?;
        info!(archive = %archive_name, "Copied original archive");

        let staged_dir = layout.original_submissions_dir();
        let staged = extract_archive_as(&archive_copy, format, &staged_dir, |name| {
            !self.config.is_excluded(name)
        })?;

        let files = self.collect_submissions(&staged)?;
        info!(count = files.len(), "Found submissions");

        for file in &files {
            file.stamp_mtime()?;
        }

        let submissions_dir = layout.submissions_dir();
        let students: BTreeSet<String> = files.iter().map(SubmissionFile::student_key).collect();
        for student in &students {
            let dir = submissions_dir.join(student);
            fs::create_dir_all(&dir).map_err(ProjectError::io("create directory", &dir))?;
        }

        let importer = Importer::new(self.config.duplicates);
        let outcome = importer.run(&files, &submissions_dir)?;

        let mut mapping = SourceTargetMapping::new(&archive_name, self.config.duplicates.as_str());
        mapping.archive_sha256 = compute_file_hash(&archive_copy)?;
        for imported in &outcome.imported {
            mapping.push(
                imported.source.clone(),
                relative_target(&submissions_dir, &imported.target),
            );
        }
        save_mapping(&mut mapping, &layout.mapping_file())?;
        info!(entries = mapping.len(), "Saved source-target mapping");

        Ok(InitReport {
            root: layout.root().to_path_buf(),
            archive: archive_name,
            duplicates: self.config.duplicates,
            submissions: files.len(),
            imported: outcome.imported.len(),
            skipped: outcome.skipped(),
            students: outcome.students,
        })
    }

    /// Rebuild the Kodiak archive from the working tree.
    pub fn archive(&self) -> Result<ArchiveReport> {
        let layout = &self.layout;
        let span = info_span!("archive", root = %layout.root().display());
        let _guard = span.enter();

        let mapping = load_mapping(&layout.mapping_file())?;
        let original = layout.original_archive_dir().join(&mapping.original_archive);
        if !original.is_file() {
            return Err(ProjectError::MissingArchive { path: original });
        }
        let archive_verified = mapping.archive_sha256.is_empty()
            || verify_file_hash(&original, &mapping.archive_sha256)?;
        if !archive_verified {
            warn!(
                archive = %original.display(),
                "Original archive changed since init"
            );
        }

        let graded_dir = layout.graded_submissions_dir();
        fs::create_dir_all(&graded_dir).map_err(ProjectError::io("create directory", &graded_dir))?;
        let originals = stage_originals(&layout.original_submissions_dir(), &graded_dir)?;
        info!(count = originals, "Staged original submissions");

        let submissions_dir = layout.submissions_dir();
        let mut report = ArchiveReport {
            root: layout.root().to_path_buf(),
            output: PathBuf::new(),
            originals,
            replaced: 0,
            repacked: 0,
            missing: Vec::new(),
            archive_verified,
        };

        for entry in mapping.iter() {
            let target = resolve_target(&submissions_dir, &entry.target);
            let staged = graded_dir.join(&entry.source);

            if target.is_dir() {
                let format = ArchiveFormat::detect(&entry.source).unwrap_or_else(|| {
                    warn!(source = %entry.source, "No archive extension on source, writing zip");
                    ArchiveFormat::Zip
                });
                debug!(target = %entry.target, source = %entry.source, "Re-archiving directory");
                create_archive(&target, &staged, format)?;
                report.repacked += 1;
            } else if target.is_file() {
                debug!(target = %entry.target, source = %entry.source, "Replacing submission");
                copy_preserving_mtime(&target, &staged)?;
                report.replaced += 1;
            } else {
                warn!(
                    target = %entry.target,
                    source = %entry.source,
                    "Target missing from working tree, keeping original submission"
                );
                report.missing.push(entry.target.clone());
            }
        }

        let (output_name, format) = match ArchiveFormat::detect(&mapping.original_archive) {
            Some(format) => (mapping.original_archive.clone(), format),
            None => (
                format!("{}{}", mapping.original_archive, ArchiveFormat::Zip.extension()),
                ArchiveFormat::Zip,
            ),
        };
        let output_dir = layout.graded_archive_dir();
        fs::create_dir_all(&output_dir).map_err(ProjectError::io("create directory", &output_dir))?;
        let output = output_dir.join(output_name);
        create_archive(&graded_dir, &output, format)?;
        info!(output = %output.display(), "Wrote graded archive");

        report.output = output;
        Ok(report)
    }

    fn collect_submissions(&self, staged: &[PathBuf]) -> Result<Vec<SubmissionFile>> {
        let mut files = Vec::with_capacity(staged.len());
        for path in staged {
            if !path.is_file() {
                warn!(path = %path.display(), "Skipping non-file archive entry");
                continue;
            }
            files.push(SubmissionFile::from_path(path)?);
        }
        Ok(files)
    }
}

/// Copy every top-level staged file into `graded_dir`, in name order.
fn stage_originals(staged_dir: &Path, graded_dir: &Path) -> Result<usize> {
    let mut paths = fs::read_dir(staged_dir)
        .map_err(ProjectError::io("read directory", staged_dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(ProjectError::io("read directory", staged_dir))?;
    paths.sort();

    let mut count = 0;
    for path in paths.iter().filter(|p| p.is_file()) {
        let Some(name) = path.file_name() else {
            continue;
        };
        copy_preserving_mtime(path, &graded_dir.join(name))?;
        count += 1;
    }
    Ok(count)
}

/// `target` below `base` as a `/`-separated string.
fn relative_target(base: &Path, target: &Path) -> String {
    let relative = target.strip_prefix(base).unwrap_or(target);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

fn resolve_target(base: &Path, target: &str) -> PathBuf {
    target
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_target_round_trip() {
        let base = Path::new("/p/submissions");
        let target = base.join("Pelt_Lucy").join("hw (1).txt");
        let stored = relative_target(base, &target);
        assert_eq!(stored, "Pelt_Lucy/hw (1).txt");
        assert_eq!(resolve_target(base, &stored), target);
    }

    #[test]
    fn test_resolve_target_stays_below_base() {
        let base = Path::new("/p/submissions");
        assert_eq!(
            resolve_target(base, "../../etc/passwd"),
            base.join("etc").join("passwd")
        );
    }
}
