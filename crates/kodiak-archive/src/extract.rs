//! Archive extraction.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{ArchiveError, Result};
use crate::format::ArchiveFormat;

/// Extracts `archive` into `dest`.
///
/// Entries whose top-level name is rejected by `keep` are skipped. Returns
/// the extracted top-level paths (files or directories directly under
/// `dest`) in the order they first appear in the archive.
pub fn extract_archive<F>(archive: &Path, dest: &Path, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let format = ArchiveFormat::detect_path(archive).ok_or_else(|| {
        ArchiveError::UnsupportedFormat {
            path: archive.to_path_buf(),
        }
    })?;
    extract_archive_as(archive, format, dest, keep)
}

/// Extracts `archive` as `format`, whatever its file name says.
///
/// Otherwise behaves like [`extract_archive`].
pub fn extract_archive_as<F>(
    archive: &Path,
    format: ArchiveFormat,
    dest: &Path,
    keep: F,
) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    tracing::debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        %format,
        "extracting archive"
    );

    fs::create_dir_all(dest).map_err(ArchiveError::io("create directory", dest))?;
    let file = File::open(archive).map_err(ArchiveError::io("open", archive))?;
    let reader = BufReader::new(file);

    match format {
        ArchiveFormat::Zip => extract_zip(reader, archive, dest, &keep),
        ArchiveFormat::Tar => extract_tar(reader, archive, dest, &keep),
        ArchiveFormat::TarGz => extract_tar(GzDecoder::new(reader), archive, dest, &keep),
    }
}

/// Top-level entries seen so far, in archive order.
#[derive(Default)]
struct TopLevel {
    seen: HashSet<String>,
    ordered: Vec<PathBuf>,
}

impl TopLevel {
    fn record(&mut self, dest: &Path, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.ordered.push(dest.join(name));
        }
    }
}

/// First normal component of an archive-relative path.
fn top_level_name(relative: &Path) -> Option<String> {
    relative.components().find_map(|component| match component {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    })
}

fn extract_zip<R, F>(reader: R, archive_path: &Path, dest: &Path, keep: &F) -> Result<Vec<PathBuf>>
where
    R: Read + io::Seek,
    F: Fn(&str) -> bool,
{
    let mut archive = zip::ZipArchive::new(reader).map_err(ArchiveError::zip(archive_path))?;
    let mut top_level = TopLevel::default();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(ArchiveError::zip(archive_path))?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(ArchiveError::UnsafeEntry {
                entry: entry.name().to_string(),
            });
        };
        let Some(name) = top_level_name(&relative) else {
            continue;
        };
        if !keep(&name) {
            tracing::debug!(entry = %relative.display(), "skipping excluded entry");
            continue;
        }

        let out_path = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(ArchiveError::io("create directory", &out_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(ArchiveError::io("create directory", parent))?;
            }
            let mut out = File::create(&out_path).map_err(ArchiveError::io("create", &out_path))?;
            io::copy(&mut entry, &mut out).map_err(ArchiveError::io("write", &out_path))?;
        }
        top_level.record(dest, &name);
    }

    Ok(top_level.ordered)
}

fn extract_tar<R, F>(reader: R, archive_path: &Path, dest: &Path, keep: &F) -> Result<Vec<PathBuf>>
where
    R: Read,
    F: Fn(&str) -> bool,
{
    let mut archive = Archive::new(reader);
    let mut top_level = TopLevel::default();

    let entries = archive
        .entries()
        .map_err(ArchiveError::io("read entries of", archive_path))?;
    for entry_result in entries {
        let mut entry = entry_result.map_err(ArchiveError::io("read entry of", archive_path))?;
        let relative = entry
            .path()
            .map_err(ArchiveError::io("read entry path of", archive_path))?
            .into_owned();
        let Some(name) = top_level_name(&relative) else {
            continue;
        };
        if !keep(&name) {
            tracing::debug!(entry = %relative.display(), "skipping excluded entry");
            continue;
        }

        let unpacked = entry
            .unpack_in(dest)
            .map_err(ArchiveError::io("unpack entry into", dest))?;
        if !unpacked {
            return Err(ArchiveError::UnsafeEntry {
                entry: relative.display().to_string(),
            });
        }
        top_level.record(dest, &name);
    }

    Ok(top_level.ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, contents) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_zip_keeps_archive_order() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bundle.zip");
        write_zip(
            &archive,
            &[
                ("b.txt", "b"),
                ("a/", ""),
                ("a/inner.txt", "inner"),
                ("index.html", "index"),
                ("c.txt", "c"),
            ],
        );

        let dest = dir.path().join("out");
        let top = extract_archive(&archive, &dest, |name| name != "index.html").unwrap();

        assert_eq!(
            top,
            vec![dest.join("b.txt"), dest.join("a"), dest.join("c.txt")]
        );
        assert_eq!(fs::read_to_string(dest.join("a/inner.txt")).unwrap(), "inner");
        assert!(!dest.join("index.html").exists());
    }

    #[test]
    fn test_extract_as_ignores_file_name() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("download");
        write_zip(&archive, &[("a.txt", "a")]);

        let dest = dir.path().join("out");
        let top = extract_archive_as(&archive, ArchiveFormat::Zip, &dest, |_| true).unwrap();
        assert_eq!(top, vec![dest.join("a.txt")]);
    }

    #[test]
    fn test_extract_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("notes.rar");
        fs::write(&archive, b"data").unwrap();

        let result = extract_archive(&archive, &dir.path().join("out"), |_| true);
        assert!(matches!(result, Err(ArchiveError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_extract_corrupt_zip() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let result = extract_archive(&archive, &dir.path().join("out"), |_| true);
        assert!(matches!(result, Err(ArchiveError::Zip { .. })));
    }
}
