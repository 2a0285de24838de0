//! Archive creation.

use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Datelike, Local, Timelike};
use flate2::Compression;
use flate2::write::GzEncoder;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ArchiveError, Result};
use crate::format::ArchiveFormat;

/// A file or directory below the source directory.
struct SourceEntry {
    path: PathBuf,
    relative: PathBuf,
    is_dir: bool,
}

/// Packs the contents of `src_dir` into `dest` using `format`.
///
/// Entry names are relative to `src_dir` and written in file-name order,
/// so packing the same tree twice yields the same entry list. An existing
/// `dest` is replaced.
pub fn create_archive(src_dir: &Path, dest: &Path, format: ArchiveFormat) -> Result<()> {
    tracing::debug!(src = %src_dir.display(), dest = %dest.display(), %format, "creating archive");

    let entries = collect_entries(src_dir)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(ArchiveError::io("create directory", parent))?;
    }
    let file = File::create(dest).map_err(ArchiveError::io("create", dest))?;
    let writer = BufWriter::new(file);

    let mut writer = match format {
        ArchiveFormat::Zip => write_zip(writer, &entries, dest)?,
        ArchiveFormat::Tar => write_tar(writer, &entries, dest)?,
        ArchiveFormat::TarGz => {
            let gz = GzEncoder::new(writer, Compression::default());
            let encoder = write_tar(gz, &entries, dest)?;
            encoder.finish().map_err(ArchiveError::io("compress", dest))?
        }
    };
    writer.flush().map_err(ArchiveError::io("write", dest))?;

    tracing::debug!(dest = %dest.display(), entries = entries.len(), "archive written");
    Ok(())
}

fn collect_entries(src_dir: &Path) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(src_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src_dir).to_path_buf();
            ArchiveError::Io {
                operation: "walk",
                path,
                source: e.into(),
            }
        })?;
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        entries.push(SourceEntry {
            path: entry.path().to_path_buf(),
            relative,
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// ZIP entry names always use forward slashes.
fn zip_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Convert a file modification time to a ZIP (DOS) timestamp in local time.
fn zip_timestamp(modified: SystemTime) -> Option<zip::DateTime> {
    let local: chrono::DateTime<Local> = modified.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}

fn write_zip<W: Write + Seek>(writer: W, entries: &[SourceEntry], dest: &Path) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        let name = zip_name(&entry.relative);
        if entry.is_dir {
            zip.add_directory(name, options)
                .map_err(ArchiveError::zip(dest))?;
            continue;
        }

        let mut source = File::open(&entry.path).map_err(ArchiveError::io("open", &entry.path))?;
        let modified = source
            .metadata()
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(zip_timestamp);
        let file_options = match modified {
            Some(timestamp) => options.last_modified_time(timestamp),
            None => options,
        };
        zip.start_file(name, file_options)
            .map_err(ArchiveError::zip(dest))?;
        io::copy(&mut source, &mut zip).map_err(ArchiveError::io("write", dest))?;
    }

    zip.finish().map_err(ArchiveError::zip(dest))
}

fn write_tar<W: Write>(writer: W, entries: &[SourceEntry], dest: &Path) -> Result<W> {
    let mut builder = tar::Builder::new(writer);
    for entry in entries {
        builder
            .append_path_with_name(&entry.path, &entry.relative)
            .map_err(ArchiveError::io("append to", dest))?;
    }
    builder.into_inner().map_err(ArchiveError::io("finish", dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_name_uses_forward_slashes() {
        let relative: PathBuf = ["z", "q"].iter().collect();
        assert_eq!(zip_name(&relative), "z/q");
    }

    #[test]
    fn test_zip_timestamp_before_dos_epoch() {
        assert!(zip_timestamp(SystemTime::UNIX_EPOCH).is_none());
    }
}
