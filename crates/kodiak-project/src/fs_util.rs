//! File helpers that keep modification times intact.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::time::SystemTime;

use crate::error::{ProjectError, Result};

pub(crate) fn set_mtime(path: &Path, time: SystemTime) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(time))
        .map_err(ProjectError::io("set modification time of", path))
}

/// Copy `src` over `dest`, carrying the source modification time across.
pub(crate) fn copy_preserving_mtime(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest).map_err(ProjectError::io("copy", src))?;
    let modified = fs::metadata(src)
        .and_then(|meta| meta.modified())
        .map_err(ProjectError::io("read metadata of", src))?;
    set_mtime(dest, modified)
}

/// Copy `src` to a `dest` that must not exist yet and stamp it with `time`.
pub(crate) fn copy_new(src: &Path, dest: &Path, time: SystemTime) -> Result<()> {
    let mut dest_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                ProjectError::TargetCollision {
                    path: dest.to_path_buf(),
                }
            } else {
                ProjectError::Io {
                    operation: "create",
                    path: dest.to_path_buf(),
                    source,
                }
            }
        })?;

    let mut src_file = File::open(src).map_err(ProjectError::io("open", src))?;
    io::copy(&mut src_file, &mut dest_file).map_err(ProjectError::io("write", dest))?;
    dest_file
        .set_modified(time)
        .map_err(ProjectError::io("set modification time of", dest))
}
