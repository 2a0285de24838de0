//! Archive fingerprinting.
//!
//! The archive copy under `originalArchive/` is what the graded archive is
//! built against; its digest is stored at init and checked at archive time.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// Compute the SHA-256 of a file as lowercase hex.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let read_error = |e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = BufReader::new(File::open(path).map_err(read_error)?);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(read_error)?;

    Ok(hex::encode(hasher.finalize()))
}

/// Check a file against a digest produced by [`compute_file_hash`].
pub fn verify_file_hash(path: &Path, expected_hash: &str) -> Result<bool> {
    Ok(compute_file_hash(path)?.eq_ignore_ascii_case(expected_hash))
}
