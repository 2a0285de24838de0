//! Mapping saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, SourceTargetMapping};

/// Save a mapping to `path`.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a truncated mapping behind.
pub fn save_mapping(mapping: &mut SourceTargetMapping, path: &Path) -> Result<()> {
    mapping.touch();

    let bytes = serialize_mapping(mapping)?;

    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(entries = mapping.len(), "Saved mapping to {}", path.display());
    Ok(())
}

/// Serialize a mapping to bytes.
///
/// Format:
/// - 4 bytes: Magic ("KDK\x01")
/// - 4 bytes: Schema version (u32 little-endian)
/// - N bytes: rkyv payload
fn serialize_mapping(mapping: &SourceTargetMapping) -> Result<Vec<u8>> {
    let rkyv_bytes = rkyv::to_bytes::<rkyv::rancor::Error>(mapping)
        .map_err(|source| PersistenceError::Serialization { source })?;

    let mut output = Vec::with_capacity(8 + rkyv_bytes.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&rkyv_bytes);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".kodiak").join("sourceTargetMapping");

        let mut mapping = SourceTargetMapping::new("hw.zip", "number-older");
        save_mapping(&mut mapping, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
    }
}
