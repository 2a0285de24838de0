//! Mapping loading operations.

use std::fs;
use std::path::Path;

use rkyv::util::AlignedVec;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, SourceTargetMapping};

/// Load a mapping from `path`.
pub fn load_mapping(path: &Path) -> Result<SourceTargetMapping> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_mapping_bytes(&bytes, path)
}

/// Parse mapping bytes and validate the format.
fn parse_mapping_bytes(bytes: &[u8], path: &Path) -> Result<SourceTargetMapping> {
    // Minimum size: magic (4) + version (4) + some payload
    if bytes.len() < 12 {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "File too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not a kodiak mapping file (invalid magic bytes)".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    // rkyv validates alignment, so copy the payload into an aligned buffer
    let mut payload = AlignedVec::<16>::with_capacity(bytes.len() - 8);
    payload.extend_from_slice(&bytes[8..]);

    let mapping = rkyv::from_bytes::<SourceTargetMapping, rkyv::rancor::Error>(&payload)
        .map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(entries = mapping.len(), "Loaded mapping from {}", path.display());
    Ok(mapping)
}
