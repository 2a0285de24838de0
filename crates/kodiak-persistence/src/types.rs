//! Persisted mapping types.

use chrono::Utc;
use rkyv::{Archive, Deserialize, Serialize};

/// Current schema version.
///
/// Increment this when making breaking changes to the persistence format.
/// The loader rejects files with version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic bytes at the start of mapping files.
pub const MAGIC_BYTES: [u8; 4] = [b'K', b'D', b'K', 0x01];

/// One imported submission.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct MappingEntry {
    /// Archive entry name, exactly as Kodiak named it.
    pub source: String,
    /// Path below the submissions directory, `/`-separated.
    pub target: String,
}

/// Ordered record of every submission written to the working tree.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct SourceTargetMapping {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the project was initialised (RFC 3339).
    pub created_at: String,

    /// When the mapping was last written (RFC 3339).
    pub last_saved_at: String,

    /// File name of the imported Kodiak archive.
    pub original_archive: String,

    /// SHA-256 of the archive copy kept in the project, hex encoded.
    pub archive_sha256: String,

    /// Duplicates strategy the import ran with.
    pub duplicates: String,

    /// Entries in the order their targets were written.
    pub entries: Vec<MappingEntry>,
}

impl SourceTargetMapping {
    pub fn new(original_archive: impl Into<String>, duplicates: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: now.clone(),
            last_saved_at: now,
            original_archive: original_archive.into(),
            archive_sha256: String::new(),
            duplicates: duplicates.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.entries.push(MappingEntry {
            source: source.into(),
            target: target.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    /// Update the last saved timestamp.
    pub fn touch(&mut self) {
        self.last_saved_at = Utc::now().to_rfc3339();
    }
}
