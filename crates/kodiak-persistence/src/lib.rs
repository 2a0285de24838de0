//! Persistent state for Kodiak projects.
//!
//! `kodiak init` records, for every submission it places in the working
//! tree, which archive entry it came from. `kodiak archive` reads that
//! record back to put graded files under their original names. This crate
//! owns the on-disk form of that record.
//!
//! # File Format
//!
//! ```text
//! +------------------+
//! | Magic: "KDK\x01" | 4 bytes - file identification
//! +------------------+
//! | Version: 1       | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | rkyv Payload     | Variable - SourceTargetMapping
//! +------------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kodiak_persistence::{SourceTargetMapping, save_mapping, load_mapping};
//!
//! let mut mapping = SourceTargetMapping::new("Homework 4.zip", "number-older");
//! mapping.push(
//!     "11824-66708 - Lucy Pelt - Feb 9, 2017 1017 PM - LPelt_HW4.pdf",
//!     "Pelt_Lucy/LPelt_HW4.pdf",
//! );
//! save_mapping(&mut mapping, Path::new(".kodiak/sourceTargetMapping"))?;
//!
//! let loaded = load_mapping(Path::new(".kodiak/sourceTargetMapping"))?;
//! ```

mod error;
mod io;
mod types;

pub use error::{PersistenceError, Result};
pub use io::{compute_file_hash, load_mapping, save_mapping, verify_file_hash};
pub use types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, MappingEntry, SourceTargetMapping};
