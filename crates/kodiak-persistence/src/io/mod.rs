//! File I/O operations for mapping persistence.
//!
//! This module handles:
//! - Saving the mapping with atomic writes
//! - Loading the mapping with format validation
//! - Archive hashing for change detection

mod hash;
mod load;
mod save;

pub use hash::{compute_file_hash, verify_file_hash};
pub use load::load_mapping;
pub use save::save_mapping;
