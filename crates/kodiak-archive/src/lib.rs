//! Archive support for Kodiak submission bundles.
//!
//! Kodiak hands out all submissions of an assignment as one archive, and
//! students frequently submit archives themselves. This crate is the one
//! place that knows about container formats:
//!
//! - [`ArchiveFormat`] detects a format from a file name
//! - [`extract_archive`] unpacks an archive into a directory
//! - [`create_archive`] packs a directory back into an archive
//!
//! Supported formats are ZIP, tar and gzip-compressed tar.

mod create;
mod error;
mod extract;
mod format;

pub use create::create_archive;
pub use error::{ArchiveError, Result};
pub use extract::{extract_archive, extract_archive_as};
pub use format::{ArchiveFormat, extension_formats, supported_extensions};
