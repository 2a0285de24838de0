//! Data model for Kodiak submission archives.
//!
//! This crate holds the pure, I/O-free pieces of the tool:
//!
//! - [`SubmissionFilename`]: the structured form of the mangled file names
//!   Kodiak gives every entry of a downloaded submissions archive
//! - [`DuplicateStrategy`]: how repeated submissions of the same file by the
//!   same student are ordered and named during import
//!
//! # Example
//!
//! ```
//! use kodiak_model::SubmissionFilename;
//!
//! let name = SubmissionFilename::parse(
//!     "11824-66708 - Lucy Pelt - Feb 9, 2017 1017 PM - LPelt_HW4.pdf",
//! )?;
//! assert_eq!(name.student_key(), "Pelt_Lucy");
//! assert_eq!(name.original_filename(), "LPelt_HW4.pdf");
//! # Ok::<(), kodiak_model::ModelError>(())
//! ```

mod error;
mod filename;
mod strategy;

pub use error::{ModelError, Result};
pub use filename::{FIELD_SEPARATOR, SubmissionFilename};
pub use strategy::{CollisionAction, DuplicateStrategy, ProcessingOrder};
