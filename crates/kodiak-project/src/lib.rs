//! Kodiak project management.
//!
//! A project is a directory holding one assignment's submissions through a
//! grading cycle:
//!
//! ```text
//! <root>/
//!   .kodiak/                 private state, marks the project
//!   originalArchive/         the archive as downloaded from Kodiak
//!   originalSubmissions/     the archive, extracted
//!   submissions/<Last>_<First>/...   working tree for graders
//!   gradedSubmissions/       staging tree for the upload archive
//!   gradedArchive/           the archive to upload back to Kodiak
//! ```
//!
//! [`Project::init`] builds the working tree from a Kodiak download and
//! [`Project::archive`] turns the (graded) working tree back into an
//! archive Kodiak accepts.
//!
//! # Example
//!
//! ```ignore
//! use kodiak_project::{Project, ProjectConfig};
//! use kodiak_model::DuplicateStrategy;
//!
//! let config = ProjectConfig::default().with_duplicates(DuplicateStrategy::NewestOnly);
//! Project::new("hw4", config).init(Path::new("Homework 4.zip"))?;
//!
//! // ... grade files under hw4/submissions ...
//!
//! let report = Project::open(Path::new("hw4/submissions"), ProjectConfig::default())?.archive()?;
//! println!("{}", report.output.display());
//! ```

mod config;
mod error;
mod fs_util;
mod import;
mod layout;
mod project;
mod submission;

pub use config::{DEFAULT_EXCLUDED_ENTRIES, ProjectConfig};
pub use error::{ProjectError, Result};
pub use import::{ImportOutcome, ImportedFile, Importer, StudentImport, unique_target};
pub use layout::{MAPPING_FILE, ProjectLayout, STATE_DIR};
pub use project::{ArchiveReport, InitReport, Project};
pub use submission::SubmissionFile;
