//! Errors raised while reading or writing the mapping file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a mapping file.
    #[error("{path} is not a Kodiak mapping file: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Written by a newer release with a schema this one cannot read.
    #[error("{path} uses mapping schema {found}, newest readable is {max_supported}")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    #[error("failed to encode mapping")]
    Serialization {
        #[source]
        source: rkyv::rancor::Error,
    },

    #[error("mapping payload in {path} is corrupt")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: rkyv::rancor::Error,
    },

    /// The temp file was written but could not replace the mapping.
    #[error("failed to move {temp_path} over {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// A remediation hint for the person running the tool.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io {
                operation: "read", ..
            } => Some("Check that the project was created with `kodiak init`.".into()),
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("Check free disk space and write permission on the project.".into())
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => Some(
                "The project state is damaged; delete the project and run `kodiak init` again."
                    .into(),
            ),
            Self::UnsupportedVersion { .. } => Some("Upgrade kodiak to open this project.".into()),
            Self::Serialization { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_error_names_file() {
        let err = PersistenceError::UnsupportedVersion {
            found: 9,
            max_supported: 1,
            path: PathBuf::from(".kodiak/sourceTargetMapping"),
        };
        assert_eq!(
            err.to_string(),
            ".kodiak/sourceTargetMapping uses mapping schema 9, newest readable is 1"
        );
        assert!(err.suggestion().unwrap().contains("Upgrade"));
    }

    #[test]
    fn test_missing_mapping_suggests_init() {
        let err = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from(".kodiak/sourceTargetMapping"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.suggestion().unwrap().contains("kodiak init"));
    }
}
