use thiserror::Error;

/// Errors produced while decoding Kodiak data.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A submission file name does not follow the Kodiak naming scheme.
    #[error("malformed submission name '{name}': {reason}")]
    MalformedSubmissionName { name: String, reason: String },

    /// A duplicates strategy name is not recognised.
    #[error("unknown duplicates strategy '{0}'")]
    UnknownStrategy(String),
}

impl ModelError {
    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        Self::MalformedSubmissionName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
