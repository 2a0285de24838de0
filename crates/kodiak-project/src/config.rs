//! Project configuration.

use kodiak_model::DuplicateStrategy;
use serde::{Deserialize, Serialize};

/// Archive entries Kodiak adds that are not submissions.
pub const DEFAULT_EXCLUDED_ENTRIES: [&str; 1] = ["index.html"];

/// Settings for one init or archive run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// How repeated submissions of one file are handled on import.
    pub duplicates: DuplicateStrategy,

    /// Top-level archive entries that are never extracted.
    pub excluded_entries: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicateStrategy::default(),
            excluded_entries: DEFAULT_EXCLUDED_ENTRIES.map(String::from).to_vec(),
        }
    }
}

impl ProjectConfig {
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicateStrategy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_entries.iter().any(|excluded| excluded == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_excludes_index() {
        let config = ProjectConfig::default();
        assert!(config.is_excluded("index.html"));
        assert!(!config.is_excluded("index.htm"));
        assert_eq!(config.duplicates, DuplicateStrategy::NumberOlder);
    }
}
