//! Duplicate submission handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Order in which submissions are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOrder {
    OldestFirst,
    NewestFirst,
}

/// What happens when a submission maps to a target that is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAction {
    /// Write it under the lowest free ` (k)` suffix.
    Number,
    /// Leave it out of the working tree.
    Skip,
}

/// How repeated submissions of the same file by one student are handled.
///
/// The first submission processed keeps the original name. The strategy
/// picks which one that is and what happens to the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateStrategy {
    /// Newest keeps the name; older copies are numbered newest to oldest.
    #[default]
    NumberOlder,
    /// Oldest keeps the name; newer copies are numbered oldest to newest.
    NumberNewer,
    /// Only the oldest copy is imported.
    OldestOnly,
    /// Only the newest copy is imported.
    NewestOnly,
}

impl DuplicateStrategy {
    pub const ALL: [Self; 4] = [
        Self::NumberOlder,
        Self::NumberNewer,
        Self::OldestOnly,
        Self::NewestOnly,
    ];

    #[must_use]
    pub const fn order(&self) -> ProcessingOrder {
        match self {
            Self::NumberNewer | Self::OldestOnly => ProcessingOrder::OldestFirst,
            Self::NumberOlder | Self::NewestOnly => ProcessingOrder::NewestFirst,
        }
    }

    #[must_use]
    pub const fn on_collision(&self) -> CollisionAction {
        match self {
            Self::NumberOlder | Self::NumberNewer => CollisionAction::Number,
            Self::OldestOnly | Self::NewestOnly => CollisionAction::Skip,
        }
    }

    /// Command-line spelling of the strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NumberOlder => "number-older",
            Self::NumberNewer => "number-newer",
            Self::OldestOnly => "oldest-only",
            Self::NewestOnly => "newest-only",
        }
    }

    /// Get a description of this strategy.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NumberOlder => "newest keeps its name, older copies get (1), (2), ...",
            Self::NumberNewer => "oldest keeps its name, newer copies get (1), (2), ...",
            Self::OldestOnly => "keep only the oldest copy",
            Self::NewestOnly => "keep only the newest copy",
        }
    }
}

impl fmt::Display for DuplicateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStrategy(s.to_string()))
    }
}
