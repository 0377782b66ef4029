//! Error handling for the step tracker.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for the step tracker
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// No individual is stored under the id
    #[error("Individual with ID {0} not found")]
    IndividualNotFound(u32),

    /// No group is stored under the id
    #[error("Group with ID {0} not found")]
    GroupNotFound(String),

    /// An individual with the id already exists
    #[error("Individual with ID {0} already exists")]
    IndividualExists(u32),

    /// A group with the id already exists
    #[error("Group with ID {0} already exists")]
    DuplicateGroupId(String),

    /// Group creation or merge would exceed the member cap
    #[error("A group cannot have more than {max} members ({requested} requested)")]
    TooManyMembers {
        /// Number of members the operation asked for
        requested: usize,
        /// The member cap
        max: usize,
    },

    /// Every candidate member was filtered out
    #[error("No valid members to create group {0}")]
    NoValidMembers(String),

    /// A group cannot be merged into itself
    #[error("Group {0} cannot be merged with itself")]
    SelfMerge(String),

    /// Not enough step history to suggest a new goal
    #[error("Individual {id} has {days} days of step data, {required} are needed")]
    InsufficientData {
        /// Individual the suggestion was requested for
        id: u32,
        /// Days of history available
        days: usize,
        /// Days of history required
        required: usize,
    },

    /// A name or id holds a character the CSV files use as a separator
    #[error("{field} {value:?} cannot contain ',', ';' or a line break")]
    UnstorableText {
        /// Which field was rejected
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// A compound operation failed after it had already mutated the registry
    #[error("Registry left in an inconsistent state: {0}")]
    InconsistentState(String),

    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error opening or writing a specific file
    #[error("{context}: {}", .path.display())]
    File {
        /// The file involved
        path: PathBuf,
        /// What was being attempted
        context: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A stored record could not be parsed
    #[error("Parse error in {path} line {line}: {reason}")]
    Parse {
        /// File the record came from
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// Error serializing or deserializing a snapshot
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Whether the error reports a missing individual or group
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::IndividualNotFound(_) | Self::GroupNotFound(_))
    }

    /// Whether the error reports a duplicate id
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::IndividualExists(_) | Self::DuplicateGroupId(_))
    }
}

impl TrackerError {
    /// Create a file error with context
    pub fn file(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::File {
            path: path.into(),
            context: context.into(),
            source,
        }
    }
}

/// Result type for step tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
