//! Error taxonomy for rotation runs.
//!
//! Every fallible operation in the crate returns [`RotationResult`].
//! Validation and roster I/O failures are raised before any schedule
//! backup or write happens, so a failed run leaves the schedule untouched.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result alias used throughout the crate.
pub type RotationResult<T> = Result<T, RotationError>;

/// Errors raised by a rotation run.
#[derive(Error, Debug)]
pub enum RotationError {
    /// The roster failed header, email, or availability checks.
    #[error("roster validation failed: {0}")]
    Validation(ValidationErrors),

    /// A roster or schedule file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A table file is not valid JSON of the expected shape.
    #[error("malformed table in {}: {source}", .path.display())]
    Serialization {
        /// File that failed to parse or serialize.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// No agent is marked available, so the rotation queue is empty.
    #[error("no available agents to build a rotation")]
    NoAvailableAgents,

    /// Copying, listing, or deleting a backup failed.
    #[error("backup failed on {}: {source}", .path.display())]
    Backup {
        /// Artifact or backup file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or holds invalid values.
    #[error("config error: {0}")]
    Config(String),
}

impl RotationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn backup(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }
}

impl From<ValidationErrors> for RotationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
