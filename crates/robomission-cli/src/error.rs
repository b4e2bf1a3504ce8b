//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Mission file could not be read
    #[error("Failed to read mission {}: {source}", path.display())]
    ReadMission {
        /// Mission file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Mission file is structurally invalid
    #[error("Invalid mission {}: {source}", path.display())]
    InvalidProgram {
        /// Mission file
        path: PathBuf,
        /// Validation failure
        #[source]
        source: robomission::ProgramError,
    },

    /// Settings error
    #[error(transparent)]
    Settings(#[from] robomission::SettingsError),

    /// Library error
    #[error(transparent)]
    Mission(#[from] robomission::MissionError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// One or more files failed validation
    #[error("Validation failed: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// Mission execution could not be started or joined
    #[error("Mission execution failed: {message}")]
    Execution {
        /// Error message
        message: String,
    },

    /// Output serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an execution error
    #[must_use]
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }
}
