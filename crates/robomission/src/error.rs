//! Result and error types for robomission.
//!
//! Only load-time and I/O problems are errors. Everything that can go wrong
//! while a mission is running resolves into a [`LostReason`](crate::LostReason)
//! inside the [`MissionReport`](crate::MissionReport).

use crate::program::StateId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for robomission operations
pub type MissionResult<T> = Result<T, MissionError>;

/// Structural defects in a mission program (`InvalidProgram`).
///
/// A program that fails validation never starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    #[error("Failed to parse mission YAML: {0}")]
    ParseError(String),

    #[error("Invalid version '{0}', expected '1.0'")]
    InvalidVersion(String),

    #[error("Mission '{0}' declares no states")]
    EmptyStates(String),

    #[error("Start state {0} does not exist")]
    UndefinedStart(StateId),

    #[error("State {0} is declared more than once")]
    DuplicateState(StateId),

    #[error("State {from} transition {index} targets undefined state {target}")]
    UndefinedTarget {
        from: StateId,
        index: usize,
        target: StateId,
    },

    #[error("State {from} timeout targets undefined state {target}")]
    UndefinedTimeoutTarget { from: StateId, target: StateId },

    #[error("State {state} transition {index} has a non-finite threshold")]
    InvalidThreshold { state: StateId, index: usize },

    #[error("State {state} has an invalid timeout of {secs} s")]
    InvalidTimeout { state: StateId, secs: f64 },
}

/// Failure to write to the mission log file (`LogSinkFailure`).
///
/// Never fatal to the mission; callers surface it as a warning.
#[derive(Debug, Error)]
#[error("Mission log write failed: {0}")]
pub struct LogSinkFailure(#[from] pub std::io::Error);

/// Errors raised while loading or saving mission settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(String),

    #[error("Tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

/// Top-level library error
#[derive(Debug, Error)]
pub enum MissionError {
    /// Mission program failed to load
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Settings failed to load or save
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
