//! Error types for the workout log store.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors that can occur while appending to or persisting the workout log.
#[derive(Debug)]
pub enum StoreError {
    /// Append attempted with an empty title or exercise name.
    /// The log is unchanged.
    Validation { message: String },
    /// The log file exists but could not be read or parsed as the
    /// expected tabular schema. Fatal for that load.
    Read { path: PathBuf, message: String },
    /// The log file could not be written. The in-memory append is kept.
    Write { path: PathBuf, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "invalid entry: {}", message),
            Self::Read { path, message } => {
                write!(f, "failed to read log {}: {}", path.display(), message)
            }
            Self::Write { path, message } => {
                write!(f, "failed to write log {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// True for errors the entry form recovers from by warning the user.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
