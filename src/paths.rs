//! Home-based storage location for the workout log.
//!
//! The default durable store lives at `~/.workout-log/workout_data.csv`.
//! The application shell resolves this once at session start and hands the
//! path to [`CsvLogStore::new`](crate::CsvLogStore::new); tests point the
//! store at a temp directory instead.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// The name of the workout log directory.
const WORKOUT_LOG_DIR: &str = ".workout-log";

/// File name of the durable CSV store.
const LOG_FILE_NAME: &str = "workout_data.csv";

/// Returns the home-based data directory: `~/.workout-log/`
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - Home directory cannot be determined
/// - Directory creation fails
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory for workout log")?;
    let dir = home.join(WORKOUT_LOG_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the default log file path: `~/.workout-log/workout_data.csv`
pub fn default_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}
