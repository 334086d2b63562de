//! The workout log and its CSV-backed store.
//!
//! [`WorkoutLog`] owns the in-memory record sequence and answers the read
//! queries the presentation layer renders from. [`CsvLogStore`] binds a log
//! to a durable CSV file: it loads the log at session start, and persists
//! the full record set after every append.
//!
//! The log is owned by the surrounding application shell and passed into
//! store operations explicitly; there is no global state.

use crate::csv_format;
use crate::error::StoreError;
use crate::model::{SetDate, WorkoutSet};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The in-memory workout log: an ordered, append-only record sequence.
///
/// Insertion order is preserved internally; queries that need a different
/// order sort on demand. Duplicate records (identical field values) are
/// permitted and meaningful: the same set logged twice is two sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutLog {
    records: Vec<WorkoutSet>,
}

impl WorkoutLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log from already-loaded records, preserving their order.
    pub fn from_records(records: Vec<WorkoutSet>) -> Self {
        Self { records }
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[WorkoutSet] {
        &self.records
    }

    /// Number of logged sets.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, entry: WorkoutSet) {
        self.records.push(entry);
    }

    /// All records performed on the given day, insertion order preserved.
    ///
    /// Records with an unknown date never match.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&WorkoutSet> {
        self.records
            .iter()
            .filter(|set| set.date == SetDate::Day(date))
            .collect()
    }

    /// Every record, newest first. Ties on the same day keep insertion
    /// order (stable sort); unknown dates come last.
    pub fn all_sorted_by_date_desc(&self) -> Vec<&WorkoutSet> {
        let mut sorted: Vec<&WorkoutSet> = self.records.iter().collect();
        sorted.sort_by_key(|set| set.date.desc_key());
        sorted
    }

    /// Maximum weight ever recorded per distinct exercise.
    ///
    /// Exercises are compared by exact text match (case-sensitive, no
    /// trimming).
    pub fn personal_bests(&self) -> HashMap<String, f64> {
        let mut bests: HashMap<String, f64> = HashMap::new();
        for set in &self.records {
            bests
                .entry(set.exercise.clone())
                .and_modify(|best| *best = best.max(set.weight))
                .or_insert(set.weight);
        }
        bests
    }

    /// Chronological data points for the progress-over-time chart:
    /// one `(date, exercise, weight, reps)` point per record with a known
    /// date, oldest first, ties keeping insertion order.
    pub fn progress_points(&self) -> Vec<ProgressPoint> {
        let mut points: Vec<ProgressPoint> = self
            .records
            .iter()
            .filter_map(|set| {
                set.date.day().map(|date| ProgressPoint {
                    date,
                    exercise: set.exercise.clone(),
                    weight: set.weight,
                    reps: set.reps,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }
}

/// One point on the progress chart: a known-date record projected to the
/// fields the chart plots.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
}

/// Partitions records by workout title.
///
/// Per-group insertion order is preserved; groups appear in order of first
/// appearance of each title in the input.
pub fn group_by_title<'a>(records: &[&'a WorkoutSet]) -> Vec<(String, Vec<&'a WorkoutSet>)> {
    let mut groups: Vec<(String, Vec<&WorkoutSet>)> = Vec::new();
    for &set in records {
        match groups.iter_mut().find(|(title, _)| *title == set.title) {
            Some((_, members)) => members.push(set),
            None => groups.push((set.title.clone(), vec![set])),
        }
    }
    groups
}

/// CSV-file-backed store for a [`WorkoutLog`].
///
/// The store holds only the file path; the log itself is owned by the
/// caller. No file locking is performed: a single active session is
/// assumed, and concurrent sessions race with last-persist-wins.
#[derive(Debug, Clone)]
pub struct CsvLogStore {
    path: PathBuf,
}

impl CsvLogStore {
    /// Creates a store over the given CSV file path. The file does not
    /// need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The durable-storage location this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the log from the store's file.
    ///
    /// A missing file is not an error: it yields an empty log. Rows with
    /// unparsable dates are kept with an unknown date; any other malformed
    /// content fails the load with [`StoreError::Read`].
    pub fn load(&self) -> Result<WorkoutLog, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no workout log yet, starting empty");
                return Ok(WorkoutLog::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };

        let records = csv_format::parse_log(&content).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            message: format!("{:#}", e),
        })?;

        debug!(path = %self.path.display(), count = records.len(), "loaded workout log");
        Ok(WorkoutLog::from_records(records))
    }

    /// Appends one entry to the log and persists the full record set.
    ///
    /// An empty title or exercise is rejected with
    /// [`StoreError::Validation`] and the log is unchanged. A persist
    /// failure surfaces as [`StoreError::Write`], but the in-memory append
    /// is kept: durability is best-effort, the session keeps the record.
    pub fn append(&self, log: &mut WorkoutLog, entry: WorkoutSet) -> Result<(), StoreError> {
        if entry.title.is_empty() {
            return Err(StoreError::Validation {
                message: "workout title must not be empty".to_string(),
            });
        }
        if entry.exercise.is_empty() {
            return Err(StoreError::Validation {
                message: "exercise name must not be empty".to_string(),
            });
        }

        log.push(entry);
        self.persist(log)
    }

    /// Serializes the full record set to the store's file, overwriting any
    /// prior content.
    pub fn persist(&self, log: &WorkoutLog) -> Result<(), StoreError> {
        let content = csv_format::serialize_log(log.records());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    message: e.to_string(),
                })?;
            }
        }

        fs::write(&self.path, content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), count = log.len(), "persisted workout log");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
