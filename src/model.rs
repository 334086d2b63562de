//! Record types for the workout log.
//!
//! A [`WorkoutSet`] is one logged unit of exercise performance: a weight
//! lifted for a number of reps, repeated for a number of sets, on a given
//! day, under a user-chosen workout title (e.g. "Leg Day"). Records are
//! immutable once created; the log only ever grows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive rep range the entry form offers.
pub const REPS_RANGE: (u32, u32) = (1, 100);

/// Inclusive set-count range the entry form offers.
pub const SETS_RANGE: (u32, u32) = (1, 10);

/// A workout date at day granularity.
///
/// Dates carry no timezone and no time component. `Unknown` is the sentinel
/// substituted when a stored date value fails to parse: the row is kept, but
/// it never matches a date filter and sorts after every known date when
/// ordering newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SetDate {
    /// A known calendar day.
    Day(NaiveDate),
    /// Date value that could not be parsed from storage.
    Unknown,
}

impl SetDate {
    /// Returns the calendar day, or `None` for the unknown sentinel.
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(d) => Some(*d),
            Self::Unknown => None,
        }
    }

    /// Sort key for newest-first ordering: known dates by recency,
    /// unknown dates after all of them.
    pub(crate) fn desc_key(&self) -> (u8, i64) {
        match self {
            // Negate the day number so an ascending stable sort yields
            // descending dates.
            Self::Day(d) => (0, -i64::from(d.num_days_from_ce())),
            Self::Unknown => (1, 0),
        }
    }
}

impl From<NaiveDate> for SetDate {
    fn from(d: NaiveDate) -> Self {
        Self::Day(d)
    }
}

/// One logged set: the unit record of the workout log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Day the set was performed.
    pub date: SetDate,
    /// User-chosen workout title grouping a session (e.g. "Leg Day").
    pub title: String,
    /// Exercise name (e.g. "Squat"). Compared by exact text match.
    pub exercise: String,
    /// Weight in kilograms. Non-negative by contract; defaults to 0
    /// for bodyweight work.
    pub weight: f64,
    /// Repetitions per set.
    pub reps: u32,
    /// Number of sets performed at this weight and rep count.
    pub sets: u32,
}

impl WorkoutSet {
    /// Creates a record for a known calendar day.
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        exercise: impl Into<String>,
        weight: f64,
        reps: u32,
        sets: u32,
    ) -> Self {
        Self {
            date: SetDate::Day(date),
            title: title.into(),
            exercise: exercise.into(),
            weight,
            reps,
            sets,
        }
    }
}
