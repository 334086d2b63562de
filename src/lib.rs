//! Personal fitness log: a CSV-backed store for workout sets.
//!
//! The crate owns the canonical record sequence of a workout history —
//! one [`WorkoutSet`] per logged set (date, workout title, exercise,
//! weight, reps, sets) — and answers the queries a presentation layer
//! renders from:
//!
//! - [`WorkoutLog::records_on`] — today's entries, grouped via
//!   [`group_by_title`];
//! - [`WorkoutLog::all_sorted_by_date_desc`] — full history, newest first;
//! - [`WorkoutLog::personal_bests`] — max weight per exercise;
//! - [`WorkoutLog::progress_points`] — chart data over time.
//!
//! [`CsvLogStore`] binds the log to a durable CSV file: loaded once at
//! session start (a missing file yields an empty log), persisted in full
//! after every append. Records are immutable once logged; the log only
//! grows.
//!
//! # Single active session
//!
//! The store performs no file locking. It assumes one active session at a
//! time: two sessions writing the same file race, and the last persist
//! wins with no merge or conflict detection. This is a documented
//! limitation of the format, not something the store tries to fix.

mod csv_format;
mod error;
mod model;
mod paths;
mod store;

pub use csv_format::{parse_log, serialize_log, COLUMNS};
pub use error::StoreError;
pub use model::{SetDate, WorkoutSet, REPS_RANGE, SETS_RANGE};
pub use paths::{data_dir, default_log_path};
pub use store::{group_by_title, CsvLogStore, ProgressPoint, WorkoutLog};
