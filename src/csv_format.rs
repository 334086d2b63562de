//! Parse/serialize boundary for the durable CSV log.
//!
//! The on-disk format is a flat CSV table, one row per logged set, with a
//! required header and a fixed column order:
//!
//! ```text
//! Date,Title,Exercise,Weight (kg),Reps,Sets
//! 2024-06-01,Leg Day,Squat,80,8,3
//! ```
//!
//! Title and exercise are free-form text, so fields containing a comma,
//! quote or line break are quoted with doubled inner quotes (RFC 4180) on
//! write and accepted quoted on read.
//!
//! Malformed-row policy lives entirely here:
//! - an unparsable date becomes [`SetDate::Unknown`] (row kept, warning
//!   logged); an empty date field is the explicit serialization of
//!   `Unknown` and round-trips silently;
//! - any other malformed content (bad header, wrong column count,
//!   non-numeric weight/reps/sets) fails the whole parse.

use crate::model::{SetDate, WorkoutSet};
use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use tracing::warn;

/// Fixed column schema of the durable store.
pub const COLUMNS: [&str; 6] = ["Date", "Title", "Exercise", "Weight (kg)", "Reps", "Sets"];

/// Date serialization format (`YYYY-MM-DD`).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the full content of a log file into records.
///
/// The first record must be the fixed header. Rows with unparsable dates
/// are retained with [`SetDate::Unknown`]; every other malformed row is an
/// error carrying its row number.
pub fn parse_log(content: &str) -> Result<Vec<WorkoutSet>> {
    let mut rows = split_records(content)?.into_iter();

    let header = rows.next().ok_or_else(|| anyhow!("missing header row"))?;
    if header.fields != COLUMNS {
        bail!(
            "unexpected header: expected {:?}, found {:?}",
            COLUMNS.join(","),
            header.fields.join(",")
        );
    }

    let mut records = Vec::new();
    for row in rows {
        records.push(
            parse_row(&row.fields)
                .with_context(|| format!("malformed row at line {}", row.line))?,
        );
    }
    Ok(records)
}

/// Serializes the full record set, header first, dates as `YYYY-MM-DD`.
///
/// An `Unknown` date serializes as an empty field so a coerced row survives
/// later persist/load cycles.
pub fn serialize_log(records: &[WorkoutSet]) -> String {
    let mut out = String::new();
    out.push_str(&COLUMNS.join(","));
    out.push('\n');

    for set in records {
        let date = match set.date {
            SetDate::Day(d) => d.format(DATE_FORMAT).to_string(),
            SetDate::Unknown => String::new(),
        };
        let row = [
            quote_field(&date),
            quote_field(&set.title),
            quote_field(&set.exercise),
            format_weight(set.weight),
            set.reps.to_string(),
            set.sets.to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn parse_row(fields: &[String]) -> Result<WorkoutSet> {
    let [date, title, exercise, weight, reps, sets] = fields else {
        bail!("expected {} columns, found {}", COLUMNS.len(), fields.len());
    };

    Ok(WorkoutSet {
        date: coerce_date(date),
        title: title.clone(),
        exercise: exercise.clone(),
        weight: weight
            .parse()
            .with_context(|| format!("invalid weight: {:?}", weight))?,
        reps: reps
            .parse()
            .with_context(|| format!("invalid reps: {:?}", reps))?,
        sets: sets
            .parse()
            .with_context(|| format!("invalid sets: {:?}", sets))?,
    })
}

/// Coerces a stored date value, falling back to the unknown sentinel.
///
/// This is the one lossy-but-silent recovery in the load path: a bad date
/// never blocks loading the rest of the log.
fn coerce_date(value: &str) -> SetDate {
    if value.is_empty() {
        return SetDate::Unknown;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(day) => SetDate::Day(day),
        Err(_) => {
            warn!(value, "unparsable date in workout log, keeping row with unknown date");
            SetDate::Unknown
        }
    }
}

/// Formats a weight without a trailing `.0` when integral.
fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        (weight as i64).to_string()
    } else {
        weight.to_string()
    }
}

fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if c == '"' {
                quoted.push('"');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    } else {
        value.to_string()
    }
}

/// One raw record with the line number it started on (for error messages).
struct RawRecord {
    line: usize,
    fields: Vec<String>,
}

/// Splits CSV content into records, honoring quoted fields (which may
/// contain commas, doubled quotes and line breaks). Trailing blank lines
/// are ignored.
fn split_records(content: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started_quoted = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut record_empty = true;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_started_quoted => {
                in_quotes = true;
                field_started_quoted = true;
                record_empty = false;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                field_started_quoted = false;
                record_empty = false;
            }
            '\r' => {
                // Bare CR outside quotes is treated as part of CRLF; a
                // stray one before anything else is ignored.
                if chars.peek() != Some(&'\n') {
                    field.push(c);
                    record_empty = false;
                }
            }
            '\n' => {
                line += 1;
                if !record_empty || !field.is_empty() || !fields.is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push(RawRecord {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                field_started_quoted = false;
                record_empty = true;
                record_line = line;
            }
            _ => {
                field.push(c);
                record_empty = false;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quoted field starting near line {}", record_line);
    }
    if !record_empty || !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(RawRecord {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn squat() -> WorkoutSet {
        WorkoutSet::new(date(2024, 6, 1), "Leg Day", "Squat", 80.0, 8, 3)
    }

    #[test]
    fn serializes_header_and_rows() {
        let out = serialize_log(&[squat()]);
        assert_eq!(
            out,
            "Date,Title,Exercise,Weight (kg),Reps,Sets\n2024-06-01,Leg Day,Squat,80,8,3\n"
        );
    }

    #[test]
    fn parse_roundtrip_preserves_records() {
        let records = vec![
            squat(),
            WorkoutSet::new(date(2024, 6, 2), "Push Day", "Bench Press", 62.5, 5, 5),
        ];
        let parsed = parse_log(&serialize_log(&records)).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn quoting_roundtrips_free_form_text() {
        let records = vec![WorkoutSet::new(
            date(2024, 6, 1),
            "Legs, heavy \"max\" day",
            "Front\nSquat",
            100.0,
            3,
            5,
        )];
        let out = serialize_log(&records);
        assert!(out.contains("\"Legs, heavy \"\"max\"\" day\""));
        assert_eq!(parse_log(&out).unwrap(), records);
    }

    #[test]
    fn fractional_weight_keeps_decimals() {
        let out = serialize_log(&[WorkoutSet::new(
            date(2024, 6, 1),
            "Push Day",
            "Bench Press",
            62.5,
            5,
            5,
        )]);
        assert!(out.contains(",62.5,"));
    }

    #[test]
    fn unparsable_date_becomes_unknown() {
        let content = "Date,Title,Exercise,Weight (kg),Reps,Sets\nnot-a-date,Leg Day,Squat,80,8,3\n";
        let parsed = parse_log(content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].date, SetDate::Unknown);
        assert_eq!(parsed[0].title, "Leg Day");
    }

    #[test]
    fn empty_date_roundtrips_unknown() {
        let mut set = squat();
        set.date = SetDate::Unknown;
        let out = serialize_log(std::slice::from_ref(&set));
        assert_eq!(parse_log(&out).unwrap(), vec![set]);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(parse_log("").is_err());
    }

    #[test]
    fn wrong_header_is_an_error() {
        let err = parse_log("Date,Name,Weight\n").unwrap_err();
        assert!(err.to_string().contains("unexpected header"));
    }

    #[test]
    fn wrong_column_count_is_an_error() {
        let content = "Date,Title,Exercise,Weight (kg),Reps,Sets\n2024-06-01,Leg Day,Squat,80,8\n";
        let err = parse_log(content).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn non_numeric_weight_is_an_error() {
        let content =
            "Date,Title,Exercise,Weight (kg),Reps,Sets\n2024-06-01,Leg Day,Squat,heavy,8,3\n";
        assert!(parse_log(content).is_err());
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let content = "Date,Title,Exercise,Weight (kg),Reps,Sets\n2024-06-01,Leg Day,Squat,80,8,3\n\n\n";
        assert_eq!(parse_log(content).unwrap().len(), 1);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content =
            "Date,Title,Exercise,Weight (kg),Reps,Sets\r\n2024-06-01,Leg Day,Squat,80,8,3\r\n";
        assert_eq!(parse_log(content).unwrap(), vec![squat()]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let content = "Date,Title,Exercise,Weight (kg),Reps,Sets\n2024-06-01,\"Leg Day,Squat,80,8,3\n";
        assert!(parse_log(content).is_err());
    }
}
