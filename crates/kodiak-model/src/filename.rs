//! Kodiak submission file names.
//!
//! Every entry of a Kodiak submissions download is renamed to
//!
//! ```text
//! <submission id> - <First> <Last> - <Mon D, YYYY HMM AM|PM> - <original file name>
//! ```
//!
//! where `HMM` runs the hour (one or two digits) and the two-digit minute
//! together, e.g. `614 PM` or `1017 PM`.

use std::str::FromStr;
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime, TimeDelta, TimeZone};

use crate::error::{ModelError, Result};

/// Separator between the fields of a submission file name.
pub const FIELD_SEPARATOR: &str = " - ";

/// chrono pattern for the time field once hour and minute are split apart.
const TIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Structured form of a Kodiak submission file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionFilename {
    submission_id: String,
    first_name: String,
    last_name: String,
    submission_time: NaiveDateTime,
    original_filename: String,
}

impl SubmissionFilename {
    /// Parse a raw archive entry name.
    ///
    /// The name is cut at most three times, so the original file name may
    /// itself contain the field separator.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedSubmissionName`] when fewer than four
    /// fields are present, the student field is not exactly two
    /// space-separated tokens, or the time field cannot be read.
    pub fn parse(raw: &str) -> Result<Self> {
        let fields: Vec<&str> = raw.splitn(4, FIELD_SEPARATOR).collect();
        let [submission_id, student, time, original_filename] = fields[..] else {
            return Err(ModelError::malformed(
                raw,
                format!(
                    "expected 4 fields separated by '{FIELD_SEPARATOR}', found {}",
                    fields.len()
                ),
            ));
        };

        let tokens: Vec<&str> = student.split(' ').collect();
        let [first_name, last_name] = tokens[..] else {
            return Err(ModelError::malformed(
                raw,
                format!("student name '{student}' is not exactly a first and a last name"),
            ));
        };
        if first_name.is_empty() || last_name.is_empty() {
            return Err(ModelError::malformed(raw, "student name has an empty part"));
        }
        if original_filename.is_empty() {
            return Err(ModelError::malformed(raw, "original file name is empty"));
        }

        Ok(Self {
            submission_id: submission_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            submission_time: parse_submission_time(raw, time)?,
            original_filename: original_filename.to_string(),
        })
    }

    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Upload time as printed by Kodiak (no time zone).
    pub fn submission_time(&self) -> NaiveDateTime {
        self.submission_time
    }

    /// Name of the file as the student uploaded it.
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Directory-safe student identifier, `<Last>_<First>`.
    ///
    /// Two submission ids with the same student name share a key.
    pub fn student_key(&self) -> String {
        format!("{}_{}", self.last_name, self.first_name)
    }

    /// Submission time interpreted in the local time zone.
    ///
    /// Ambiguous times resolve to the earlier instant. A time skipped by a
    /// daylight-saving jump is read with the offset in force before the jump,
    /// which lands the same distance past the end of the gap.
    pub fn submission_system_time(&self) -> SystemTime {
        let time = self.submission_time;
        Local
            .from_local_datetime(&time)
            .earliest()
            .or_else(|| Local.from_local_datetime(&(time + TimeDelta::hours(1))).earliest())
            .map_or_else(|| time.and_utc().into(), SystemTime::from)
    }
}

impl FromStr for SubmissionFilename {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Read Kodiak's `Mon D, YYYY HMM AM|PM` time field.
///
/// The hour has one or two digits, so the hour/minute split is taken from
/// the end of the digit run.
fn parse_submission_time(name: &str, raw: &str) -> Result<NaiveDateTime> {
    let invalid = |detail: &str| {
        ModelError::malformed(name, format!("invalid submission time '{raw}': {detail}"))
    };

    let (rest, meridiem) = raw.rsplit_once(' ').ok_or_else(|| invalid("missing AM/PM"))?;
    let (date, clock) = rest.rsplit_once(' ').ok_or_else(|| invalid("missing hour and minute"))?;
    if !(3..=4).contains(&clock.len()) || !clock.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("hour and minute must be 3 or 4 digits"));
    }
    let (hour, minute) = clock.split_at(clock.len() - 2);

    let normalized = format!("{date} {hour}:{minute} {meridiem}");
    NaiveDateTime::parse_from_str(&normalized, TIME_FORMAT).map_err(|e| invalid(&e.to_string()))
}
