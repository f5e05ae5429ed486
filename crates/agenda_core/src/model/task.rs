//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record independent of storage details.
//! - Parse user-supplied deadline text into calendar dates.
//!
//! # Invariants
//! - `id` is stable, unique, and never reused within a store lifetime.
//! - `deadline` carries no time-of-day component.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Reflects insertion order but carries no business meaning; in particular
/// it is not chronological by deadline.
pub type TaskId = i64;

/// Placeholder stored when a task is submitted with a blank description.
pub const DEFAULT_DESCRIPTION: &str = "default_value";

/// Wire and storage format for deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do item.
///
/// Tasks are immutable once persisted: they are created, listed, and
/// eventually deleted, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Serialized as `task` to match the persisted column naming.
    #[serde(rename = "task")]
    pub description: String,
    /// Calendar date the task is due; no time component.
    pub deadline: NaiveDate,
}

impl Task {
    /// Returns whether this task is due exactly on `day`.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.deadline == day
    }

    /// Returns whether this task is missed as of `today`.
    ///
    /// A task is missed when its deadline is strictly before the current
    /// date; tasks due today are not missed.
    pub fn is_missed(&self, today: NaiveDate) -> bool {
        self.deadline < today
    }
}

/// User-supplied deadline text did not match the expected format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineParseError {
    pub input: String,
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid deadline `{}`; expected a calendar date formatted YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for DeadlineParseError {}

/// Parses a `YYYY-MM-DD` deadline string into a calendar date.
///
/// Surrounding whitespace is ignored. Any other deviation from the format,
/// including out-of-range components, is rejected.
pub fn parse_deadline(input: &str) -> Result<NaiveDate, DeadlineParseError> {
    NaiveDate::parse_from_str(input.trim(), DEADLINE_FORMAT).map_err(|_| DeadlineParseError {
        input: input.trim().to_string(),
    })
}
