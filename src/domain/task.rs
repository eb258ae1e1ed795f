use super::datetime;
use super::timer::Timer;
use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier: creation time in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Next id for a task created at `now`, strictly greater than `last`.
    ///
    /// Falls back to the creation timestamp when `last` is already `i64::MAX`.
    pub fn next(now: DateTime<Utc>, last: Option<TaskId>) -> Self {
        let candidate = now.timestamp_millis();
        match last {
            Some(TaskId(prev)) if prev >= candidate => {
                prev.checked_add(1).map_or(TaskId(candidate), TaskId)
            }
            _ => TaskId(candidate),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// A user-entered item with a due date and its countdown
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    /// Display text, fixed at creation
    pub text: String,
    pub completed: bool,
    /// Due instant in storage form (RFC 3339, UTC)
    pub due_date: String,
    /// Countdown (not persisted beyond its remaining seconds)
    pub timer: Timer,
}

impl Task {
    pub fn new(id: TaskId, text: String, due: DateTime<Utc>, remaining_seconds: u64) -> Self {
        Self {
            id,
            text,
            completed: false,
            due_date: datetime::to_storage(due),
            timer: Timer::new(remaining_seconds),
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Snapshot for persistence
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            text: self.text.clone(),
            completed: self.completed,
            due_date: self.due_date.clone(),
            remaining_seconds: self.timer.remaining(),
        }
    }

    /// Rebuild a task from a stored record with a fresh, stopped timer.
    ///
    /// The stored remaining seconds are ignored: remaining time is recomputed
    /// as `max(0, due - now)`.
    pub fn from_record(record: TaskRecord, now: DateTime<Utc>) -> Result<Self, TodoError> {
        let due = datetime::parse_instant(&record.due_date)?;
        Ok(Self {
            id: record.id,
            text: record.text,
            completed: record.completed,
            due_date: record.due_date,
            timer: Timer::new(seconds_until(due, now)),
        })
    }
}

/// Whole seconds from `now` until `due`, clamped at zero
pub fn seconds_until(due: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (due - now).num_seconds().max(0) as u64
}

/// Persisted form of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub due_date: String,
    #[serde(default, alias = "timeLeft")]
    pub remaining_seconds: u64,
}
