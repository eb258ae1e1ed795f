use crate::domain::{Task, TaskRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Tasks recovered from the stored array
#[derive(Debug, Default)]
pub struct ParsedTasks {
    pub tasks: Vec<Task>,
    /// Records skipped because they were unreadable or had an invalid due date
    pub dropped: usize,
}

/// Parse the stored JSON array into tasks with fresh, stopped timers.
///
/// Fails only if the whole blob is not a JSON array. Individual records that
/// cannot be read or whose due date is not a valid instant are dropped.
pub fn parse_tasks(content: &str, now: DateTime<Utc>) -> Result<ParsedTasks> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).context("Stored tasks are not a JSON array")?;

    let mut parsed = ParsedTasks::default();
    for (index, value) in values.into_iter().enumerate() {
        let record: TaskRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!("Dropping unreadable task record #{}: {}", index, e);
                parsed.dropped += 1;
                continue;
            }
        };

        let id = record.id;
        match Task::from_record(record, now) {
            Ok(task) => parsed.tasks.push(task),
            Err(e) => {
                warn!("Dropping task {}: {}", id, e);
                parsed.dropped += 1;
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_empty_array() {
        let parsed = parse_tasks("[]", now()).unwrap();
        assert!(parsed.tasks.is_empty());
        assert_eq!(parsed.dropped, 0);
    }

    #[test]
    fn test_parse_drops_invalid_due_date() {
        let content = r#"[
            {"id": 1, "text": "Valid", "completed": false, "dueDate": "2026-10-19T13:00:00.000Z", "remainingSeconds": 5},
            {"id": 2, "text": "Broken", "completed": false, "dueDate": "not a date", "remainingSeconds": 5}
        ]"#;
        let parsed = parse_tasks(content, now()).unwrap();

        assert_eq!(parsed.tasks.len(), 1);
        assert_eq!(parsed.tasks[0].id, TaskId(1));
        assert_eq!(parsed.tasks[0].timer.remaining(), 3600);
        assert_eq!(parsed.dropped, 1);
    }

    #[test]
    fn test_parse_drops_malformed_records() {
        let content = r#"[
            {"id": 1, "text": "Valid", "dueDate": "2026-10-19T13:00:00.000Z"},
            {"text": "No id", "dueDate": "2026-10-19T13:00:00.000Z"},
            {"id": 3, "text": "No due date"},
            42
        ]"#;
        let parsed = parse_tasks(content, now()).unwrap();
        assert_eq!(parsed.tasks.len(), 1);
        assert!(!parsed.tasks[0].completed);
        assert_eq!(parsed.dropped, 3);
    }

    #[test]
    fn test_parse_rejects_corrupt_blob() {
        assert!(parse_tasks("{not json", now()).is_err());
        assert!(parse_tasks(r#"{"id": 1}"#, now()).is_err());
    }
}
