use crate::domain::{Task, TaskRecord};
use anyhow::{Context, Result};

/// Serialize tasks to the stored JSON array
pub fn serialize_tasks(tasks: &[Task]) -> Result<String> {
    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    serde_json::to_string(&records).context("Failed to serialize tasks")
}
