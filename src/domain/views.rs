use super::datetime;
use super::enums::{Filter, Urgency};
use super::task::{Task, TaskId};
use crate::error::TodoError;

/// Render-ready strings for a single task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Due date, e.g. "Mon, Oct 19, 03:45 PM"
    pub due_display: String,
    /// Countdown, e.g. "1h 2m 3s"
    pub time_left: String,
    pub remaining_seconds: u64,
    pub urgency: Urgency,
}

impl TaskView {
    /// Build the view for a task; fails if its due date is not a valid instant
    pub fn build(task: &Task) -> Result<Self, TodoError> {
        if !datetime::is_valid(&task.due_date) {
            return Err(TodoError::InvalidDate(task.due_date.clone()));
        }
        let remaining = task.timer.remaining();
        Ok(Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            due_display: datetime::format_display(&task.due_date),
            time_left: task.timer.display_string(),
            remaining_seconds: remaining,
            urgency: Urgency::from_remaining(remaining),
        })
    }

    /// Countdown reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Countdown label, "Time's up" once expired
    pub fn countdown_label(&self) -> String {
        if self.is_expired() {
            "Time's up".to_string()
        } else {
            format!("Time left: {}", self.time_left)
        }
    }
}

/// Tasks passing the filter, in collection order
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .collect()
}

/// Completion checkbox glyph
pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task(id: i64, completed: bool) -> Task {
        let due = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let mut task = Task::new(TaskId(id), format!("Task {}", id), due, 5400);
        task.completed = completed;
        task
    }

    #[test]
    fn test_build_view() {
        let view = TaskView::build(&task(1, false)).unwrap();
        assert_eq!(view.time_left, "1h 30m 0s");
        assert_eq!(view.urgency, Urgency::Warning);
        assert_eq!(view.countdown_label(), "Time left: 1h 30m 0s");
        assert!(!view.is_expired());
        assert_ne!(view.due_display, datetime::INVALID_DATE);
    }

    #[test]
    fn test_build_view_invalid_due() {
        let mut broken = task(1, false);
        broken.due_date = "Invalid Date".to_string();
        assert!(TaskView::build(&broken).is_err());
    }

    #[test]
    fn test_expired_label() {
        let due = Utc::now() - Duration::hours(1);
        let expired = Task::new(TaskId(1), "late".to_string(), due, 0);
        let view = TaskView::build(&expired).unwrap();
        assert!(view.is_expired());
        assert_eq!(view.countdown_label(), "Time's up");
        assert_eq!(view.urgency, Urgency::Danger);
    }

    #[test]
    fn test_filter_tasks_preserves_order() {
        let tasks = vec![task(1, false), task(2, true), task(3, false)];

        let ids = |filter| -> Vec<i64> {
            filter_tasks(&tasks, filter).iter().map(|t| t.id.0).collect()
        };
        assert_eq!(ids(Filter::All), vec![1, 2, 3]);
        assert_eq!(ids(Filter::Active), vec![1, 3]);
        assert_eq!(ids(Filter::Completed), vec![2]);
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(checkbox(true), "[x]");
        assert_eq!(checkbox(false), "[ ]");
    }
}
