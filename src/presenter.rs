use crate::domain::{checkbox, Filter, TaskView};
use std::io::Write;
use tracing::warn;

/// Presentation surface driven by the task list
pub trait Presenter {
    /// Replace the whole list with the filtered, ordered views
    fn render(&mut self, views: &[TaskView], filter: Filter);

    /// Refresh a single task's display (countdown tick)
    fn update_task(&mut self, view: &TaskView);
}

/// Latest rendered views, kept for the terminal UI to draw each frame
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    views: Vec<TaskView>,
    filter: Filter,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> &[TaskView] {
        &self.views
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaskView> {
        self.views.get(index)
    }
}

impl Presenter for ViewCache {
    fn render(&mut self, views: &[TaskView], filter: Filter) {
        self.views = views.to_vec();
        self.filter = filter;
    }

    fn update_task(&mut self, view: &TaskView) {
        if let Some(existing) = self.views.iter_mut().find(|v| v.id == view.id) {
            *existing = view.clone();
        }
    }
}

/// Line-oriented presenter for one-shot CLI commands
pub struct PlainPresenter<W: Write> {
    out: W,
}

impl<W: Write> PlainPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format a view as a single line: "<id>  [x] text  (due, countdown)"
pub fn format_line(view: &TaskView) -> String {
    format!(
        "{}  {} {}  ({} | {})",
        view.id,
        checkbox(view.completed),
        view.text,
        view.due_display,
        view.countdown_label()
    )
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn render(&mut self, views: &[TaskView], filter: Filter) {
        let mut result = writeln!(self.out, "Tasks ({}): {}", filter.to_tag(), views.len());
        for view in views {
            if result.is_err() {
                break;
            }
            result = writeln!(self.out, "{}", format_line(view));
        }
        if let Err(e) = result {
            warn!("Failed to print task list: {}", e);
        }
    }

    fn update_task(&mut self, _view: &TaskView) {
        // One-shot output has no live rows to refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, Urgency};

    fn view(id: i64, time_left: &str, remaining: u64) -> TaskView {
        TaskView {
            id: TaskId(id),
            text: format!("Task {}", id),
            completed: false,
            due_display: "Mon, Oct 19, 03:45 PM".to_string(),
            time_left: time_left.to_string(),
            remaining_seconds: remaining,
            urgency: Urgency::from_remaining(remaining),
        }
    }

    #[test]
    fn test_view_cache_render_replaces() {
        let mut cache = ViewCache::new();
        cache.render(&[view(1, "1m 0s", 60), view(2, "2m 0s", 120)], Filter::All);
        assert_eq!(cache.len(), 2);

        cache.render(&[view(2, "2m 0s", 120)], Filter::Active);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.filter(), Filter::Active);
        assert_eq!(cache.get(0).unwrap().id, TaskId(2));
    }

    #[test]
    fn test_view_cache_update_single_row() {
        let mut cache = ViewCache::new();
        cache.render(&[view(1, "1m 0s", 60), view(2, "2m 0s", 120)], Filter::All);

        cache.update_task(&view(2, "1m 59s", 119));
        assert_eq!(cache.views()[1].time_left, "1m 59s");
        assert_eq!(cache.views()[0].time_left, "1m 0s");

        // Unknown rows are ignored
        cache.update_task(&view(9, "0m 1s", 1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_plain_presenter_output() {
        let mut presenter = PlainPresenter::new(Vec::new());
        presenter.render(&[view(1, "1m 0s", 60), view(2, "0m 0s", 0)], Filter::All);

        let output = String::from_utf8(presenter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Tasks (all): 2");
        assert_eq!(lines[1], "1  [ ] Task 1  (Mon, Oct 19, 03:45 PM | Time left: 1m 0s)");
        assert_eq!(lines[2], "2  [ ] Task 2  (Mon, Oct 19, 03:45 PM | Time's up)");
    }
}
