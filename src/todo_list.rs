use crate::clock::{Clock, SystemClock};
use crate::domain::{datetime, filter_tasks, Filter, Task, TaskId, TaskView};
use crate::error::TodoError;
use crate::persistence::{parse_tasks, serialize_tasks, KeyValueStore, TODOS_KEY};
use crate::presenter::Presenter;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Outcome of loading the stored tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Tasks restored into the collection
    pub loaded: usize,
    /// Records dropped as unreadable or with an invalid due date
    pub dropped: usize,
    /// The whole store was unreadable and has been cleared
    pub reset: bool,
}

/// Owns the task collection and keeps timers, storage and presentation in step.
///
/// Every mutation persists and re-renders. Timers are driven by [`TodoList::tick`],
/// which acts as the shared scheduler for all tasks. A task's timer is stopped
/// before the task leaves the collection.
pub struct TodoList<S: KeyValueStore, P: Presenter> {
    tasks: Vec<Task>,
    filter: Filter,
    store: S,
    presenter: P,
    clock: Box<dyn Clock>,
    last_id: Option<TaskId>,
    needs_save: bool,
}

impl<S: KeyValueStore, P: Presenter> TodoList<S, P> {
    pub fn new(store: S, presenter: P) -> Self {
        Self::with_clock(store, presenter, Box::new(SystemClock))
    }

    pub fn with_clock(store: S, presenter: P, clock: Box<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            filter: Filter::All,
            store,
            presenter,
            clock,
            last_id: None,
            needs_save: false,
        }
    }

    /// Load stored tasks, restart countdowns that still have time left, render
    pub fn initialize(&mut self) -> LoadReport {
        let report = self.load();

        let now = self.clock.now();
        for task in &mut self.tasks {
            if task.timer.remaining() > 0 {
                task.timer.start(now);
            }
        }

        self.render();
        report
    }

    /// Add a task from raw input (due date in input layout or RFC 3339)
    pub fn add_raw(&mut self, text: &str, due: &str) -> Result<TaskId, TodoError> {
        if text.trim().is_empty() {
            return Err(TodoError::EmptyText);
        }
        let due = datetime::parse_instant(due)?;
        self.add(text, due)
    }

    /// Add a task due at `due`; rejected without mutation unless due is in the future
    pub fn add(&mut self, text: &str, due: DateTime<Utc>) -> Result<TaskId, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let now = self.clock.now();
        let seconds = (due - now).num_seconds();
        if seconds <= 0 {
            return Err(TodoError::DueNotInFuture);
        }

        let mut id = TaskId::next(now, self.last_id);
        while self.task(id).is_some() {
            id = TaskId::next(now, Some(id));
        }
        self.last_id = Some(id);
        self.tasks.push(Task::new(id, text.to_string(), due, seconds as u64));
        info!("Added task {} due {}", id, datetime::to_storage(due));

        self.save();
        self.render();

        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.timer.start(now);
        }
        Ok(id)
    }

    /// Flip completion; the countdown is unaffected. Returns false if not found.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.toggle_completed();
        debug!("Task {} completed = {}", id, task.completed);

        self.save();
        self.render();
        true
    }

    /// Stop the task's countdown and remove it. Returns false if not found.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if self.remove_task(id).is_none() {
            return false;
        }
        info!("Deleted task {}", id);

        self.save();
        self.render();
        true
    }

    /// Change the view predicate; the collection itself is untouched
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.render();
    }

    /// Write every task record to the store
    pub fn persist(&mut self) -> Result<(), TodoError> {
        let json = serialize_tasks(&self.tasks)?;
        self.store.set(TODOS_KEY, &json)?;
        self.needs_save = false;
        Ok(())
    }

    /// Retry a persist that failed earlier
    pub fn flush(&mut self) -> Result<(), TodoError> {
        if self.needs_save {
            self.persist()?;
        }
        Ok(())
    }

    /// Replace the collection with the stored tasks.
    ///
    /// Remaining time is recomputed from each due date rather than trusted from
    /// the stored snapshot. An unreadable store resets the collection and is cleared.
    pub fn load(&mut self) -> LoadReport {
        let now = self.clock.now();
        let stored = self.store.get(TODOS_KEY).and_then(|content| match content {
            Some(content) => parse_tasks(&content, now).map(Some),
            None => Ok(None),
        });

        let mut report = LoadReport::default();
        match stored {
            Ok(Some(parsed)) => {
                report.loaded = parsed.tasks.len();
                report.dropped = parsed.dropped;
                self.replace_tasks(parsed.tasks);
            }
            Ok(None) => self.replace_tasks(Vec::new()),
            Err(e) => {
                warn!("Error loading tasks, starting empty: {:#}", e);
                self.replace_tasks(Vec::new());
                if let Err(e) = self.store.remove(TODOS_KEY) {
                    warn!("Failed to clear stored tasks: {:#}", e);
                }
                report.reset = true;
            }
        }

        info!(
            "Loaded {} tasks ({} dropped{})",
            report.loaded,
            report.dropped,
            if report.reset { ", store reset" } else { "" }
        );
        report
    }

    /// Advance every countdown to the current time.
    ///
    /// Each task whose timer fired gets its display refreshed, or is deleted if
    /// it can no longer be rendered. Returns the ids that fired.
    pub fn tick(&mut self) -> Vec<TaskId> {
        let now = self.clock.now();
        let fired: Vec<TaskId> = self
            .tasks
            .iter_mut()
            .filter_map(|task| (task.timer.poll(now) > 0).then_some(task.id))
            .collect();

        for id in &fired {
            self.refresh_task(*id);
        }
        fired
    }

    /// Render the filtered tasks in collection order; unrenderable tasks are deleted
    pub fn render(&mut self) {
        let filter = self.filter;
        let mut views = Vec::new();
        let mut broken = Vec::new();

        for task in filter_tasks(&self.tasks, filter) {
            match TaskView::build(task) {
                Ok(view) => views.push(view),
                Err(e) => {
                    warn!("Removing task {} that cannot be rendered: {}", task.id, e);
                    broken.push(task.id);
                }
            }
        }

        if !broken.is_empty() {
            for id in broken {
                self.remove_task(id);
            }
            self.save();
        }

        self.presenter.render(&views, filter);
    }

    fn refresh_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };
        match TaskView::build(task) {
            Ok(view) => {
                debug!(
                    "Task {} has {}s of {}s left",
                    id,
                    view.remaining_seconds,
                    task.timer.total()
                );
                if self.filter.matches(view.completed) {
                    self.presenter.update_task(&view);
                }
            }
            Err(e) => {
                warn!("Removing task {} that cannot be rendered: {}", id, e);
                self.delete(id);
            }
        }
    }

    /// Stop and remove a task, returning it
    fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks[index].timer.stop();
        Some(self.tasks.remove(index))
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) {
        for task in &mut self.tasks {
            task.timer.stop();
        }
        self.last_id = tasks.iter().map(|t| t.id).max();
        self.tasks = tasks;
    }

    /// Persist, keeping the change pending if the store refuses it
    fn save(&mut self) {
        if let Err(e) = self.persist() {
            warn!("Failed to save tasks, will retry: {:#}", e);
            self.needs_save = true;
        }
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing the current filter
    #[cfg(test)]
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, self.filter)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
