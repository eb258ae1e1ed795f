use crate::domain::{datetime, Filter, TaskId, TaskView, UiMode};
use crate::persistence::{load_metadata, save_metadata, AppMetadata, KeyValueStore};
use crate::presenter::ViewCache;
use crate::todo_list::{LoadReport, TodoList};
use anyhow::Result;
use chrono::Duration;
use tracing::warn;

/// Input form field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Due,
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    /// Due date in the input layout (YYYY-MM-DDTHH:MM)
    pub due: String,
    pub editing_field: FormField,
    /// Rejection message from the last submit
    pub error: Option<String>,
}

/// Terminal application state
pub struct AppState<S: KeyValueStore> {
    pub list: TodoList<S, ViewCache>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// One-line message shown in the status bar
    pub status: Option<String>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Restore the last filter, load tasks and start their countdowns
    pub fn new(mut list: TodoList<S, ViewCache>) -> Self {
        let metadata = load_metadata(list.store()).unwrap_or_else(|e| {
            warn!("Ignoring unreadable metadata: {:#}", e);
            AppMetadata::default()
        });

        let report = list.initialize();
        if metadata.filter != list.filter() {
            list.set_filter(metadata.filter);
        }

        Self {
            list,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: load_status(report),
        }
    }

    /// Rows currently on screen
    pub fn views(&self) -> &[TaskView] {
        self.list.presenter().views()
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.list.presenter().get(self.selected_index).map(|v| v.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.list.presenter().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list.presenter().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.list.toggle(id);
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.list.delete(id);
            self.clamp_selection();
            self.status = Some("Task deleted".to_string());
        }
    }

    /// Switch filter and remember it for next time
    pub fn set_filter(&mut self, filter: Filter) {
        self.list.set_filter(filter);
        self.clamp_selection();

        let metadata = AppMetadata { filter };
        if let Err(e) = save_metadata(self.list.store_mut(), &metadata) {
            warn!("Failed to save metadata: {:#}", e);
        }
    }

    pub fn cycle_filter(&mut self) {
        let next = self.list.filter().next();
        self.set_filter(next);
    }

    /// Open the add form with the due date prefilled one hour ahead
    pub fn start_add_task(&mut self) {
        let due = self.list.now() + Duration::hours(1);
        self.input_form = Some(InputFormState {
            text: String::new(),
            due: datetime::format_for_input(&datetime::to_storage(due)),
            editing_field: FormField::Text,
            error: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = match form.editing_field {
                FormField::Text => FormField::Due,
                FormField::Due => FormField::Text,
            };
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Text => form.text.push(c),
                FormField::Due => form.due.push(c),
            }
            form.error = None;
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Text => form.text.pop(),
                FormField::Due => form.due.pop(),
            };
            form.error = None;
        }
    }

    /// Submit the form; a rejected task keeps the form open with the reason
    pub fn submit_input_form(&mut self) {
        let Some(form) = &mut self.input_form else {
            return;
        };

        match self.list.add_raw(&form.text, &form.due) {
            Ok(id) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                if let Some(index) = self.views().iter().position(|v| v.id == id) {
                    self.selected_index = index;
                }
                self.status = Some("Task added".to_string());
            }
            Err(e) => {
                if !e.is_rejection() {
                    warn!("Failed to add task: {:#}", e);
                }
                form.error = Some(e.to_string());
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Advance countdowns
    pub fn tick(&mut self) {
        if !self.list.tick().is_empty() {
            self.clamp_selection();
        }
    }

    /// Retry any pending write
    pub fn save(&mut self) -> Result<()> {
        self.list.flush()?;
        Ok(())
    }
}

fn load_status(report: LoadReport) -> Option<String> {
    if report.reset {
        Some("Saved tasks were unreadable and have been cleared".to_string())
    } else if report.dropped > 0 {
        Some(format!("Dropped {} task(s) with an invalid due date", report.dropped))
    } else {
        None
    }
}
