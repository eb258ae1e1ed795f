pub mod datetime;
pub mod enums;
pub mod task;
pub mod timer;
pub mod views;

pub use enums::{Filter, UiMode, Urgency};
pub use task::{Task, TaskId, TaskRecord};
pub use views::{checkbox, filter_tasks, TaskView};
