use crate::domain::TaskId;
use thiserror::Error;

/// Errors surfaced by task list operations
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Task name cannot be empty.")]
    EmptyText,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Please select a valid future date and time.")]
    DueNotInFuture,

    #[error("Unknown filter '{0}' (expected all, active or completed)")]
    UnknownFilter(String),

    #[error("No task with id {0}")]
    NotFound(TaskId),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TodoError {
    /// Whether this error is a rejected user input (as opposed to a storage failure)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::InvalidDate(_) | Self::DueNotInFuture
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(TodoError::EmptyText.to_string(), "Task name cannot be empty.");
        assert_eq!(
            TodoError::DueNotInFuture.to_string(),
            "Please select a valid future date and time."
        );
        assert!(TodoError::InvalidDate("nope".to_string()).is_rejection());
        assert!(!TodoError::NotFound(TaskId(1)).is_rejection());
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = TodoError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
        assert!(!err.is_rejection());
    }
}
