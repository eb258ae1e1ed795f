use crate::error::TodoError;
use serde::{Deserialize, Serialize};

/// View predicate applied at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Parse filter from a tag like "active"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether a task with this completion flag passes the filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Next filter in the all -> active -> completed cycle
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }
}

impl std::str::FromStr for Filter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| TodoError::UnknownFilter(s.to_string()))
    }
}

/// How close a task is to its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    /// Two hours or less remaining
    Warning,
    /// One hour or less remaining
    Danger,
}

impl Urgency {
    pub fn from_remaining(seconds: u64) -> Self {
        if seconds <= 3600 {
            Self::Danger
        } else if seconds <= 7200 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// UI mode for the terminal application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_tag() {
        assert_eq!(Filter::from_tag("all"), Some(Filter::All));
        assert_eq!(Filter::from_tag("ACTIVE"), Some(Filter::Active));
        assert_eq!(Filter::from_tag(" completed "), Some(Filter::Completed));
        assert_eq!(Filter::from_tag("done"), None);
        assert!("done".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(Filter::All.matches(true));
        assert!(Filter::All.matches(false));
        assert!(Filter::Active.matches(false));
        assert!(!Filter::Active.matches(true));
        assert!(Filter::Completed.matches(true));
        assert!(!Filter::Completed.matches(false));
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Active.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
        for filter in Filter::all() {
            assert_eq!(Filter::from_tag(filter.to_tag()), Some(*filter));
        }
    }

    #[test]
    fn test_urgency_thresholds() {
        assert_eq!(Urgency::from_remaining(0), Urgency::Danger);
        assert_eq!(Urgency::from_remaining(3600), Urgency::Danger);
        assert_eq!(Urgency::from_remaining(3601), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(7200), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(7201), Urgency::Normal);
    }
}
