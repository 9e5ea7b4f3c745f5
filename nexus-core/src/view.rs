//! Derived views over the task list: search/status filtering and totals.

use std::str::FromStr;

use crate::task::Task;

/// Which tasks a list view shows by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl StatusFilter {
    /// All filters in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Lowercase name as used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether a task with this completion state passes the filter.
    #[must_use]
    pub const fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}' (expected all, active or completed)")]
pub struct ParseFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// Case-insensitive substring match on the title. An empty query matches.
#[must_use]
pub fn matches_query(task: &Task, query: &str) -> bool {
    query.is_empty() || task.title().to_lowercase().contains(&query.to_lowercase())
}

/// Tasks passing both the query and the status filter, in source order.
#[must_use]
pub fn visible<'a>(tasks: &'a [Task], query: &str, filter: StatusFilter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches_query(task, query) && filter.admits(task))
        .collect()
}

/// Totals for the list footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
}

impl Stats {
    /// Counts tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.is_completed()).count(),
        }
    }

    /// Tasks not yet completed.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.total - self.completed
    }

    /// Completed share as a rounded percentage, or `None` with no tasks.
    #[must_use]
    pub fn success_rate(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        // Half-up rounding in integers: (200c + t) / 2t.
        let rate = (200 * self.completed + self.total) / (2 * self.total);
        Some(u32::try_from(rate).unwrap_or(100))
    }

    /// Completed count clamped into `u32` for rank derivation.
    #[must_use]
    pub fn completed_u32(&self) -> u32 {
        u32::try_from(self.completed).unwrap_or(u32::MAX)
    }
}
