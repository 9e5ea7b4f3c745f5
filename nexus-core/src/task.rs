//! Task records and the field-level operations that keep them valid.
//!
//! A [`Task`] always satisfies two invariants: its title is non-empty after
//! trimming, and `completed_at` is `Some` exactly when `completed` is true.
//! Construction goes through [`NewTask`] and edits through [`TaskPatch`] so
//! neither can be broken from outside this module.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// How urgent a task is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The default for new tasks.
    #[default]
    Medium,
    /// Do this first.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lowercase name as used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown priority name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// A single mission record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    completed: bool,
    priority: Priority,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Rebuilds a task from stored parts, repairing the completion invariant.
    ///
    /// Returns `None` if the title is blank. A completed task without a
    /// completion time gets `created_at`; an open task loses any stray
    /// completion time.
    #[must_use]
    pub fn restore(
        id: TaskId,
        title: &str,
        description: Option<&str>,
        completed: bool,
        priority: Priority,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        let title = normalize_title(title)?;
        let completed_at = if completed {
            Some(completed_at.unwrap_or(created_at))
        } else {
            None
        };
        Some(Self {
            id,
            title,
            description: description.and_then(normalize_description),
            completed,
            priority,
            created_at,
            completed_at,
        })
    }

    /// Task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Trimmed, non-empty title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// When the task was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the task was completed; `Some` iff [`is_completed`](Self::is_completed).
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Flips completion, stamping `now` when the task becomes completed.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
    }

    /// Applies an edit.
    ///
    /// Returns `false` and leaves the task untouched if the patch would
    /// blank the title.
    pub fn apply(&mut self, patch: TaskPatch) -> bool {
        let title = match patch.title {
            Some(raw) => match normalize_title(&raw) {
                Some(title) => Some(title),
                None => return false,
            },
            None => None,
        };
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description.as_deref().and_then(normalize_description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        true
    }
}

/// User input for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Raw title; trimmed before use.
    pub title: String,
    /// Raw description; blank means none.
    pub description: Option<String>,
    /// Requested priority.
    pub priority: Priority,
}

impl NewTask {
    /// Creates a draft with the given title and default priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the draft would be accepted.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Turns the draft into an open task, or `None` if the title is blank.
    #[must_use]
    pub fn into_task(self, id: TaskId, created_at: DateTime<Utc>) -> Option<Task> {
        Some(Task {
            id,
            title: normalize_title(&self.title)?,
            description: self.description.as_deref().and_then(normalize_description),
            completed: false,
            priority: self.priority,
            created_at,
            completed_at: None,
        })
    }
}

/// A partial edit of a task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// True if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none()
    }
}

fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn normalize_description(raw: &str) -> Option<String> {
    normalize_title(raw)
}
