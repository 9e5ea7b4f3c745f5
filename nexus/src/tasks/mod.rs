//! The owned task collection and its persistence mirror.
//!
//! [`TaskStore`] is the only thing that mutates the task list. Every
//! successful mutation is followed by a synchronous whole-list save through
//! the injected [`Persistence`](crate::storage::Persistence).

pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::TaskStore;

use thiserror::Error;

use crate::storage::StoreError;

/// Errors that can occur during task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task title cannot be empty.
    #[error("mission title cannot be empty")]
    TitleEmpty,
    /// Task with the given ID was not found.
    #[error("mission not found: {0}")]
    TaskNotFound(String),
    /// An id prefix matched more than one task.
    #[error("id prefix '{0}' matches more than one mission")]
    AmbiguousId(String),
    /// Loading or saving the task list failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl TaskError {
    /// Whether the command left everything untouched because its target
    /// mission does not exist.
    #[must_use]
    pub const fn is_no_op(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}
