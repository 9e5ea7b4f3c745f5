//! Task store: create/toggle/update/delete over an owned, persisted list.

use nexus_core::{NewTask, RankState, Stats, Task, TaskId, TaskPatch};

use super::TaskError;
use super::clock::{Clock, SystemClock};
use crate::storage::Persistence;

/// Owns the ordered task list (most recently added first).
///
/// Mutations either succeed and are saved, or fail and leave the list as it
/// was. The one exception is a failed save: the in-memory change is kept and
/// the error returned, and the next successful save writes the whole list.
pub struct TaskStore<P, C = SystemClock> {
    tasks: Vec<Task>,
    persistence: P,
    clock: C,
}

impl<P: Persistence> TaskStore<P> {
    /// Opens a store on the wall clock and loads any saved tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the backing store cannot be read.
    pub fn open(persistence: P) -> Result<Self, TaskError> {
        Self::open_with_clock(persistence, SystemClock)
    }
}

impl<P: Persistence, C: Clock> TaskStore<P, C> {
    /// Opens a store with the given clock and loads any saved tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the backing store cannot be read.
    pub fn open_with_clock(persistence: P, clock: C) -> Result<Self, TaskError> {
        let mut store = Self {
            tasks: Vec::new(),
            persistence,
            clock,
        };
        store.load_all()?;
        Ok(store)
    }

    /// Replaces the in-memory list with the saved one and returns its length.
    ///
    /// Nothing saved, or malformed saved data, yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the backing store cannot be read.
    pub fn load_all(&mut self) -> Result<usize, TaskError> {
        self.tasks = self.persistence.load()?.unwrap_or_default();
        tracing::debug!(count = self.tasks.len(), "task list loaded");
        Ok(self.tasks.len())
    }

    /// Writes the whole list to the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the write fails.
    pub fn save_all(&mut self) -> Result<(), TaskError> {
        self.persistence.save(&self.tasks)?;
        Ok(())
    }

    /// Creates a task at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] if the title is blank, or
    /// [`TaskError::Storage`] if saving fails.
    pub fn add(&mut self, draft: NewTask) -> Result<&Task, TaskError> {
        let task = draft
            .into_task(TaskId::new(), self.clock.now())
            .ok_or(TaskError::TitleEmpty)?;
        tracing::info!(task_id = %task.id(), priority = %task.priority(), "mission created");
        self.tasks.insert(0, task);
        self.save_all()?;
        Ok(&self.tasks[0])
    }

    /// Flips a task's completion state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] for an unknown id, or
    /// [`TaskError::Storage`] if saving fails.
    pub fn toggle(&mut self, id: &TaskId) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let now = self.clock.now();
        self.tasks[index].toggle(now);
        tracing::info!(
            task_id = %id,
            completed = self.tasks[index].is_completed(),
            "mission toggled"
        );
        self.save_all()?;
        Ok(&self.tasks[index])
    }

    /// Applies an edit to a task's title, description or priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] for an unknown id,
    /// [`TaskError::TitleEmpty`] if the patch blanks the title, or
    /// [`TaskError::Storage`] if saving fails.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        if !self.tasks[index].apply(patch) {
            return Err(TaskError::TitleEmpty);
        }
        tracing::info!(task_id = %id, "mission updated");
        self.save_all()?;
        Ok(&self.tasks[index])
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] for an unknown id, or
    /// [`TaskError::Storage`] if saving fails.
    pub fn delete(&mut self, id: &TaskId) -> Result<Task, TaskError> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        tracing::info!(task_id = %id, "mission deleted");
        self.save_all()?;
        Ok(removed)
    }

    /// Resolves a full id or a unique, case-insensitive id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if nothing matches, or
    /// [`TaskError::AmbiguousId`] if several tasks share the prefix.
    pub fn resolve(&self, prefix: &str) -> Result<TaskId, TaskError> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(TaskError::TaskNotFound(prefix.to_string()));
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|task| task.id().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id().clone()),
            (Some(_), Some(_)) => Err(TaskError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(TaskError::TaskNotFound(prefix.to_string())),
        }
    }

    /// All tasks, most recently added first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Totals over the current list.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> u32 {
        self.stats().completed_u32()
    }

    /// Badge state for the current completed count.
    #[must_use]
    pub fn rank(&self) -> RankState {
        RankState::derive(self.completed_count())
    }

    /// The persistence collaborator.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    fn index_of(&self, id: &TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))
    }
}
