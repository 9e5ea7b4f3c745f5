//! Application shell: runs one [`Command`] against the task store and
//! renders the result.
//!
//! Each command follows the same path: mutate the store (which saves),
//! recompute the visible list and rank, and render text.

use nexus_core::rank::evaluate;
use nexus_core::view::visible;
use nexus_core::{NewTask, TaskPatch};

use crate::config::{AppConfig, Command};
use crate::storage::Persistence;
use crate::tasks::{Clock, SystemClock, TaskError, TaskStore};
use crate::ui;

/// Application state for one session.
pub struct App<P, C = SystemClock> {
    store: TaskStore<P, C>,
    config: AppConfig,
}

impl<P: Persistence, C: Clock> App<P, C> {
    /// Creates an app over an opened store.
    #[must_use]
    pub const fn new(store: TaskStore<P, C>, config: AppConfig) -> Self {
        Self { store, config }
    }

    /// The task store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<P, C> {
        &self.store
    }

    /// Runs a command and returns the text to show.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if the command is rejected (blank title,
    /// unknown or ambiguous id) or the store cannot be saved.
    pub fn execute(&mut self, command: Command) -> Result<String, TaskError> {
        let ts_format = self.config.timestamp_format.clone();
        match command {
            Command::Add {
                title,
                description,
                priority,
            } => {
                let draft = NewTask {
                    title,
                    description,
                    priority: priority.unwrap_or(self.config.default_priority),
                };
                let task = self.store.add(draft)?;
                Ok(format!(
                    "Mission created\n{}",
                    ui::render_task(task, &ts_format)
                ))
            }
            Command::List { query, filter } => {
                let shown = visible(self.store.tasks(), &query, filter);
                Ok(ui::render_list(
                    &shown,
                    &query,
                    filter,
                    self.store.stats(),
                    &ts_format,
                ))
            }
            Command::Toggle { id } => {
                let id = self.store.resolve(&id)?;
                let previous = self.store.rank().rank;
                let task = self.store.toggle(&id)?;
                let verb = if task.is_completed() {
                    "Mission completed"
                } else {
                    "Mission reopened"
                };
                let mut out = format!("{verb}\n{}", ui::render_task(task, &ts_format));

                let update = evaluate(previous, self.store.completed_count());
                if update.rank_increased {
                    tracing::info!(rank = %update.state.rank, "rank up");
                    out.push_str(&ui::render_rank_up(&update.state));
                }
                out.push('\n');
                out.push_str(&ui::render_badge(&update.state));
                out.push('\n');
                Ok(out)
            }
            Command::Edit {
                id,
                title,
                description,
                clear_description,
                priority,
            } => {
                let id = self.store.resolve(&id)?;
                let description = if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                };
                let patch = TaskPatch {
                    title,
                    description,
                    priority,
                };
                if patch.is_empty() {
                    return Ok("Nothing to change\n".to_string());
                }
                let task = self.store.update(&id, patch)?;
                Ok(format!("Mission updated\n{}", ui::render_task(task, &ts_format)))
            }
            Command::Delete { id } => {
                let id = self.store.resolve(&id)?;
                let removed = self.store.delete(&id)?;
                Ok(format!("Mission deleted: {}\n", removed.title()))
            }
            Command::Rank => Ok(ui::render_panel(&self.store.rank())),
            Command::Stats => Ok(ui::render_stats(self.store.stats())),
        }
    }
}
