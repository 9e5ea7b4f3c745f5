//! Persistence for the task list.
//!
//! Two layers:
//! - [`KeyValueStore`] is a string-to-string store (`get`/`set` by key),
//!   with an in-memory implementation for tests and a directory-backed one
//!   for the CLI.
//! - [`Persistence`] is what the task store talks to: load or save the whole
//!   ordered list. [`KvPersistence`] implements it by encoding the list as
//!   JSON under the fixed [`STORAGE_KEY`].
//!
//! Missing or malformed stored data loads as "nothing saved". Genuine read
//! failures are surfaced so an unreadable store is never overwritten blind.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use nexus_core::codec::{DecodeNote, decode_tasks, encode_tasks};
use nexus_core::{Iso8601, Task, TimestampCodec};

/// Key under which the task list is stored.
pub const STORAGE_KEY: &str = "scifi-todos";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The key cannot be used by this store.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and saves the whole task list.
pub trait Persistence {
    /// Restores the saved list, or `None` if nothing usable is saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing store cannot be read.
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError>;

    /// Replaces the saved list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be encoded or written.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// [`Persistence`] over a [`KeyValueStore`], JSON-encoded under [`STORAGE_KEY`].
pub struct KvPersistence<S, T = Iso8601> {
    store: S,
    codec: T,
}

impl<S: KeyValueStore> KvPersistence<S> {
    /// Wraps a key-value store using ISO-8601 timestamps.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            codec: Iso8601,
        }
    }
}

impl<S: KeyValueStore, T: TimestampCodec> KvPersistence<S, T> {
    /// Wraps a key-value store with a custom timestamp codec.
    #[must_use]
    pub const fn with_codec(store: S, codec: T) -> Self {
        Self { store, codec }
    }

    /// The underlying key-value store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore, T: TimestampCodec> Persistence for KvPersistence<S, T> {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            tracing::debug!(key = STORAGE_KEY, "no saved tasks");
            return Ok(None);
        };

        match decode_tasks(&self.codec, &raw) {
            Ok(decoded) => {
                for note in &decoded.notes {
                    log_decode_note(note);
                }
                tracing::debug!(
                    key = STORAGE_KEY,
                    count = decoded.tasks.len(),
                    "loaded saved tasks"
                );
                Ok(Some(decoded.tasks))
            }
            Err(err) => {
                tracing::warn!(
                    key = STORAGE_KEY,
                    error = %err,
                    "saved tasks are malformed, starting empty"
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let encoded = encode_tasks(&self.codec, tasks)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.store.set(STORAGE_KEY, &encoded)?;
        tracing::debug!(key = STORAGE_KEY, count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn log_decode_note(note: &DecodeNote) {
    match note {
        DecodeNote::BlankTitle(id) => {
            tracing::warn!(task_id = %id, "dropped saved task with blank title");
        }
        DecodeNote::DuplicateId(id) => {
            tracing::warn!(task_id = %id, "dropped saved task with duplicate id");
        }
        DecodeNote::CompletionRepaired(id) => {
            tracing::warn!(task_id = %id, "repaired completion time of saved task");
        }
    }
}
