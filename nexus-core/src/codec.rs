//! Stored representation of the task list.
//!
//! The persisted value is a JSON array of task objects with camelCase keys
//! and ISO-8601 timestamps, the same shape the browser version of the app
//! kept under its local-storage key. Timestamp text goes through a
//! [`TimestampCodec`] so the list encoding does not care about formats.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskId};

/// Errors raised while encoding or decoding a stored task list.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stored text is not a JSON array of task objects.
    #[error("malformed task list: {0}")]
    Json(#[from] serde_json::Error),

    /// A timestamp field could not be parsed.
    #[error("malformed timestamp '{raw}': {reason}")]
    Timestamp {
        /// The offending text.
        raw: String,
        /// Parser message.
        reason: String,
    },
}

/// Converts timestamps to and from their stored text form.
pub trait TimestampCodec {
    /// Renders a timestamp for storage.
    fn format(&self, ts: &DateTime<Utc>) -> String;

    /// Parses a stored timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Timestamp`] if `raw` is not in the expected form.
    fn parse(&self, raw: &str) -> Result<DateTime<Utc>, CodecError>;
}

/// ISO-8601 / RFC 3339 in UTC with millisecond precision,
/// e.g. `2024-05-01T09:30:00.125Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso8601;

impl TimestampCodec for Iso8601 {
    fn format(&self, ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn parse(&self, raw: &str) -> Result<DateTime<Utc>, CodecError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CodecError::Timestamp {
                raw: raw.to_string(),
                reason: e.to_string(),
            })
    }
}

/// A task as it appears in the stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    id: TaskId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    completed: bool,
    priority: Priority,
    created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<String>,
}

/// Something that was fixed up or skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeNote {
    /// A record with a blank title was dropped.
    BlankTitle(TaskId),
    /// A record reused an id seen earlier in the list and was dropped.
    DuplicateId(TaskId),
    /// `completedAt` disagreed with `completed` and was repaired.
    CompletionRepaired(TaskId),
}

/// Result of decoding a stored task list.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Tasks in stored order.
    pub tasks: Vec<Task>,
    /// Repairs and drops applied along the way.
    pub notes: Vec<DecodeNote>,
}

/// Encodes tasks as a JSON array, preserving order.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_tasks(codec: &impl TimestampCodec, tasks: &[Task]) -> Result<String, CodecError> {
    let stored: Vec<StoredTask> = tasks
        .iter()
        .map(|task| StoredTask {
            id: task.id().clone(),
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            completed: task.is_completed(),
            priority: task.priority(),
            created_at: codec.format(&task.created_at()),
            completed_at: task.completed_at().map(|ts| codec.format(&ts)),
        })
        .collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Decodes a JSON array of tasks.
///
/// Structural problems (bad JSON, unknown priority, unparseable timestamp)
/// fail the whole list. Record-level problems are repaired or the record is
/// dropped, and each is reported in [`Decoded::notes`].
///
/// # Errors
///
/// Returns [`CodecError`] if the text is not a valid stored task list.
pub fn decode_tasks(codec: &impl TimestampCodec, raw: &str) -> Result<Decoded, CodecError> {
    let stored: Vec<StoredTask> = serde_json::from_str(raw)?;
    let mut decoded = Decoded::default();
    let mut seen = std::collections::HashSet::new();

    for record in stored {
        let created_at = codec.parse(&record.created_at)?;
        let completed_at = record
            .completed_at
            .as_deref()
            .map(|raw| codec.parse(raw))
            .transpose()?;

        if seen.contains(&record.id) {
            decoded.notes.push(DecodeNote::DuplicateId(record.id));
            continue;
        }

        let Some(task) = Task::restore(
            record.id.clone(),
            &record.title,
            record.description.as_deref(),
            record.completed,
            record.priority,
            created_at,
            completed_at,
        ) else {
            decoded.notes.push(DecodeNote::BlankTitle(record.id));
            continue;
        };

        if task.completed_at() != completed_at {
            decoded
                .notes
                .push(DecodeNote::CompletionRepaired(record.id.clone()));
        }
        seen.insert(record.id);
        decoded.tasks.push(task);
    }

    Ok(decoded)
}
