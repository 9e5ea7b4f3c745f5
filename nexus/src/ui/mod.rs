//! Plain-text rendering of missions, stats and the rank badge.
//!
//! Every function returns a `String`; the binary decides where it goes.

pub mod rank_panel;
pub mod task_list;

pub use rank_panel::{render_badge, render_panel, render_rank_up, render_stats};
pub use task_list::{render_list, render_task};

use std::fmt::Write;

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Length of the id prefix shown next to each mission.
pub const SHORT_ID_LEN: usize = 8;

/// Formats a timestamp in local time with a chrono format string.
///
/// Falls back to RFC 3339 if the format string is invalid.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>, format: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.to_rfc3339_opts(SecondsFormat::Secs, true);
    }
    out
}
