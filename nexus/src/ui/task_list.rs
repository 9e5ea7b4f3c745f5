//! Mission list rendering.

use std::fmt::Write;

use nexus_core::{Stats, StatusFilter, Task};

use super::{SHORT_ID_LEN, format_timestamp};

/// Renders one mission as a short block.
///
/// ```text
/// [x] 0190a1b2  Scout perimeter  HIGH
///     north ridge
///     Created May 01, 09:30 · Completed May 01, 10:02
/// ```
#[must_use]
pub fn render_task(task: &Task, timestamp_format: &str) -> String {
    let mark = if task.is_completed() { "[x]" } else { "[ ]" };
    let id = task.id().to_string();
    let short_id = id.get(..SHORT_ID_LEN).unwrap_or(&id);
    let priority = task.priority().as_str().to_uppercase();

    let mut out = format!("{mark} {short_id}  {}  {priority}\n", task.title());
    if let Some(description) = task.description() {
        let _ = writeln!(out, "    {description}");
    }
    let _ = write!(
        out,
        "    Created {}",
        format_timestamp(task.created_at(), timestamp_format)
    );
    if let Some(done) = task.completed_at() {
        let _ = write!(out, " \u{b7} Completed {}", format_timestamp(done, timestamp_format));
    }
    out.push('\n');
    out
}

/// Renders the list view: header, visible missions, and totals footer.
#[must_use]
pub fn render_list(
    visible: &[&Task],
    query: &str,
    filter: StatusFilter,
    stats: Stats,
    timestamp_format: &str,
) -> String {
    let mut out = format!(
        "NEXUS TASKS\n{} of {} missions completed\n",
        stats.completed, stats.total
    );
    if !query.is_empty() || filter != StatusFilter::All {
        let _ = writeln!(out, "Showing {filter} missions matching \"{query}\"");
    }
    out.push('\n');

    if visible.is_empty() {
        out.push_str("No missions found\n");
        if query.is_empty() {
            out.push_str("Create your first mission to get started\n");
        } else {
            out.push_str("Try adjusting your search criteria\n");
        }
    } else {
        for task in visible {
            out.push_str(&render_task(task, timestamp_format));
        }
    }

    if stats.total > 0 {
        out.push('\n');
        out.push_str(&super::render_stats(stats));
    }
    out
}
