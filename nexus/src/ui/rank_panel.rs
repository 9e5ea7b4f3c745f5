//! Rank badge, rank details panel, rank-up notice and totals.

use std::fmt::Write;

use nexus_core::{Rank, RankState, Stats};

/// One-line badge: `Gold · Level 4 · 2/5 XP`.
#[must_use]
pub fn render_badge(state: &RankState) -> String {
    format!(
        "{} \u{b7} Level {} \u{b7} {}/{} XP",
        state.rank, state.level, state.xp_current, state.xp_to_next
    )
}

fn progress_bar(state: &RankState) -> String {
    let filled = usize::try_from(state.xp_current).unwrap_or(0);
    let total = usize::try_from(state.xp_to_next).unwrap_or(0);
    format!(
        "[{}{}] {}%",
        "#".repeat(filled.min(total)),
        "-".repeat(total.saturating_sub(filled)),
        state.progress_percent()
    )
}

/// Full rank details: badge, progress, next rank, rewards and rank table.
#[must_use]
pub fn render_panel(state: &RankState) -> String {
    let mut out = format!("{} (Level {})\n", state.rank, state.level);
    let _ = writeln!(
        out,
        "{} {}/{} XP to next level",
        progress_bar(state),
        state.xp_current,
        state.xp_to_next
    );
    if let Some((next, remaining)) = state.next_rank() {
        let _ = writeln!(out, "Next rank: {next} ({remaining} more missions)");
    }

    out.push_str("\nRewards:\n");
    for reward in state.rank.rewards() {
        let _ = writeln!(out, "  - {reward}");
    }

    out.push_str("\nAll ranks:\n");
    for rank in Rank::ALL {
        let marker = if rank == state.rank { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<9}{:>3}+", rank.name(), rank.min_completed());
    }
    out
}

/// Celebration block shown when a toggle pushes the rank up.
#[must_use]
pub fn render_rank_up(state: &RankState) -> String {
    let mut out = format!("\n*** Rank Up! {} ***\nYou've unlocked new features!\n", state.rank);
    for reward in state.rank.rewards() {
        let _ = writeln!(out, "  * {reward}");
    }
    out
}

/// Totals footer. The success rate is omitted when there are no missions.
#[must_use]
pub fn render_stats(stats: Stats) -> String {
    let mut out = format!(
        "Total missions: {}\nCompleted: {}\n",
        stats.total, stats.completed
    );
    match stats.success_rate() {
        Some(rate) => {
            let _ = writeln!(out, "Success rate: {rate}%");
        }
        None => out.push_str("Success rate: -\n"),
    }
    out
}
