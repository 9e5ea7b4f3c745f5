//! Property-based tests for the task model, view filter, rank deriver and
//! stored-list codec.
//!
//! Uses proptest to verify:
//! 1. `visible(tasks, "", All)` is the identity and every view keeps order.
//! 2. Active and completed views never share a task.
//! 3. Toggling twice restores completion state.
//! 4. Rank is monotonic in the completed count and matches the level formula.
//! 5. Encoded task lists decode to the same tasks; garbage never panics.

use chrono::{DateTime, TimeZone, Utc};
use nexus_core::codec::{decode_tasks, encode_tasks};
use nexus_core::rank::{LEVEL_SPAN, evaluate};
use nexus_core::view::visible;
use nexus_core::*;
use proptest::prelude::*;
use uuid::Uuid;

// --- Strategies ---

/// Millisecond timestamps between 2001 and 2100.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (1_000_000_000_000_i64..4_102_444_800_000_i64)
        .prop_map(|ms| Utc.timestamp_millis_opt(ms).unwrap())
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

fn arb_filter() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        Just(StatusFilter::Active),
        Just(StatusFilter::Completed),
    ]
}

/// A valid task; titles always contain a visible character.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        any::<u128>(),
        "[ a-zA-Z0-9]{0,12}[a-zA-Z0-9][ a-zA-Z0-9]{0,12}",
        proptest::option::of("[ a-z]{0,16}"),
        arb_priority(),
        arb_timestamp(),
        proptest::option::of(0_i64..10_000_000),
    )
        .prop_map(|(id, title, description, priority, created, done_after)| {
            let mut draft = NewTask::new(title).with_priority(priority);
            draft.description = description;
            let mut task = draft
                .into_task(TaskId::from_uuid(Uuid::from_u128(id)), created)
                .unwrap();
            if let Some(ms) = done_after {
                task.toggle(created + chrono::Duration::milliseconds(ms));
            }
            task
        })
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task(), 0..24)
}

// --- Properties ---

proptest! {
    #[test]
    fn empty_query_all_is_identity(tasks in arb_tasks()) {
        let shown = visible(&tasks, "", StatusFilter::All);
        let expected: Vec<&Task> = tasks.iter().collect();
        prop_assert_eq!(shown, expected);
    }

    #[test]
    fn active_and_completed_partition(tasks in arb_tasks(), query in "[a-zA-Z]{0,3}") {
        let active = visible(&tasks, &query, StatusFilter::Active);
        let completed = visible(&tasks, &query, StatusFilter::Completed);
        let all = visible(&tasks, &query, StatusFilter::All);
        for task in &active {
            prop_assert!(!completed.iter().any(|c| std::ptr::eq(*c, *task)));
        }
        prop_assert_eq!(active.len() + completed.len(), all.len());
    }

    #[test]
    fn views_preserve_source_order(
        tasks in arb_tasks(),
        query in "[a-zA-Z]{0,2}",
        filter in arb_filter(),
    ) {
        let shown = visible(&tasks, &query, filter);
        let positions: Vec<usize> = shown
            .iter()
            .map(|s| tasks.iter().position(|t| std::ptr::eq(t, *s)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn query_matches_are_case_insensitive(tasks in arb_tasks(), query in "[a-zA-Z]{1,3}") {
        let lower = visible(&tasks, &query.to_lowercase(), StatusFilter::All);
        let upper = visible(&tasks, &query.to_uppercase(), StatusFilter::All);
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn toggle_twice_restores_completion(task in arb_task(), a in arb_timestamp(), b in arb_timestamp()) {
        let original = task.clone();
        let mut task = task;
        task.toggle(a);
        prop_assert_eq!(task.is_completed(), !original.is_completed());
        prop_assert_eq!(task.completed_at().is_some(), task.is_completed());
        task.toggle(b);
        prop_assert_eq!(task.is_completed(), original.is_completed());
        if !original.is_completed() {
            prop_assert_eq!(task, original);
        }
    }

    #[test]
    fn rank_is_monotonic(a in 0_u32..200, b in 0_u32..200) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(RankState::derive(lo).rank <= RankState::derive(hi).rank);
    }

    #[test]
    fn level_and_xp_formula(completed in 0_u32..10_000) {
        let state = RankState::derive(completed);
        prop_assert_eq!(state.level, completed / LEVEL_SPAN + 1);
        prop_assert_eq!(state.xp_current, completed % LEVEL_SPAN);
        prop_assert_eq!(state.xp_to_next, LEVEL_SPAN);
        prop_assert!(state.rank.min_completed() <= completed);
        if let Some(next) = state.rank.next() {
            prop_assert!(completed < next.min_completed());
        }
    }

    #[test]
    fn evaluate_flags_exactly_rank_increases(previous in 0_u32..80, now in 0_u32..80) {
        let before = Rank::for_completed(previous);
        let update = evaluate(before, now);
        prop_assert_eq!(update.rank_increased, update.state.rank > before);
        prop_assert_eq!(update.state, RankState::derive(now));
    }

    #[test]
    fn codec_round_trip(tasks in arb_tasks()) {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<Task> = tasks.into_iter().filter(|t| seen.insert(t.id().clone())).collect();
        let encoded = encode_tasks(&Iso8601, &unique).unwrap();
        let decoded = decode_tasks(&Iso8601, &encoded).unwrap();
        prop_assert!(decoded.notes.is_empty());
        prop_assert_eq!(decoded.tasks, unique);
    }

    #[test]
    fn decode_garbage_never_panics(raw in ".{0,256}") {
        let _ = decode_tasks(&Iso8601, &raw);
    }

    #[test]
    fn stats_rate_is_bounded(tasks in arb_tasks()) {
        let stats = Stats::from_tasks(&tasks);
        match stats.success_rate() {
            None => prop_assert_eq!(stats.total, 0),
            Some(rate) => prop_assert!(rate <= 100),
        }
    }
}
