//! Property-based invariant tests for location state and input throttling.
//!
//! 1. Serializing then parsing a location gives the same location.
//! 2. Parsing arbitrary input never panics and yields an ordered selection.
//! 3. A validated location always points inside the buffer.
//! 4. Without merging, the throttle delivers every action exactly once, in order.
//! 5. With merging, summed wheel notches are preserved.

use std::time::{Duration, Instant};

use hexview_runtime::{Action, LocationState, Serializable, Throttle, Validatable};
use hexview_text::SearchKind;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn kind_strategy() -> impl Strategy<Value = SearchKind> {
    prop_oneof![
        Just(SearchKind::Cursor),
        Just(SearchKind::Hex),
        Just(SearchKind::Text),
    ]
}

fn location_strategy() -> impl Strategy<Value = LocationState> {
    (
        prop::option::of(0usize..1 << 20),
        prop::option::of((0usize..4096, 0usize..4096)),
        kind_strategy(),
        "[ -~]{0,16}|\\PC{0,8}",
        prop::option::of(0usize..64),
    )
        .prop_map(|(cursor, selection, search_kind, query, selected_result)| LocationState {
            cursor,
            selection: selection.map(|(a, b)| (a.min(b), a.max(b))),
            search_kind,
            query,
            selected_result,
        })
}

/// Pushes `actions` `step` apart, polling before each push as a host would.
fn replay(throttle: &mut Throttle<Action>, actions: &[Action], step: Duration) -> Vec<Action> {
    let t0 = Instant::now();
    let mut out = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        let now = t0 + step * i as u32;
        throttle.poll(now, |batch| {
            out.extend(batch);
            true
        });
        if let Some(action) = throttle.push(action.clone(), now) {
            out.push(action);
        }
    }
    out.extend(throttle.flush());
    out
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn serialized_location_parses_back(state in location_strategy()) {
        let query = state.serialize();
        prop_assert_eq!(LocationState::deserialize(&query), state.clone());
        let url = state.share_url("https://viewer.test/blob");
        prop_assert_eq!(LocationState::deserialize(&url), state);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Arbitrary input
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_query_parses(input in "[a-f0-9=&?#%x-]{0,64}|\\PC{0,32}", len in 0usize..512) {
        let state = LocationState::deserialize(&input);
        if let Some((start, end)) = state.selection {
            prop_assert!(start <= end);
        }

        let valid = state.validate(&len);
        match len.checked_sub(1) {
            None => {
                prop_assert_eq!(valid.cursor, None);
                prop_assert_eq!(valid.selection, None);
            }
            Some(last) => {
                prop_assert!(valid.cursor.is_none_or(|c| c <= last));
                prop_assert!(valid.selection.is_none_or(|(s, e)| s <= e && e <= last));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Throttle ordering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn throttle_preserves_order(
        targets in prop::collection::vec(0usize..256, 0..40),
        step_ms in 0u64..40,
    ) {
        let actions: Vec<Action> = targets.iter().copied().map(Action::SetCursor).collect();
        let mut throttle = Throttle::new(Duration::from_millis(15));
        let out = replay(&mut throttle, &actions, Duration::from_millis(step_ms));
        prop_assert_eq!(out, actions);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Wheel merging
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merged_wheel_keeps_total(notches in prop::collection::vec(-3i32..=3, 1..40)) {
        let actions: Vec<Action> = notches.iter().copied().map(Action::Wheel).collect();
        let mut throttle = Throttle::new(Duration::from_millis(15)).with_merge(Action::merge);
        let out = replay(&mut throttle, &actions, Duration::from_millis(1));
        let total: i32 = out
            .iter()
            .map(|a| match a {
                Action::Wheel(n) => *n,
                _ => 0,
            })
            .sum();
        prop_assert_eq!(total, notches.iter().sum::<i32>());
        prop_assert!(out.len() <= actions.len());
    }
}
