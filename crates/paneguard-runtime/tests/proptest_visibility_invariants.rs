//! Property tests for the visibility diff.
//!
//! The contract: for any pair of consecutive snapshots, the diff fires iff
//! some relevant resource's occurrence count strictly increased. It never
//! fires for decrease-only or internal-resource-only changes.

use std::collections::HashMap;

use paneguard_core::{RelevanceFilter, ResourceId};
use paneguard_runtime::VisibleSet;
use proptest::prelude::*;

fn resource() -> impl Strategy<Value = ResourceId> {
    (
        prop::sample::select(vec!["file", "untitled", "notebook-cell", "output"]),
        prop::sample::select(vec!["/a.rs", "/b.rs", "/nb.ipynb#0", "tasks"]),
    )
        .prop_map(|(scheme, path)| ResourceId::new(scheme, path))
}

fn snapshot() -> impl Strategy<Value = Vec<ResourceId>> {
    prop::collection::vec(resource(), 0..8)
}

fn counts(resources: &[ResourceId]) -> HashMap<ResourceId, usize> {
    let mut map = HashMap::new();
    for res in resources {
        *map.entry(res.clone()).or_insert(0) += 1;
    }
    map
}

proptest! {
    #[test]
    fn diff_fires_iff_a_relevant_count_strictly_increased(
        prev in snapshot(),
        cur in snapshot(),
    ) {
        let filter = RelevanceFilter::default();
        let prev_set: VisibleSet = prev.iter().cloned().collect();
        let cur_set: VisibleSet = cur.iter().cloned().collect();

        let prev_counts = counts(&prev);
        let expected = counts(&cur).iter().any(|(res, &count)| {
            count > prev_counts.get(res).copied().unwrap_or(0) && filter.is_relevant(res)
        });

        prop_assert_eq!(prev_set.relevant_added(&cur_set, &filter), expected);
    }

    #[test]
    fn identical_snapshots_never_fire(snap in snapshot()) {
        let filter = RelevanceFilter::default();
        let set: VisibleSet = snap.iter().cloned().collect();
        prop_assert!(!set.relevant_added(&set.clone(), &filter));
    }

    #[test]
    fn rearrangement_never_fires(snap in snapshot()) {
        let filter = RelevanceFilter::default();
        let prev: VisibleSet = snap.iter().cloned().collect();
        let mut shuffled = snap.clone();
        shuffled.reverse();
        let cur: VisibleSet = shuffled.into_iter().collect();
        prop_assert!(!prev.relevant_added(&cur, &filter));
    }

    #[test]
    fn removals_never_fire(
        (snap, mask) in snapshot().prop_flat_map(|snap| {
            let len = snap.len();
            (Just(snap), prop::collection::vec(any::<bool>(), len))
        }),
    ) {
        let filter = RelevanceFilter::default();
        let prev: VisibleSet = snap.iter().cloned().collect();
        let cur: VisibleSet = snap
            .iter()
            .zip(&mask)
            .filter(|&(_, &keep)| keep)
            .map(|(res, _)| res.clone())
            .collect();
        prop_assert!(!prev.relevant_added(&cur, &filter));
    }

    #[test]
    fn internal_only_additions_never_fire(
        snap in snapshot(),
        channels in prop::collection::vec(prop::sample::select(vec!["tasks", "git", "lsp"]), 1..4),
    ) {
        let filter = RelevanceFilter::default();
        let prev: VisibleSet = snap.iter().cloned().collect();
        let cur: VisibleSet = snap
            .iter()
            .cloned()
            .chain(channels.into_iter().map(ResourceId::output))
            .collect();
        prop_assert!(!prev.relevant_added(&cur, &filter));
    }

    #[test]
    fn adding_one_relevant_resource_always_fires(snap in snapshot()) {
        let filter = RelevanceFilter::default();
        let prev: VisibleSet = snap.iter().cloned().collect();
        // One more occurrence of a file, whether or not it was visible.
        let cur: VisibleSet = snap
            .iter()
            .cloned()
            .chain(std::iter::once(ResourceId::file("/a.rs")))
            .collect();
        prop_assert!(prev.relevant_added(&cur, &filter));
    }
}
