#![forbid(unsafe_code)]

//! Visibility tracking over occurrence-count multisets.
//!
//! The same resource can be visible in more than one split at once, so a
//! plain set of identifiers cannot tell "opened a second split of a file"
//! apart from "rearranged the splits I already had". [`VisibleSet`] keeps an
//! occurrence count per resource; the diff fires only when some *relevant*
//! resource's count strictly increases between consecutive snapshots.
//!
//! # Invariants
//!
//! - Stored counts are always ≥ 1; removing the last occurrence removes the
//!   key.
//! - Pure removals and internal-resource-only changes never produce a
//!   positive diff.
//! - Rearranging already-visible editors across splits without changing
//!   total counts does not fire.

use ahash::AHashMap;
use paneguard_core::{EditorView, RelevanceFilter, ResourceId};

/// Multiset of currently visible resources, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    counts: AHashMap<ResourceId, u32>,
}

impl VisibleSet {
    /// The empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from editor snapshots, counting duplicates.
    pub fn from_editors(editors: &[EditorView]) -> Self {
        editors.iter().map(|editor| editor.resource.clone()).collect()
    }

    /// Occurrence count for a resource; 0 if absent.
    #[must_use]
    pub fn count(&self, resource: &ResourceId) -> u32 {
        self.counts.get(resource).copied().unwrap_or(0)
    }

    /// Number of distinct visible resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True iff nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pure diff: true iff some resource's occurrence count strictly
    /// increased from `self` (the previous snapshot) to `current` AND that
    /// resource is relevant under `filter`.
    ///
    /// This is side-effect free; the caller decides whether to retain
    /// `current` as the next baseline (see [`VisibilityTracker::observe`]).
    #[must_use]
    pub fn relevant_added(&self, current: &VisibleSet, filter: &RelevanceFilter) -> bool {
        current
            .counts
            .iter()
            .any(|(resource, &count)| count > self.count(resource) && filter.is_relevant(resource))
    }
}

impl FromIterator<ResourceId> for VisibleSet {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        let mut counts = AHashMap::new();
        for resource in iter {
            *counts.entry(resource).or_insert(0) += 1;
        }
        Self { counts }
    }
}

/// Stateful wrapper: retains the previous snapshot and replaces it on every
/// observation.
#[derive(Debug)]
pub struct VisibilityTracker {
    previous: VisibleSet,
    filter: RelevanceFilter,
}

impl VisibilityTracker {
    /// Create a tracker seeded with whatever is visible at construction.
    pub fn new(filter: RelevanceFilter, initial: VisibleSet) -> Self {
        Self {
            previous: initial,
            filter,
        }
    }

    /// Diff the new snapshot against the stored one, then retain it as the
    /// next baseline. Returns true iff a relevant resource became visible.
    pub fn observe(&mut self, current: VisibleSet) -> bool {
        let added = self.previous.relevant_added(&current, &self.filter);
        self.previous = current;
        added
    }

    /// The snapshot the next observation will diff against.
    #[must_use]
    pub fn previous(&self) -> &VisibleSet {
        &self.previous
    }
}
