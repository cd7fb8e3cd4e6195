#![forbid(unsafe_code)]

//! Panel-occupies-viewport heuristic.
//!
//! When the secondary panel is maximized, every visible content editor is
//! squeezed to a sliver and reports visible ranges that collapse to a single
//! line. [`PanelStateTracker`] derives an "in-panel" flag from that and
//! reports the *falling edge* - the moment the UI leaves panel-filled state -
//! as a close signal.
//!
//! Internal resources (the output channel, diagnostics views) are excluded
//! from the computation: an output editor shown inside the maximized panel
//! has fully expanded ranges, and counting it would fake a panel exit every
//! time its tab gains focus.
//!
//! Edge-triggered, not level-triggered: two consecutive updates with the
//! same not-in-panel input both return false.

use paneguard_core::{EditorView, RelevanceFilter};

/// Tracks whether the panel currently occupies the full viewport.
#[derive(Debug)]
pub struct PanelStateTracker {
    filter: RelevanceFilter,
    in_panel: bool,
}

impl PanelStateTracker {
    /// Create a tracker; the initial state is derived from the editors
    /// visible at construction.
    pub fn new(filter: RelevanceFilter, initial_editors: &[EditorView]) -> Self {
        let mut tracker = Self {
            filter,
            in_panel: false,
        };
        tracker.in_panel = tracker.panel_fills_viewport(initial_editors);
        tracker
    }

    /// True iff the last observed snapshot was panel-filled.
    #[must_use]
    pub fn is_in_panel(&self) -> bool {
        self.in_panel
    }

    /// Observe a snapshot. Returns true iff the stored flag was set and the
    /// new snapshot is not panel-filled (a falling edge). Always overwrites
    /// the stored flag afterward, regardless of the returned value.
    pub fn update(&mut self, editors: &[EditorView]) -> bool {
        let now_in_panel = self.panel_fills_viewport(editors);
        let left_panel = self.in_panel && !now_in_panel;
        self.in_panel = now_in_panel;
        left_panel
    }

    /// Non-empty relevant editors, every one collapsed to a single line.
    fn panel_fills_viewport(&self, editors: &[EditorView]) -> bool {
        let mut any_relevant = false;
        for editor in editors {
            if !self.filter.is_relevant(&editor.resource) {
                continue;
            }
            any_relevant = true;
            if !editor.is_collapsed() {
                return false;
            }
        }
        any_relevant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneguard_core::{LineRange, ResourceId};

    fn collapsed(path: &str) -> EditorView {
        EditorView::new(ResourceId::file(path), vec![LineRange::new(12, 12)])
    }

    fn expanded(path: &str) -> EditorView {
        EditorView::new(ResourceId::file(path), vec![LineRange::new(0, 40)])
    }

    fn tracker(initial: &[EditorView]) -> PanelStateTracker {
        PanelStateTracker::new(RelevanceFilter::default(), initial)
    }

    #[test]
    fn initial_state_from_construction_snapshot() {
        assert!(tracker(&[collapsed("/a.rs")]).is_in_panel());
        assert!(!tracker(&[expanded("/a.rs")]).is_in_panel());
        assert!(!tracker(&[]).is_in_panel());
    }

    #[test]
    fn falling_edge_fires_once() {
        let mut tracker = tracker(&[collapsed("/a.rs")]);

        assert!(tracker.update(&[expanded("/a.rs")]));
        // Same not-in-panel input again: no second fire.
        assert!(!tracker.update(&[expanded("/a.rs")]));
    }

    #[test]
    fn rising_edge_never_fires() {
        let mut tracker = tracker(&[expanded("/a.rs")]);
        assert!(!tracker.update(&[collapsed("/a.rs")]));
        assert!(tracker.is_in_panel());
    }

    #[test]
    fn empty_list_is_not_in_panel() {
        let mut tracker = tracker(&[collapsed("/a.rs")]);
        assert!(tracker.update(&[]));
        assert!(!tracker.is_in_panel());
    }

    #[test]
    fn one_expanded_editor_breaks_panel_state() {
        let mut tracker = tracker(&[collapsed("/a.rs"), collapsed("/b.rs")]);
        assert!(tracker.update(&[collapsed("/a.rs"), expanded("/b.rs")]));
    }

    #[test]
    fn expanded_output_editor_does_not_break_panel_state() {
        let mut tracker = tracker(&[collapsed("/a.rs")]);

        // The output tab gains focus inside the maximized panel: its editor
        // shows real ranges but must not count as leaving panel state.
        let output = EditorView::new(ResourceId::output("tasks"), vec![LineRange::new(0, 80)]);
        assert!(!tracker.update(&[collapsed("/a.rs"), output]));
        assert!(tracker.is_in_panel());
    }

    #[test]
    fn output_only_snapshot_is_not_in_panel() {
        let output = EditorView::new(ResourceId::output("tasks"), vec![LineRange::new(0, 0)]);
        assert!(!tracker(&[output]).is_in_panel());
    }

    #[test]
    fn editor_with_no_ranges_counts_as_collapsed() {
        let bare = EditorView::new(ResourceId::file("/a.rs"), vec![]);
        let mut tracker = tracker(&[bare.clone()]);
        assert!(tracker.is_in_panel());
        assert!(!tracker.update(&[bare]));
    }

    #[test]
    fn update_always_stores_new_state() {
        let mut tracker = tracker(&[]);
        tracker.update(&[collapsed("/a.rs")]);
        assert!(tracker.is_in_panel());
        tracker.update(&[expanded("/a.rs")]);
        assert!(!tracker.is_in_panel());
    }
}
