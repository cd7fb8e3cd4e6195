#![forbid(unsafe_code)]

//! Host event vocabulary.
//!
//! The host pushes [`HostEvent`]s into the runtime, one at a time, each
//! carrying a *full snapshot* of the current state rather than a delta. The
//! runtime diffs snapshots itself; events therefore never need to be paired
//! or replayed to be interpreted.
//!
//! Two of the variants are deliberately redundant: a same-file refocus can
//! surface as a visible-ranges change without the visible-editor set
//! changing, and the reverse happens on some hosts. Both paths feed the same
//! panel-state heuristic downstream, which is the system's substitute for
//! retrying missed signals.

use crate::resource::ResourceId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open span of lines visible in an editor, by line number.
///
/// A range whose start and end coincide is *collapsed*: the editor shows a
/// single line, typically because the panel has squeezed it to a sliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRange {
    /// First visible line.
    pub start: u32,
    /// Last visible line.
    pub end: u32,
}

impl LineRange {
    /// Create a range from start and end lines.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// True iff the range spans a single line.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Snapshot of one visible editor: what it shows and how much of it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditorView {
    /// The resource the editor displays.
    pub resource: ResourceId,
    /// The editor's visible line spans. An empty list counts as collapsed
    /// for the panel heuristic (vacuous quantifier).
    pub visible_ranges: Vec<LineRange>,
}

impl EditorView {
    /// Create an editor view.
    pub fn new(resource: ResourceId, visible_ranges: Vec<LineRange>) -> Self {
        Self {
            resource,
            visible_ranges,
        }
    }

    /// True iff every visible range is collapsed to a single line.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.visible_ranges.iter().all(LineRange::is_collapsed)
    }
}

/// An event delivered by the host, carrying a full snapshot of current state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HostEvent {
    /// The set of visible text editors changed.
    VisibleEditorsChanged {
        /// All currently visible editors.
        editors: Vec<EditorView>,
    },
    /// The set of visible notebook editors changed.
    VisibleNotebooksChanged {
        /// All currently visible notebook resources.
        notebooks: Vec<ResourceId>,
    },
    /// Some editor's visible line ranges changed without the editor set
    /// necessarily changing.
    VisibleRangesChanged {
        /// All currently visible editors with their updated ranges.
        editors: Vec<EditorView>,
    },
}
