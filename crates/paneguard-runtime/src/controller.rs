#![forbid(unsafe_code)]

//! Top-level wiring: events in, at most one toggle out.
//!
//! [`PanelController`] is an explicitly constructed, owned instance - there
//! is no module-level singleton. It owns one visibility tracker for text
//! editors, a parallel one for notebooks, the panel-state tracker, and the
//! policy, and routes each host snapshot through them:
//!
//! - visible-editor set changes drive the editor visibility diff *and* the
//!   panel-state heuristic
//! - visible-notebook set changes drive the notebook visibility diff
//! - visible-range changes drive the panel-state heuristic again, covering
//!   same-file refocus cases the set-change event misses
//!
//! The redundant signal paths are the system's substitute for retries: if
//! the host drops one event, the other usually still observes the same
//! transition.

use std::sync::Arc;

use paneguard_core::host::close_diagnostic_message;
use paneguard_core::{EditorView, HostConnection, HostError, HostEvent, ResourceId};

use crate::actuator::ToggleOutcome;
use crate::config::PanelPolicyConfig;
use crate::panel_state::PanelStateTracker;
use crate::policy::{AutoClosePolicy, CloseOutcome, CloseTrigger, ExecuteRequest};
use crate::subscriptions::EventQueue;
use crate::visibility::{VisibilityTracker, VisibleSet};

/// Owns the trackers and the policy; the embedder feeds it host snapshots
/// and delegates its command surface to it.
pub struct PanelController {
    editors: VisibilityTracker,
    notebooks: VisibilityTracker,
    panel_state: PanelStateTracker,
    policy: AutoClosePolicy,
    host: Arc<dyn HostConnection>,
    diagnostics: bool,
}

impl PanelController {
    /// Build a controller from a host connection, a policy configuration,
    /// and the editors/notebooks visible at startup.
    pub fn new(
        host: Arc<dyn HostConnection>,
        config: &PanelPolicyConfig,
        initial_editors: &[EditorView],
        initial_notebooks: &[ResourceId],
    ) -> Self {
        let filter = config.relevance_filter();
        Self {
            editors: VisibilityTracker::new(filter.clone(), VisibleSet::from_editors(initial_editors)),
            notebooks: VisibilityTracker::new(
                filter.clone(),
                initial_notebooks.iter().cloned().collect(),
            ),
            panel_state: PanelStateTracker::new(filter, initial_editors),
            policy: AutoClosePolicy::new(
                Arc::clone(&host),
                config.debounce(),
                config.auto_close_enabled,
            ),
            host,
            diagnostics: config.diagnostics,
        }
    }

    /// Route one host snapshot through the trackers and the policy.
    pub fn handle_event(&mut self, event: &HostEvent) {
        match event {
            HostEvent::VisibleEditorsChanged { editors } => {
                let mut closed = false;
                if self.editors.observe(VisibleSet::from_editors(editors)) {
                    closed = self.request_close(CloseTrigger::EditorVisibility);
                }
                // The tracker must observe the snapshot even when the close
                // already happened; only the second close is elided.
                if self.panel_state.update(editors) && !closed {
                    self.request_close(CloseTrigger::PanelGeometry);
                }
            }
            HostEvent::VisibleNotebooksChanged { notebooks } => {
                if self.notebooks.observe(notebooks.iter().cloned().collect()) {
                    self.request_close(CloseTrigger::NotebookVisibility);
                }
            }
            HostEvent::VisibleRangesChanged { editors } => {
                if self.panel_state.update(editors) {
                    self.request_close(CloseTrigger::PanelGeometry);
                }
            }
        }
    }

    /// Drain a queue and handle each snapshot in arrival order. Returns how
    /// many were processed.
    pub fn process(&mut self, queue: &EventQueue) -> usize {
        let events = queue.drain();
        let count = events.len();
        for event in &events {
            self.handle_event(event);
        }
        count
    }

    /// Open/maximize the panel (host-facing command).
    pub fn open_panel(&mut self) -> Result<ToggleOutcome, HostError> {
        self.policy.open_panel()
    }

    /// User-initiated close (host-facing command). Always attempts, subject
    /// to the toggle gate; the command failure, if any, surfaces here.
    pub fn close_panel(&mut self) -> Result<CloseOutcome, HostError> {
        let outcome = self.policy.close_panel(CloseTrigger::UserCommand)?;
        if outcome == CloseOutcome::Closed {
            self.notify_close(CloseTrigger::UserCommand);
        }
        Ok(outcome)
    }

    /// Pass-through invocation with auto-closing forced to the request's
    /// value for the duration.
    pub fn execute(&mut self, request: &ExecuteRequest) {
        self.policy.execute(request);
    }

    /// Enable or disable auto-closing (host-facing command pair).
    pub fn set_auto_close(&mut self, enabled: bool) {
        self.policy.set_auto_close(enabled);
    }

    /// The policy, for observation.
    #[must_use]
    pub fn policy(&self) -> &AutoClosePolicy {
        &self.policy
    }

    /// Whether the last observed snapshot was panel-filled.
    #[must_use]
    pub fn is_in_panel(&self) -> bool {
        self.panel_state.is_in_panel()
    }

    fn request_close(&mut self, trigger: CloseTrigger) -> bool {
        match self.policy.close_panel(trigger) {
            Ok(CloseOutcome::Closed) => {
                self.notify_close(trigger);
                true
            }
            Ok(_) => false,
            Err(err) => {
                // Auto closes have no caller to surface to; the failure is
                // local and the gate is already released.
                tracing::warn!(
                    target: "paneguard.controller",
                    trigger = %trigger,
                    error = %err,
                    "close command failed"
                );
                false
            }
        }
    }

    fn notify_close(&self, trigger: CloseTrigger) {
        if !self.diagnostics {
            return;
        }
        if let Err(err) = self
            .host
            .invoke(&close_diagnostic_message(trigger.label(), None))
        {
            tracing::debug!(
                target: "paneguard.controller",
                error = %err,
                "diagnostic notification failed"
            );
        }
    }
}
