#![forbid(unsafe_code)]

//! Panel toggle serialization.
//!
//! At most one panel open/close is ever in flight. The [`ToggleGate`] is the
//! sole concurrency-control primitive in the system: a plain mutual-exclusion
//! flag, not a queue - a second toggle attempt while one is in flight is
//! dropped, never queued or retried.
//!
//! The flag is released through an RAII [`ToggleGuard`], so it returns to
//! false on every exit path, including a failing host command. There is no
//! timeout on an in-flight command; a hanging host wedges the gate until the
//! command settles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use paneguard_core::{HostCommand, HostConnection, HostError};

/// Outcome of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The host command was issued.
    Completed,
    /// Another toggle was in flight; the request was dropped.
    Dropped,
}

/// The Toggling-In-Progress flag, shareable across holders.
#[derive(Debug, Clone, Default)]
pub struct ToggleGate {
    in_flight: Arc<AtomicBool>,
}

impl ToggleGate {
    /// A released gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the gate, or `None` if a toggle is already in flight.
    /// The returned guard releases on drop.
    #[must_use]
    pub fn try_acquire(&self) -> Option<ToggleGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ToggleGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// True while a toggle is in flight.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the gate when dropped.
#[derive(Debug)]
pub struct ToggleGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for ToggleGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Serializes panel open/close commands against the host.
pub struct PanelActuator {
    gate: ToggleGate,
    host: Arc<dyn HostConnection>,
}

impl PanelActuator {
    /// Create an actuator over a host connection.
    pub fn new(host: Arc<dyn HostConnection>) -> Self {
        Self {
            gate: ToggleGate::new(),
            host,
        }
    }

    /// A handle to the gate, for holders that need to observe or pin it.
    #[must_use]
    pub fn gate(&self) -> ToggleGate {
        self.gate.clone()
    }

    /// True while an open or close is in flight.
    #[must_use]
    pub fn is_toggling(&self) -> bool {
        self.gate.is_held()
    }

    /// Open/maximize the panel. Issues exactly one host command, or drops
    /// the request if a toggle is already in flight.
    pub fn open(&self) -> Result<ToggleOutcome, HostError> {
        let Some(_guard) = self.gate.try_acquire() else {
            tracing::trace!(target: "paneguard.actuator", "open dropped, toggle in flight");
            return Ok(ToggleOutcome::Dropped);
        };
        self.host.invoke(&HostCommand::ToggleMaximizedPanel)?;
        Ok(ToggleOutcome::Completed)
    }

    /// Close the panel. Nudges the panel split down one step first so a
    /// later full-panel re-open does not present single-line ranges to the
    /// panel-state heuristic, then issues exactly one close command.
    ///
    /// The nudge is best-effort; its failure does not abort the close. A
    /// failing close surfaces to the caller with the gate released.
    pub fn close(&self) -> Result<ToggleOutcome, HostError> {
        let Some(_guard) = self.gate.try_acquire() else {
            tracing::trace!(target: "paneguard.actuator", "close dropped, toggle in flight");
            return Ok(ToggleOutcome::Dropped);
        };
        if let Err(err) = self.host.invoke(&HostCommand::ResizePanelDown) {
            tracing::debug!(target: "paneguard.actuator", error = %err, "resize nudge failed");
        }
        self.host.invoke(&HostCommand::ClosePanel)?;
        Ok(ToggleOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::ScriptedHost;

    #[test]
    fn gate_starts_released() {
        let gate = ToggleGate::new();
        assert!(!gate.is_held());
    }

    #[test]
    fn second_acquire_is_refused_while_held() {
        let gate = ToggleGate::new();
        let guard = gate.try_acquire();
        assert!(guard.is_some());
        assert!(gate.try_acquire().is_none());
    }

    #[test]
    fn drop_releases_gate() {
        let gate = ToggleGate::new();
        drop(gate.try_acquire());
        assert!(!gate.is_held());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn open_issues_one_toggle_command() {
        let host = ScriptedHost::shared();
        let actuator = PanelActuator::new(host.clone());

        assert_eq!(actuator.open().unwrap(), ToggleOutcome::Completed);
        assert_eq!(host.count("toggle-maximized-panel"), 1);
        assert!(!actuator.is_toggling());
    }

    #[test]
    fn close_nudges_before_closing() {
        let host = ScriptedHost::shared();
        let actuator = PanelActuator::new(host.clone());

        assert_eq!(actuator.close().unwrap(), ToggleOutcome::Completed);
        let labels: Vec<_> = host.commands().iter().map(|c| c.label().to_owned()).collect();
        assert_eq!(labels, ["resize-panel-down", "close-panel"]);
    }

    #[test]
    fn request_while_gate_held_is_dropped() {
        let host = ScriptedHost::shared();
        let actuator = PanelActuator::new(host.clone());
        let _pin = actuator.gate().try_acquire().unwrap();

        assert_eq!(actuator.close().unwrap(), ToggleOutcome::Dropped);
        assert_eq!(actuator.open().unwrap(), ToggleOutcome::Dropped);
        assert!(host.commands().is_empty());
    }

    #[test]
    fn failed_close_releases_gate() {
        let host = ScriptedHost::shared();
        host.fail_label("close-panel");
        let actuator = PanelActuator::new(host.clone());

        assert!(actuator.close().is_err());
        assert!(!actuator.is_toggling());

        host.allow_all();
        assert_eq!(actuator.close().unwrap(), ToggleOutcome::Completed);
    }

    #[test]
    fn nudge_failure_does_not_abort_close() {
        let host = ScriptedHost::shared();
        host.fail_label("resize-panel-down");
        let actuator = PanelActuator::new(host.clone());

        assert_eq!(actuator.close().unwrap(), ToggleOutcome::Completed);
        assert_eq!(host.count("close-panel"), 1);
    }
}
