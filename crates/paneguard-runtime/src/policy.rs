#![forbid(unsafe_code)]

//! Auto-close decision policy.
//!
//! Two states, `Idle` and `Toggling`, with the toggle gate as the state bit.
//! A user-initiated close always proceeds. An auto close proceeds only while
//! auto-closing is enabled and the debounce window since the last explicit
//! open has elapsed; otherwise it is a silent no-op. While a toggle is in
//! flight every further request of either kind is dropped.
//!
//! The wrapped-execute path runs an arbitrary named host command with
//! auto-closing forced to the request's value for the duration, restoring
//! the prior flag whatever the outcome. A failing wrapped invocation is an
//! expected possibility (e.g. an unregistered command): it is swallowed and
//! traced, and must never leave auto-closing stuck disabled.

use std::fmt;
use std::sync::Arc;

use paneguard_core::{HostCommand, HostConnection, HostError};
use web_time::{Duration, Instant};

use crate::actuator::{PanelActuator, ToggleOutcome};

/// Which signal asked for the close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The user invoked the close command.
    UserCommand,
    /// A relevant resource became visible in a text editor.
    EditorVisibility,
    /// A relevant resource became visible in a notebook editor.
    NotebookVisibility,
    /// The UI left panel-filled state.
    PanelGeometry,
}

impl CloseTrigger {
    /// True only for an explicit user request; everything else is an auto
    /// close subject to the policy's veto.
    #[must_use]
    pub fn user_initiated(self) -> bool {
        matches!(self, Self::UserCommand)
    }

    /// Stable label for tracing and diagnostics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UserCommand => "user-command",
            Self::EditorVisibility => "editor-visibility",
            Self::NotebookVisibility => "notebook-visibility",
            Self::PanelGeometry => "panel-geometry",
        }
    }
}

impl fmt::Display for CloseTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The close command was issued.
    Closed,
    /// The policy vetoed the auto close (disabled, or inside the debounce
    /// window).
    Suppressed,
    /// Another toggle was in flight.
    Dropped,
}

/// A pass-through invocation of a named host command, with auto-closing
/// forced to `auto_close` for its duration.
#[derive(Debug, Clone)]
pub struct ExecuteRequest {
    /// Host-side command identifier.
    pub command: String,
    /// Arguments forwarded untouched.
    pub args: serde_json::Value,
    /// Auto-closing state while the command runs. Defaults to false, so a
    /// wrapped command's UI churn cannot close the panel out from under it.
    pub auto_close: bool,
}

impl ExecuteRequest {
    /// A request with null args and auto-closing suppressed.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: serde_json::Value::Null,
            auto_close: false,
        }
    }

    /// Attach arguments.
    #[must_use]
    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = args;
        self
    }

    /// Keep auto-closing live while the command runs.
    #[must_use]
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }
}

/// The decision unit: debounce, suppression flag, and the actuator.
pub struct AutoClosePolicy {
    auto_close_enabled: bool,
    last_open: Option<Instant>,
    debounce: Duration,
    actuator: PanelActuator,
    host: Arc<dyn HostConnection>,
}

impl AutoClosePolicy {
    /// Create a policy over a host connection.
    pub fn new(host: Arc<dyn HostConnection>, debounce: Duration, auto_close_enabled: bool) -> Self {
        Self {
            auto_close_enabled,
            last_open: None,
            debounce,
            actuator: PanelActuator::new(Arc::clone(&host)),
            host,
        }
    }

    /// The underlying actuator.
    #[must_use]
    pub fn actuator(&self) -> &PanelActuator {
        &self.actuator
    }

    /// True while an open or close is in flight.
    #[must_use]
    pub fn is_toggling(&self) -> bool {
        self.actuator.is_toggling()
    }

    /// Current auto-closing flag.
    #[must_use]
    pub fn auto_close_enabled(&self) -> bool {
        self.auto_close_enabled
    }

    /// Enable or disable auto-closing.
    pub fn set_auto_close(&mut self, enabled: bool) {
        tracing::debug!(target: "paneguard.policy", enabled, "auto-close flag set");
        self.auto_close_enabled = enabled;
    }

    /// True iff an auto close would currently proceed: auto-closing enabled
    /// and the user did not just open the panel.
    #[must_use]
    pub fn can_auto_close(&self) -> bool {
        self.auto_close_enabled
            && self
                .last_open
                .is_none_or(|opened| opened.elapsed() >= self.debounce)
    }

    /// Open/maximize the panel. Records the open time before the toggle
    /// completes so immediately-following auto closes are debounced. A
    /// request while a toggle is in flight is dropped without touching the
    /// timestamp.
    pub fn open_panel(&mut self) -> Result<ToggleOutcome, HostError> {
        if self.actuator.is_toggling() {
            return Ok(ToggleOutcome::Dropped);
        }
        self.last_open = Some(Instant::now());
        tracing::debug!(target: "paneguard.policy", "opening panel");
        self.actuator.open()
    }

    /// Request a panel close from the given signal.
    pub fn close_panel(&mut self, trigger: CloseTrigger) -> Result<CloseOutcome, HostError> {
        if self.actuator.is_toggling() {
            return Ok(CloseOutcome::Dropped);
        }
        if !trigger.user_initiated() && !self.can_auto_close() {
            tracing::trace!(target: "paneguard.policy", trigger = %trigger, "auto close suppressed");
            return Ok(CloseOutcome::Suppressed);
        }
        match self.actuator.close()? {
            ToggleOutcome::Completed => {
                tracing::debug!(target: "paneguard.policy", trigger = %trigger, "panel closed");
                Ok(CloseOutcome::Closed)
            }
            ToggleOutcome::Dropped => Ok(CloseOutcome::Dropped),
        }
    }

    /// Run a pass-through command with auto-closing forced to the request's
    /// value, restoring the prior flag whatever the outcome. Inner failures
    /// are swallowed.
    pub fn execute(&mut self, request: &ExecuteRequest) {
        let saved = self.auto_close_enabled;
        self.auto_close_enabled = request.auto_close;

        let result = self.host.invoke(&HostCommand::Invoke {
            command: request.command.clone(),
            args: request.args.clone(),
        });

        self.auto_close_enabled = saved;
        if let Err(err) = result {
            tracing::debug!(
                target: "paneguard.policy",
                command = %request.command,
                error = %err,
                "wrapped invocation failed"
            );
        }
    }
}
