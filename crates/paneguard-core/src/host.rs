#![forbid(unsafe_code)]

//! Host command surface.
//!
//! The runtime drives the host through exactly one seam: a
//! [`HostConnection`] that executes [`HostCommand`]s. Implementations wrap
//! whatever imperative API the host exposes (workbench commands, RPC, a test
//! recorder). Commands are fire-and-settle; there is no cancellation and the
//! runtime never retries.

use std::fmt;

use crate::resource::ResourceId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An imperative command the runtime may issue against the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HostCommand {
    /// Open/maximize the secondary panel.
    ToggleMaximizedPanel,
    /// Close the secondary panel.
    ClosePanel,
    /// Shrink the panel's split by one step. Issued before a close so a
    /// subsequent full-panel re-open does not immediately present
    /// single-line visible ranges to the panel-state heuristic.
    ResizePanelDown,
    /// Show a notification. Diagnostic use only.
    ShowInformationMessage(String),
    /// Invoke an arbitrary named host command with structured arguments.
    Invoke {
        /// Host-side command identifier.
        command: String,
        /// Pass-through arguments.
        args: serde_json::Value,
    },
}

impl HostCommand {
    /// Short label for tracing and diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::ToggleMaximizedPanel => "toggle-maximized-panel",
            Self::ClosePanel => "close-panel",
            Self::ResizePanelDown => "resize-panel-down",
            Self::ShowInformationMessage(_) => "show-information-message",
            Self::Invoke { .. } => "invoke",
        }
    }
}

/// Errors surfaced by a [`HostConnection`].
#[derive(Debug)]
pub enum HostError {
    /// The host reported the command failed.
    CommandFailed {
        /// Which command failed.
        command: String,
        /// Host-provided reason.
        reason: String,
    },
    /// The connection to the host is gone.
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandFailed { command, reason } => {
                write!(f, "host command {command} failed: {reason}")
            }
            Self::Unavailable(reason) => write!(f, "host unavailable: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// The imperative seam to the host.
///
/// Implementations must be cheap to call from the event thread; the runtime
/// holds no timeout over an in-flight command, so a hanging implementation
/// wedges the toggle gate until it settles.
pub trait HostConnection: Send + Sync {
    /// Execute one command against the host.
    fn invoke(&self, command: &HostCommand) -> Result<(), HostError>;
}

/// Convenience constructor for the diagnostics notification.
#[must_use]
pub fn close_diagnostic_message(trigger_label: &str, resource: Option<&ResourceId>) -> HostCommand {
    let text = match resource {
        Some(res) => format!("panel closed on {trigger_label} ({res})"),
        None => format!("panel closed on {trigger_label}"),
    };
    HostCommand::ShowInformationMessage(text)
}
