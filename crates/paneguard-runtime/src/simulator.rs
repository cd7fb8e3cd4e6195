#![forbid(unsafe_code)]

//! Scripted host for tests.
//!
//! [`ScriptedHost`] is a [`HostConnection`] that records every command it is
//! asked to run and can be told to fail specific command labels, so tests
//! can drive the error paths without a real host. The snapshot builders keep
//! scenario tests readable.
//!
//! Recording is attempt-based: a command told to fail is still recorded, so
//! tests can assert both what was attempted and what succeeded.

use std::sync::{Arc, Mutex};

use ahash::AHashSet;
use paneguard_core::{EditorView, HostCommand, HostConnection, HostError, LineRange, ResourceId};

/// A recording host connection with per-label failure injection.
#[derive(Default)]
pub struct ScriptedHost {
    state: Mutex<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    commands: Vec<HostCommand>,
    failing: AHashSet<String>,
}

impl ScriptedHost {
    /// A fresh host with nothing recorded and nothing failing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh host behind an `Arc`, ready to hand to the runtime.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make every command with this label fail until [`allow_all`].
    ///
    /// [`allow_all`]: Self::allow_all
    pub fn fail_label(&self, label: &str) {
        self.lock().failing.insert(label.to_owned());
    }

    /// Clear all failure rules.
    pub fn allow_all(&self) {
        self.lock().failing.clear();
    }

    /// Every command attempted so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<HostCommand> {
        self.lock().commands.clone()
    }

    /// How many attempted commands carry this label.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.lock()
            .commands
            .iter()
            .filter(|cmd| cmd.label() == label)
            .count()
    }

    /// Forget everything recorded so far (failure rules are kept).
    pub fn clear(&self) {
        self.lock().commands.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HostConnection for ScriptedHost {
    fn invoke(&self, command: &HostCommand) -> Result<(), HostError> {
        let mut state = self.lock();
        state.commands.push(command.clone());
        if state.failing.contains(command.label()) {
            return Err(HostError::CommandFailed {
                command: command.label().to_owned(),
                reason: "scripted failure".to_owned(),
            });
        }
        Ok(())
    }
}

/// An editor squeezed to a single visible line, as under a maximized panel.
#[must_use]
pub fn collapsed_editor(path: &str) -> EditorView {
    EditorView::new(ResourceId::file(path), vec![LineRange::new(0, 0)])
}

/// An editor with a real visible span.
#[must_use]
pub fn expanded_editor(path: &str) -> EditorView {
    EditorView::new(ResourceId::file(path), vec![LineRange::new(0, 40)])
}
