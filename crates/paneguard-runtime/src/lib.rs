#![forbid(unsafe_code)]

//! paneguard runtime
//!
//! Watches which resources are visible in an editor-like host and decides
//! when to automatically close the secondary panel (terminal/output dock).
//! The hard part is disambiguation: genuine navigation must close the panel,
//! while incidental UI churn (internal output tabs, partial reveals,
//! panel-resize side effects) must not.
//!
//! # Key Components
//!
//! - [`VisibilityTracker`] - occurrence-count diff over visible resources
//! - [`PanelStateTracker`] - single-line-range heuristic, falling-edge close
//!   signal
//! - [`AutoClosePolicy`] - debounce, suppression flag, and the
//!   wrapped-execute escape hatch
//! - [`PanelActuator`] / [`ToggleGate`] - at most one panel toggle in flight
//! - [`PanelController`] - owns the above and routes host snapshots
//! - [`PanelPolicyConfig`] - policy-as-data tunables (TOML/JSON behind the
//!   `policy-config` feature)
//! - [`ScriptedHost`] - recording host double for tests
//!
//! # How it fits together
//! The host pushes [`HostEvent`](paneguard_core::HostEvent) snapshots into
//! the controller (directly or through an [`EventQueue`]); the trackers turn
//! snapshots into boolean signals; the policy consults its flags and timer;
//! the actuator issues at most one host command at a time through the
//! embedder's [`HostConnection`](paneguard_core::HostConnection).

pub mod actuator;
pub mod config;
pub mod controller;
pub mod panel_state;
pub mod policy;
pub mod simulator;
pub mod subscriptions;
pub mod visibility;

pub use actuator::{PanelActuator, ToggleGate, ToggleGuard, ToggleOutcome};
pub use config::{DIAGNOSTICS_ENV, PanelConfigError, PanelPolicyConfig, diagnostics_env_enabled};
pub use controller::PanelController;
pub use panel_state::PanelStateTracker;
pub use policy::{AutoClosePolicy, CloseOutcome, CloseTrigger, ExecuteRequest};
pub use simulator::ScriptedHost;
pub use subscriptions::{Disposable, EventQueue, EventSender, SubscriptionSet};
pub use visibility::{VisibilityTracker, VisibleSet};
