#![forbid(unsafe_code)]

//! Policy-as-data configuration.
//!
//! Captures the tunable parameters of the auto-close stack as a single
//! [`PanelPolicyConfig`] that can be loaded from TOML or JSON at startup,
//! removing the need for compile-time constant changes.
//!
//! # Loading
//!
//! ```toml
//! # paneguard.toml
//! debounce_ms = 400
//! relevant_schemes = ["file", "untitled"]
//! ```
//!
//! ```rust,ignore
//! let config = PanelPolicyConfig::from_toml_file("paneguard.toml")?;
//! let config = PanelPolicyConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the reference behavior, so
//! `PanelPolicyConfig::default()` reproduces the hardwired constants of the
//! policy exactly.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use paneguard_core::RelevanceFilter;
use paneguard_core::resource::{SCHEME_FILE, SCHEME_NOTEBOOK_CELL, SCHEME_UNTITLED};
use web_time::Duration;

/// Debounce window after an explicit open during which auto closes are
/// vetoed, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Environment flag enabling diagnostic close notifications. Truthy values:
/// `1`, `true` (case-insensitive). Test-suite interface, not production.
pub const DIAGNOSTICS_ENV: &str = "PANEGUARD_DIAGNOSTICS";

/// Tunable parameters of the auto-close policy.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct PanelPolicyConfig {
    /// Minimum elapsed time since the last explicit open before an auto
    /// close may proceed. Default: 150.
    pub debounce_ms: u64,
    /// Whether auto-closing starts enabled. Default: true.
    pub auto_close_enabled: bool,
    /// Resource schemes that count as user content. Default: `file`,
    /// `notebook-cell`, `untitled`.
    pub relevant_schemes: Vec<String>,
    /// Emit a host notification naming the signal behind each close.
    /// Default: false.
    pub diagnostics: bool,
}

impl Default for PanelPolicyConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_close_enabled: true,
            relevant_schemes: vec![
                SCHEME_FILE.to_owned(),
                SCHEME_NOTEBOOK_CELL.to_owned(),
                SCHEME_UNTITLED.to_owned(),
            ],
            diagnostics: false,
        }
    }
}

impl PanelPolicyConfig {
    /// The debounce window as a duration.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Build the relevance predicate from the configured scheme list.
    #[must_use]
    pub fn relevance_filter(&self) -> RelevanceFilter {
        RelevanceFilter::from_schemes(self.relevant_schemes.iter().cloned())
    }

    /// Merge the environment diagnostics flag: the result is diagnostic if
    /// either the config or [`DIAGNOSTICS_ENV`] says so.
    #[must_use]
    pub fn diagnostics_from_env(mut self) -> Self {
        self.diagnostics = self.diagnostics || diagnostics_env_enabled();
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PanelConfigError> {
        toml::from_str(s).map_err(PanelConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PanelConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PanelConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PanelConfigError> {
        serde_json::from_str(s).map_err(PanelConfigError::Json)
    }
}

/// True iff the diagnostics environment flag is set to a truthy value.
#[must_use]
pub fn diagnostics_env_enabled() -> bool {
    std::env::var(DIAGNOSTICS_ENV).is_ok_and(|value| truthy(&value))
}

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a policy configuration.
#[derive(Debug)]
pub enum PanelConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
}

impl std::fmt::Display for PanelConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for PanelConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
        }
    }
}
