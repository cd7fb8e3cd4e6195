//! Policy-as-data loading (requires the `policy-config` feature).

use paneguard_runtime::{PanelConfigError, PanelPolicyConfig};

#[test]
fn toml_overrides_merge_with_defaults() {
    let config = PanelPolicyConfig::from_toml_str("debounce_ms = 400\n").unwrap();
    assert_eq!(config.debounce_ms, 400);
    // Unspecified fields keep the reference behavior.
    assert!(config.auto_close_enabled);
    assert_eq!(
        config.relevant_schemes,
        ["file", "notebook-cell", "untitled"]
    );
}

#[test]
fn toml_can_replace_the_scheme_set() {
    let config = PanelPolicyConfig::from_toml_str(
        "relevant_schemes = [\"file\", \"remote\"]\ndiagnostics = true\n",
    )
    .unwrap();
    assert_eq!(config.relevant_schemes, ["file", "remote"]);
    assert!(config.diagnostics);
}

#[test]
fn json_loading_matches_toml() {
    let config = PanelPolicyConfig::from_json_str(
        r#"{"debounce_ms": 250, "auto_close_enabled": false}"#,
    )
    .unwrap();
    assert_eq!(config.debounce_ms, 250);
    assert!(!config.auto_close_enabled);
    assert!(!config.diagnostics);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paneguard.toml");

    let written = PanelPolicyConfig {
        debounce_ms: 900,
        diagnostics: true,
        ..PanelPolicyConfig::default()
    };
    std::fs::write(&path, toml::to_string(&written).unwrap()).unwrap();

    let loaded = PanelPolicyConfig::from_toml_file(&path).unwrap();
    assert_eq!(loaded.debounce_ms, 900);
    assert!(loaded.diagnostics);
    assert!(loaded.auto_close_enabled);
}

#[test]
fn invalid_toml_surfaces_a_parse_error() {
    let err = PanelPolicyConfig::from_toml_str("debounce_ms = \"soon\"").unwrap_err();
    assert!(matches!(err, PanelConfigError::Toml(_)));
    // The error chain keeps the underlying parse error.
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn missing_file_surfaces_io_error() {
    let err = PanelPolicyConfig::from_toml_file("/nonexistent/paneguard.toml").unwrap_err();
    assert!(matches!(err, PanelConfigError::Io(_)));
}
