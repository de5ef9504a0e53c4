#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = PageConfig::from_json("{}").unwrap();
    assert_eq!(cfg, PageConfig::default());
    assert_eq!(cfg.storage_key, "syricoff-theme");
    assert_eq!(cfg.lookahead_margin_px, 24.0);
    assert_eq!(cfg.suppression_ms, 1000.0);
    assert_eq!(cfg.nav_breakpoint_px, 768.0);
    assert_eq!(cfg.top_hash, "#top");
    assert_eq!(cfg.theme_policy, ThemePolicy::ThreeState);
}

#[test]
fn partial_object_overrides_only_named_fields() {
    let cfg = PageConfig::from_json(r#"{ "suppression_ms": 600, "theme_policy": "legacy_flip" }"#).unwrap();
    assert_eq!(cfg.suppression_ms, 600.0);
    assert_eq!(cfg.theme_policy, ThemePolicy::LegacyFlip);
    assert_eq!(cfg.storage_key, "syricoff-theme");
    assert_eq!(cfg.edge_tolerance_px, 2.0);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = PageConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn mistyped_field_is_a_parse_error() {
    let err = PageConfig::from_json(r#"{ "suppression_ms": "soon" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_theme_policy_is_a_parse_error() {
    let err = PageConfig::from_json(r#"{ "theme_policy": "sepia" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_suppression_is_rejected() {
    let err = PageConfig::from_json(r#"{ "suppression_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "suppression_ms", .. }));
}

#[test]
fn negative_margin_is_rejected() {
    let err = PageConfig::from_json(r#"{ "lookahead_margin_px": -4 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "lookahead_margin_px", .. }));
}

#[test]
fn blank_storage_key_is_rejected() {
    let err = PageConfig::from_json(r#"{ "storage_key": "  " }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "storage_key", .. }));
}

#[test]
fn top_hash_must_be_a_fragment() {
    let err = PageConfig::from_json(r##"{ "top_hash": "top" }"##).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "top_hash", .. }));

    let err = PageConfig::from_json(r##"{ "top_hash": "#" }"##).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "top_hash", .. }));
}

#[test]
fn error_messages_name_the_field() {
    let err = PageConfig::from_json(r#"{ "nav_breakpoint_px": -1 }"#).unwrap_err();
    assert!(err.to_string().contains("nav_breakpoint_px"));
}
