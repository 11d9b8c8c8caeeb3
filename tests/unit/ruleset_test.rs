//! Ruleset document loading and validation tests

use std::fs;

use reqgate::error::{ConfigError, EngineError};
use reqgate::ruleset::RuleSet;
use tempfile::TempDir;

const BUILTIN: &str = include_str!("../../rules/default.toml");

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_from_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.toml");
    fs::write(&path, BUILTIN).unwrap();

    let rules = RuleSet::from_path(&path).unwrap();
    assert_eq!(rules.version(), RuleSet::builtin().unwrap().version());
}

#[test]
fn test_missing_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    let err = RuleSet::from_path(temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::Read { .. })
    ));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let doc = format!("{BUILTIN}\n[some_future_section]\nkey = \"value\"\n");
    assert!(RuleSet::from_toml_str(&doc).is_ok());
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_missing_low_threshold_refuses_to_initialize() {
    let doc = BUILTIN.replace("high_risk = 40.0", "");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn test_thresholds_must_be_ordered() {
    let doc = BUILTIN.replace("high_risk = 40.0", "high_risk = 90.0");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::InvalidThresholds { .. })
    ));
}

#[test]
fn test_thresholds_must_be_in_range() {
    let doc = BUILTIN.replace("ready = 70.0", "ready = 170.0");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::InvalidThresholds { .. })
    ));
}

#[test]
fn test_uncovered_category_refuses_to_initialize() {
    // Drop the undefined-reference rule by renaming its category away
    let doc = BUILTIN.replace("category = \"undefined_reference\"", "category = \"weak_modality\"");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::UncoveredCategory(_))
    ));
}

#[test]
fn test_missing_structural_rule_refuses_to_initialize() {
    let doc = BUILTIN.replace("structural = true", "structural = false");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::UncoveredCategory(_))
    ));
}

#[test]
fn test_missing_fallback_templates_refuse_to_initialize() {
    let doc = BUILTIN.replace("[fallback_templates]", "[fallback_templates_gone]");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn test_invalid_pattern_refuses_to_initialize() {
    let doc = BUILTIN.replace(
        r"'handle\w*(\s+\w+){0,3}\s+properly'",
        "'handle[unclosed'",
    );
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn test_negative_weight_refuses_to_initialize() {
    let doc = BUILTIN.replace("weight = 30.0", "weight = -30.0");
    let err = RuleSet::from_toml_str(&doc).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::InvalidWeight { .. })
    ));
}
