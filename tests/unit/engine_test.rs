//! Engine lifecycle tests

use reqgate::engine::Engine;
use reqgate::error::EngineError;
use reqgate::ruleset::RuleSet;
use serial_test::serial;

const BUILTIN: &str = include_str!("../../rules/default.toml");

// =============================================================================
// INITIALIZATION
// =============================================================================

#[test]
fn test_engine_refuses_bad_configuration_before_any_analysis() {
    let doc = BUILTIN.replace("high_risk = 40.0", "high_risk = 90.0");
    assert!(RuleSet::from_toml_str(&doc).is_err());
}

#[test]
fn test_empty_input_is_an_input_error() {
    let engine = Engine::builtin().unwrap();
    let err = engine.analyze("").unwrap_err();
    assert!(matches!(err, EngineError::Input(_)));
    assert_eq!(err.code(), "EMPTY_INPUT");

    let err = engine.analyze(" \t \n ").unwrap_err();
    assert_eq!(err.code(), "EMPTY_INPUT");
}

#[test]
fn test_analyze_as_carries_correlation_id() {
    let engine = Engine::builtin().unwrap();
    let analysis = engine.analyze_as("The page renders the title.", "REQ-42").unwrap();
    assert_eq!(analysis.id, "REQ-42");
}

// =============================================================================
// RELOAD LIFECYCLE
// =============================================================================

#[test]
#[serial]
fn test_reload_unchanged_ruleset_is_idempotent() {
    let engine = Engine::builtin().unwrap();
    let corpus = [
        "The system should respond fast.",
        "It updates the record.",
        "Given the user is logged in, the dashboard loads within 2 seconds.",
    ];

    let before: Vec<String> =
        corpus.iter().map(|t| engine.analyze(t).unwrap().to_json().unwrap()).collect();

    engine.reload(RuleSet::builtin().unwrap());

    let after: Vec<String> =
        corpus.iter().map(|t| engine.analyze(t).unwrap().to_json().unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
#[serial]
fn test_reload_swaps_rule_weights() {
    let engine = Engine::builtin().unwrap();
    let strict = BUILTIN.replace("weight = 30.0", "weight = 90.0");
    let baseline = engine.analyze("The page loads fast.").unwrap();

    engine.reload(RuleSet::from_toml_str(&strict).unwrap());
    let stricter = engine.analyze("The page loads fast.").unwrap();

    assert!(stricter.score < baseline.score);
    assert_eq!(stricter.ruleset_version, baseline.ruleset_version);
}

#[test]
fn test_results_carry_ruleset_version() {
    let engine = Engine::builtin().unwrap();
    let analysis = engine.analyze("The page renders the title.").unwrap();
    assert_eq!(analysis.ruleset_version, engine.ruleset_version());
}
