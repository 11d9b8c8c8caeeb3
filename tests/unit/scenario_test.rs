//! End-to-end scenarios over the built-in ruleset

use reqgate::core::models::{
    AssumptionDimension, AssumptionStrength, IssueCategory, ReadinessCategory,
};
use reqgate::engine::Engine;

fn engine() -> Engine {
    Engine::builtin().unwrap()
}

// =============================================================================
// SCENARIO: WEAK MODALITY + SUBJECTIVE TERM
// =============================================================================

#[test]
fn test_should_respond_fast() {
    let analysis = engine().analyze("The system should respond fast.").unwrap();

    let lexical: Vec<_> =
        analysis.issues.iter().filter(|i| i.category.is_lexical()).collect();
    assert_eq!(lexical.len(), 2);
    assert_eq!(lexical[0].text, "should");
    assert_eq!(lexical[0].category, IssueCategory::WeakModality);
    assert_eq!(lexical[1].text, "fast");
    assert_eq!(lexical[1].category, IssueCategory::SubjectiveTerm);

    // Verb plus subject: no testability gap
    assert!(analysis.issues.iter().all(|i| i.category != IssueCategory::TestabilityGap));

    // Both severities come off the lexical component
    assert!(analysis.breakdown.lexical < 100.0);
    assert!(analysis.score < 100.0);
    assert_eq!(analysis.category, ReadinessCategory::NeedsClarification);
}

// =============================================================================
// SCENARIO: UNRESOLVED PRONOUN
// =============================================================================

#[test]
fn test_dangling_it() {
    let analysis = engine().analyze("It updates the record.").unwrap();

    let references: Vec<_> = analysis
        .issues
        .iter()
        .filter(|i| i.category == IssueCategory::UndefinedReference)
        .collect();
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].text, "It");

    // Verb and object are present, so testability passes
    assert!(analysis.issues.iter().all(|i| i.category != IssueCategory::TestabilityGap));
    assert!(analysis.breakdown.reference < 100.0);
}

// =============================================================================
// SCENARIO: EXPLICIT PRECONDITION
// =============================================================================

#[test]
fn test_given_logged_in() {
    let analysis = engine()
        .analyze("Given the user is logged in, the dashboard loads within 2 seconds.")
        .unwrap();

    assert!(analysis.issues.is_empty());

    let state: Vec<_> = analysis
        .assumptions
        .iter()
        .filter(|a| a.dimension == AssumptionDimension::State)
        .collect();
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].strength, AssumptionStrength::Strong);

    // High score, but the penalty is visible in the breakdown
    assert!(analysis.breakdown.assumption_penalty > 0.0);
    assert!(analysis.score < 100.0);
    assert_eq!(analysis.category, ReadinessCategory::Ready);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_determinism_byte_identical_results() {
    let engine = engine();
    let text = "The admin should quickly delete the flaky record. It must work correctly.";
    let first = engine.analyze(text).unwrap().to_json().unwrap();
    let second = engine.analyze(text).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_one_more_subjective_match_never_raises_lexical_score() {
    let engine = engine();
    let base = engine.analyze("The page loads fast.").unwrap();
    let more = engine.analyze("The fast page loads fast.").unwrap();
    assert!(more.breakdown.lexical <= base.breakdown.lexical);
}

#[test]
fn test_feedback_completeness() {
    let engine = engine();
    let analysis = engine
        .analyze("It should handle uploads properly when the user clicks save.")
        .unwrap();
    assert!(!analysis.issues.is_empty());
    assert!(!analysis.assumptions.is_empty());
    for issue in &analysis.issues {
        assert!(!issue.impact.is_empty());
        assert!(!issue.question.is_empty());
    }
    for assumption in &analysis.assumptions {
        assert!(!assumption.description.is_empty());
        assert!(!assumption.question.is_empty());
    }
}

#[test]
fn test_issue_order_is_text_position() {
    let analysis = engine()
        .analyze("It should load fast and handle errors properly.")
        .unwrap();
    let starts: Vec<usize> = analysis.issues.iter().map(|i| i.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_result_serializes_contract_fields() {
    let analysis = engine().analyze("The system should respond fast.").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&analysis.to_json().unwrap()).unwrap();

    assert!(json["score"].is_number());
    assert!(json["category"].is_string());
    assert!(json["confidence_profile"]["lexical"].is_string());
    let issue = &json["issues"][0];
    for key in ["category", "span", "severity", "impact", "question"] {
        assert!(!issue[key].is_null(), "missing issue field {key}");
    }
}

#[test]
fn test_provisional_flag_on_low_confidence_high_risk() {
    // Tighten the confidence tuning so both ambiguity signals trip
    let doc = include_str!("../../rules/default.toml")
        .replace("max_ambiguous_attachments = 1", "max_ambiguous_attachments = 0")
        .replace("min_anchor_tokens = 5", "min_anchor_tokens = 10");
    let rules = reqgate::ruleset::RuleSet::from_toml_str(&doc).unwrap();
    let engine = Engine::new(rules).unwrap();

    let analysis =
        engine.analyze("It should handle fast data properly in the database.").unwrap();
    assert_eq!(analysis.category, ReadinessCategory::HighRisk);
    assert!(analysis.confidence_profile.has_low_signal());
    assert!(analysis.provisional);
}
