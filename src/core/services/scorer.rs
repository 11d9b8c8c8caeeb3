//! Readiness scoring
//!
//! Aggregates issue severities and assumption penalties into component
//! scores and a final weighted readiness score. Every coefficient comes
//! from the loaded ruleset; nothing numeric is hardcoded here. Identical
//! (text, ruleset version) always produces an identical breakdown.

use crate::core::models::{
    Assumption, AssumptionStrength, Issue, IssueCategory, ReadinessCategory, ScoreBreakdown,
};
use crate::ruleset::RuleSet;

/// Compute the score breakdown for one statement
#[must_use]
pub fn score(rules: &RuleSet, issues: &[Issue], assumptions: &[Assumption]) -> ScoreBreakdown {
    let lexical = component(issues, IssueCategory::is_lexical);
    let testability = component(issues, |c| c == IssueCategory::TestabilityGap);
    let reference = component(issues, |c| c == IssueCategory::UndefinedReference);

    let weak_factor = rules.weights.weak_assumption_factor;
    let assumption_penalty: f64 = assumptions
        .iter()
        .map(|a| match a.strength {
            AssumptionStrength::Strong => a.weight,
            AssumptionStrength::Weak => a.weight * weak_factor,
        })
        .sum();

    let weights = rules.weights;
    let weighted = weights.lexical.mul_add(
        lexical,
        weights.testability.mul_add(testability, weights.reference * reference),
    );
    let final_score = round1((weighted - assumption_penalty).clamp(0.0, 100.0));

    ScoreBreakdown {
        lexical,
        testability,
        reference,
        assumption_penalty: round1(assumption_penalty),
        score: final_score,
        category: categorize(rules, final_score),
    }
}

/// Category assignment: exactly one category for any score, boundaries
/// included
#[must_use]
pub fn categorize(rules: &RuleSet, score: f64) -> ReadinessCategory {
    let thresholds = rules.thresholds;
    if score >= thresholds.ready {
        ReadinessCategory::Ready
    } else if score < thresholds.high_risk {
        ReadinessCategory::HighRisk
    } else {
        ReadinessCategory::NeedsClarification
    }
}

/// 100 minus summed severities for the matching categories, floored at 0
fn component(issues: &[Issue], matches: impl Fn(IssueCategory) -> bool) -> f64 {
    let deductions: f64 =
        issues.iter().filter(|i| matches(i.category)).map(|i| i.severity).sum();
    (100.0 - deductions).max(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
