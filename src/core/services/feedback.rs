//! Feedback generation
//!
//! Maps every issue and assumption to a human-readable impact explanation
//! and a clarification question from configured templates. Lookup falls
//! back through rule/dimension templates, category templates, and the
//! generic fallback pair, so no detected finding is ever left without
//! feedback.

use log::warn;

use crate::core::models::{Assumption, Issue};
use crate::ruleset::RuleSet;

/// Fill impact and question fields on detected issues and assumptions
pub fn attach_feedback(rules: &RuleSet, issues: &mut [Issue], assumptions: &mut [Assumption]) {
    for issue in issues.iter_mut() {
        let template = rules
            .templates
            .for_rule(&issue.rule)
            .or_else(|| rules.templates.for_category(issue.category));

        let lower = issue.text.to_lowercase();
        match template {
            Some(template) => {
                issue.impact = render(&template.impact, &issue.text);
                issue.question = template
                    .terms
                    .get(&lower)
                    .cloned()
                    .unwrap_or_else(|| render(&template.question, &issue.text));
            },
            None => {
                warn!("no template for rule '{}', using generic fallback", issue.rule);
                let fallback = rules.templates.issue_fallback();
                issue.impact = render(&fallback.impact, &issue.text);
                issue.question = render(&fallback.question, &issue.text);
            },
        }
    }

    for assumption in assumptions.iter_mut() {
        let template = rules.templates.for_dimension(assumption.dimension);
        let dimension = assumption.dimension.to_string();

        if assumption.question.is_empty() {
            assumption.question = template.map_or_else(
                || {
                    warn!(
                        "no template for dimension '{dimension}', using generic fallback"
                    );
                    let fallback = rules.templates.assumption_fallback();
                    render(&fallback.question, &assumption.text).replace("{dimension}", &dimension)
                },
                |t| render(&t.question, &assumption.text).replace("{dimension}", &dimension),
            );
        }
        if assumption.description.is_empty() {
            let fallback = rules.templates.assumption_fallback();
            assumption.description = template.map_or_else(
                || render(&fallback.impact, &assumption.text).replace("{dimension}", &dimension),
                |t| render(&t.impact, &assumption.text).replace("{dimension}", &dimension),
            );
        }
    }
}

fn render(template: &str, text: &str) -> String {
    template.replace("{text}", text)
}
