//! Assumption inference
//!
//! Classifies implicit dependencies along three dimensions by inspecting
//! noun phrases and prepositional attachments against dimension lexicons,
//! plus action triggers that silently rely on setup. The STRONG/WEAK split
//! is a rule-driven policy tied to clause structure: triggers anchoring the
//! main clause or a governing precondition are STRONG, triggers inside
//! optional modifiers are WEAK.

use std::collections::HashSet;

use crate::core::models::{Assumption, AssumptionDimension, AssumptionStrength};
use crate::nlp::{ParsedStatement, Span};
use crate::ruleset::{ActionTrigger, RuleSet};

/// Infer all hidden assumptions in a statement
#[must_use]
pub fn infer_assumptions(rules: &RuleSet, parsed: &ParsedStatement) -> Vec<Assumption> {
    let mut assumptions = Vec::new();
    let lower_text = parsed.text.to_lowercase();

    infer_from_dimensions(rules, parsed, &mut assumptions);
    infer_from_actions(rules, parsed, &lower_text, &mut assumptions);
    infer_from_environment_gap(rules, parsed, &lower_text, &mut assumptions);

    dedup_and_order(assumptions)
}

/// Dimension lexicon scan over token n-grams
fn infer_from_dimensions(
    rules: &RuleSet,
    parsed: &ParsedStatement,
    assumptions: &mut Vec<Assumption>,
) {
    for lexicon in &rules.dimensions {
        for (start, len) in match_token_phrases(parsed, &lexicon.phrases) {
            let span = token_range_span(parsed, start, len);
            let text = parsed.text[span.start..span.end].to_string();
            assumptions.push(Assumption {
                dimension: lexicon.dimension,
                strength: classify_strength(parsed, start, len),
                span,
                description: lexicon.description.replace("{text}", &text),
                text,
                question: String::new(),
                weight: lexicon.weight,
            });
        }
    }
}

/// Action triggers: verbs/phrases whose execution silently relies on setup
///
/// An implied assumption is suppressed when the statement states it
/// explicitly (any of the rule's `unless` phrases appears in the text).
fn infer_from_actions(
    rules: &RuleSet,
    parsed: &ParsedStatement,
    lower_text: &str,
    assumptions: &mut Vec<Assumption>,
) {
    for action in &rules.actions {
        let Some((start, len)) = find_trigger(parsed, action) else {
            continue;
        };
        let span = token_range_span(parsed, start, len);
        let text = parsed.text[span.start..span.end].to_string();
        let strength = classify_strength(parsed, start, len);
        for implied in &action.implies {
            if implied.unless.iter().any(|phrase| lower_text.contains(phrase)) {
                continue;
            }
            let weight = dimension_weight(rules, implied.dimension);
            assumptions.push(Assumption {
                dimension: implied.dimension,
                strength,
                span,
                text: text.clone(),
                description: implied.description.clone(),
                question: implied.question.clone().unwrap_or_default(),
                weight,
            });
        }
    }
}

/// UI interaction with no environment term implies an environment gap
fn infer_from_environment_gap(
    rules: &RuleSet,
    parsed: &ParsedStatement,
    lower_text: &str,
    assumptions: &mut Vec<Assumption>,
) {
    let Some(check) = &rules.environment_check else {
        return;
    };
    if check.indicators.iter().any(|term| lower_text.contains(term)) {
        return;
    }
    let ui_verb = parsed.tokens.iter().enumerate().find(|(_, token)| {
        check.ui_actions.iter().any(|action| matches_inflected(action, &token.lower))
    });
    if let Some((index, token)) = ui_verb {
        assumptions.push(Assumption {
            dimension: AssumptionDimension::Environment,
            strength: classify_strength(parsed, index, 1),
            span: token.span,
            text: token.text.clone(),
            description: check.description.clone(),
            question: String::new(),
            weight: check.weight,
        });
    }
}

/// All (start, len) token matches for a set of phrases
fn match_token_phrases(parsed: &ParsedStatement, phrases: &[Vec<String>]) -> Vec<(usize, usize)> {
    let mut matches = Vec::new();
    for phrase in phrases {
        if phrase.is_empty() {
            continue;
        }
        for start in 0..parsed.tokens.len() {
            let window = &parsed.tokens[start..];
            if window.len() < phrase.len() {
                break;
            }
            let matched = phrase
                .iter()
                .zip(window)
                .all(|(word, token)| token.is_word() && token.lower == *word);
            if matched {
                matches.push((start, phrase.len()));
            }
        }
    }
    matches
}

/// First token position where the trigger phrase matches, inflection-aware
fn find_trigger(parsed: &ParsedStatement, action: &ActionTrigger) -> Option<(usize, usize)> {
    let phrase = &action.trigger;
    if phrase.is_empty() {
        return None;
    }
    (0..parsed.tokens.len()).find_map(|start| {
        let window = &parsed.tokens[start..];
        if window.len() < phrase.len() {
            return None;
        }
        let matched = phrase.iter().zip(window).enumerate().all(|(i, (word, token))| {
            // Only the head word of a trigger phrase inflects ("logs out")
            if i == 0 {
                token.is_word() && matches_inflected(word, &token.lower)
            } else {
                token.is_word() && token.lower == *word
            }
        });
        matched.then_some((start, phrase.len()))
    })
}

/// Match a base form against a possibly inflected token
fn matches_inflected(base: &str, token: &str) -> bool {
    if token == base {
        return true;
    }
    for suffix in ["ing", "es", "ed", "s", "d"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem == base {
                return true;
            }
            // Final-e dropping: "saving" -> "save"
            if suffix == "ing" && format!("{stem}e") == base {
                return true;
            }
        }
    }
    false
}

/// STRONG when the trigger anchors the main clause or a governing
/// precondition; WEAK inside optional modifiers
fn classify_strength(parsed: &ParsedStatement, start: usize, len: usize) -> AssumptionStrength {
    let anchored = (start..start + len).any(|index| {
        parsed.is_core_argument(index)
            || parsed.sentence_of(index).is_some_and(|s| s.in_condition(index))
    });
    if anchored {
        AssumptionStrength::Strong
    } else {
        AssumptionStrength::Weak
    }
}

fn token_range_span(parsed: &ParsedStatement, start: usize, len: usize) -> Span {
    Span::new(parsed.tokens[start].span.start, parsed.tokens[start + len - 1].span.end)
}

fn dimension_weight(rules: &RuleSet, dimension: AssumptionDimension) -> f64 {
    rules
        .dimensions
        .iter()
        .find(|d| d.dimension == dimension)
        .map_or(0.0, |d| d.weight)
}

const fn dimension_rank(dimension: AssumptionDimension) -> u8 {
    match dimension {
        AssumptionDimension::Environment => 0,
        AssumptionDimension::Data => 1,
        AssumptionDimension::State => 2,
    }
}

/// Unique by (dimension, span); deterministic order by position
fn dedup_and_order(assumptions: Vec<Assumption>) -> Vec<Assumption> {
    let mut seen: HashSet<(AssumptionDimension, Span)> = HashSet::new();
    let mut unique: Vec<Assumption> =
        assumptions.into_iter().filter(|a| seen.insert(a.key())).collect();
    unique.sort_by_key(|a| (a.span, dimension_rank(a.dimension)));
    unique
}
