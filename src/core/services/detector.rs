//! Issue detection
//!
//! Data-driven over the loaded ruleset: one scan path per mechanism
//! (keyword membership, anaphora resolution, phrase patterns, structural
//! completeness), never one code path per keyword family. Issues are
//! deduplicated by (category, span) and ordered by text position.

use std::collections::HashSet;

use crate::core::models::{Issue, IssueCategory};
use crate::nlp::{ParsedStatement, PosTag, Span};
use crate::ruleset::RuleSet;

/// Detect all lexical, reference, and testability issues in a statement
#[must_use]
pub fn detect_issues(rules: &RuleSet, parsed: &ParsedStatement) -> Vec<Issue> {
    let mut issues = Vec::new();

    for category in [IssueCategory::SubjectiveTerm, IssueCategory::WeakModality] {
        for rule in rules.keyword_rules_for(category) {
            for span in match_phrases(parsed, &rule.phrases) {
                issues.push(Issue::new(
                    category,
                    span,
                    slice(parsed, span),
                    rule.id.clone(),
                    rule.weight,
                ));
            }
        }
    }

    detect_unresolved_references(rules, parsed, &mut issues);
    detect_testability_gaps(rules, parsed, &mut issues);

    dedup_and_order(issues)
}

fn slice(parsed: &ParsedStatement, span: Span) -> String {
    parsed.text[span.start..span.end].to_string()
}

/// Find every occurrence of any phrase as a contiguous token sequence
fn match_phrases(parsed: &ParsedStatement, phrases: &[Vec<String>]) -> Vec<Span> {
    let mut spans = Vec::new();
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
                .all(|(word, token)| token.lower == *word && token.is_word());
            if matched {
                spans.push(Span::new(
                    parsed.tokens[start].span.start,
                    parsed.tokens[start + phrase.len() - 1].span.end,
                ));
            }
        }
    }
    spans
}

/// Flag pronouns and demonstratives with no antecedent noun phrase
///
/// Resolution is sentence-local first, then statement-wide, always looking
/// backward; the traversal is bounded by the statement itself and cannot
/// recurse. Cross-statement resolution is out of scope: each statement is
/// analyzed independently, so a statement-initial pronoun is always flagged.
fn detect_unresolved_references(
    rules: &RuleSet,
    parsed: &ParsedStatement,
    issues: &mut Vec<Issue>,
) {
    for rule in rules.keyword_rules_for(IssueCategory::UndefinedReference) {
        let candidates: HashSet<&str> = rule
            .phrases
            .iter()
            .filter(|p| p.len() == 1)
            .map(|p| p[0].as_str())
            .collect();

        for (index, token) in parsed.tokens.iter().enumerate() {
            if !token.pos.is_referential() || !candidates.contains(token.lower.as_str()) {
                continue;
            }
            // "that" directly after a verb is a complementizer, not a reference
            if token.lower == "that"
                && parsed.tokens[..index]
                    .iter()
                    .rev()
                    .find(|t| t.is_word())
                    .is_some_and(|t| t.pos == PosTag::Verb)
            {
                continue;
            }
            if resolve_antecedent(parsed, index).is_none() {
                issues.push(Issue::new(
                    IssueCategory::UndefinedReference,
                    token.span,
                    token.text.clone(),
                    rule.id.clone(),
                    rule.weight,
                ));
            }
        }
    }
}

/// Backward search for an antecedent nominal: same sentence, then earlier
/// sentences
fn resolve_antecedent(parsed: &ParsedStatement, index: usize) -> Option<usize> {
    let sentence = parsed.tokens[index].sentence;
    let before = parsed.tokens[..index].iter().enumerate().rev();
    let mut statement_wide = None;
    for (i, token) in before {
        if !token.pos.is_nominal() {
            continue;
        }
        if token.sentence == sentence {
            return Some(i);
        }
        statement_wide.get_or_insert(i);
    }
    statement_wide
}

/// Flag known non-testable phrases and missing observable outcomes
fn detect_testability_gaps(rules: &RuleSet, parsed: &ParsedStatement, issues: &mut Vec<Issue>) {
    for rule in &rules.phrase_rules {
        for m in rule.regex.find_iter(&parsed.text) {
            issues.push(Issue::new(
                IssueCategory::TestabilityGap,
                Span::new(m.start(), m.end()),
                m.as_str().to_string(),
                rule.id.clone(),
                rule.weight,
            ));
        }
    }

    // Subject-verb-object completeness: at least one sentence must carry an
    // observable action with a participant
    if !parsed.sentences.iter().any(|s| s.has_actionable_clause()) {
        let rule = &rules.structural_rule;
        issues.push(Issue::new(
            IssueCategory::TestabilityGap,
            Span::new(0, parsed.text.len()),
            parsed.text.trim().to_string(),
            rule.id.clone(),
            rule.weight,
        ));
    }
}

/// Deduplicate by (category, span), order by position with the fixed
/// tie-break; never merge across categories
fn dedup_and_order(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen: HashSet<(IssueCategory, Span)> = HashSet::new();
    let mut unique: Vec<Issue> =
        issues.into_iter().filter(|i| seen.insert((i.category, i.span))).collect();
    unique.sort_by_key(|i| (i.span.start, i.category.detection_order(), i.span.end));
    unique
}
