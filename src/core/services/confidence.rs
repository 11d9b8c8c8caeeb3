//! Confidence estimation
//!
//! Derives per-signal trust from two ambiguity signals: parse ambiguity
//! (ambiguous prepositional attachments above the configured threshold) and
//! weak token anchoring (statements too short to anchor detections). Both
//! signals present yields LOW, one yields MEDIUM, none yields HIGH.
//! Confidence never blocks or rescales detection; it only annotates trust
//! for scoring presentation and feedback.

use crate::core::models::{Confidence, ConfidenceProfile};
use crate::nlp::ParsedStatement;
use crate::ruleset::RuleSet;

/// Estimate per-signal confidence for one statement
#[must_use]
pub fn estimate(rules: &RuleSet, parsed: &ParsedStatement) -> ConfidenceProfile {
    let tuning = rules.confidence;
    let parse_ambiguity = parsed.ambiguous_attachments > tuning.max_ambiguous_attachments;
    let weak_anchoring = parsed.stats.words < tuning.min_anchor_tokens;

    // Lexical detection is pure keyword membership; the parse cannot
    // mislead it, so only anchoring applies there.
    let lexical = level(usize::from(weak_anchoring));
    let structural = level(usize::from(parse_ambiguity) + usize::from(weak_anchoring));

    ConfidenceProfile {
        lexical,
        testability: structural,
        reference: structural,
        assumption: structural,
    }
}

const fn level(signals: usize) -> Confidence {
    match signals {
        0 => Confidence::High,
        1 => Confidence::Medium,
        _ => Confidence::Low,
    }
}
