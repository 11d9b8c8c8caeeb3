//! Detected linguistic issues

use serde::{Deserialize, Serialize};

use crate::nlp::Span;

/// Category of a detected linguistic defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Subjective or vague term ("fast", "robust")
    SubjectiveTerm,
    /// Weak modality indicating optionality ("should", "may")
    WeakModality,
    /// Pronoun or demonstrative without an antecedent in the statement
    UndefinedReference,
    /// No observable action/outcome, or a known non-testable phrase
    TestabilityGap,
}

impl IssueCategory {
    /// Fixed tie-break rank for issues at the same text position
    #[must_use]
    pub const fn detection_order(self) -> u8 {
        match self {
            Self::SubjectiveTerm => 0,
            Self::WeakModality => 1,
            Self::UndefinedReference => 2,
            Self::TestabilityGap => 3,
        }
    }

    /// Whether the category contributes to the lexical component score
    #[must_use]
    pub const fn is_lexical(self) -> bool {
        matches!(self, Self::SubjectiveTerm | Self::WeakModality)
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SubjectiveTerm => "subjective_term",
            Self::WeakModality => "weak_modality",
            Self::UndefinedReference => "undefined_reference",
            Self::TestabilityGap => "testability_gap",
        };
        write!(f, "{name}")
    }
}

/// One detected linguistic defect, immutable once created
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Defect category
    pub category: IssueCategory,
    /// Byte span in the submitted text
    pub span: Span,
    /// Matched surface text
    pub text: String,
    /// Identifier of the rule that produced this issue
    pub rule: String,
    /// Severity weight taken from the rule
    pub severity: f64,
    /// Human-readable impact explanation (filled by the feedback generator)
    pub impact: String,
    /// Clarification question (filled by the feedback generator)
    pub question: String,
}

impl Issue {
    /// Create an issue before feedback has been attached
    #[must_use]
    pub const fn new(
        category: IssueCategory,
        span: Span,
        text: String,
        rule: String,
        severity: f64,
    ) -> Self {
        Self {
            category,
            span,
            text,
            rule,
            severity,
            impact: String::new(),
            question: String::new(),
        }
    }
}
