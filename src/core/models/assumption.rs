//! Inferred hidden assumptions

use serde::{Deserialize, Serialize};

use crate::nlp::Span;

/// Dimension of an implicit dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionDimension {
    /// Browser, device, platform, network context
    Environment,
    /// Records, files, credentials, test data
    Data,
    /// Preconditions, sessions, permissions, feature flags
    State,
}

impl std::fmt::Display for AssumptionDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Environment => "environment",
            Self::Data => "data",
            Self::State => "state",
        };
        write!(f, "{name}")
    }
}

/// Strength of an inferred assumption
///
/// The strong/weak split is a rule-driven heuristic tied to clause
/// structure, not ground truth: strong assumptions anchor the main clause
/// or a governing precondition, weak ones sit in optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssumptionStrength {
    /// Breaks automation if unmet
    Strong,
    /// Contextual, non-blocking
    Weak,
}

impl std::fmt::Display for AssumptionStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong => write!(f, "STRONG"),
            Self::Weak => write!(f, "WEAK"),
        }
    }
}

/// One inferred hidden dependency
///
/// Unique within a statement by (dimension, span).
#[derive(Debug, Clone, Serialize)]
pub struct Assumption {
    /// Dependency dimension
    pub dimension: AssumptionDimension,
    /// Strength classification
    pub strength: AssumptionStrength,
    /// Byte span of the triggering text
    pub span: Span,
    /// Triggering surface text
    pub text: String,
    /// What the statement silently relies on
    pub description: String,
    /// Clarification question (filled by the feedback generator)
    pub question: String,
    /// Penalty weight taken from the dimension configuration
    pub weight: f64,
}

impl Assumption {
    /// Dedup key within one statement
    #[must_use]
    pub const fn key(&self) -> (AssumptionDimension, Span) {
        (self.dimension, self.span)
    }
}
