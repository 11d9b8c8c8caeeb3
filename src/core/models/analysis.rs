//! Analysis result assembled at the engine boundary

use serde::{Deserialize, Serialize};

use crate::core::models::assumption::Assumption;
use crate::core::models::confidence::ConfidenceProfile;
use crate::core::models::issue::Issue;
use crate::core::models::score::{ReadinessCategory, ScoreBreakdown};
use crate::nlp::TextStats;

/// Coarse hint about what kind of text was analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Requirement-shaped text
    Requirement,
    /// Test-case-shaped text
    TestCase,
    /// Neither shape dominates
    Unknown,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Requirement => "requirement",
            Self::TestCase => "test_case",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Structured result for one analyzed statement
///
/// Either this complete structure or an explicit error descriptor is
/// returned for every submitted statement; never a partial result.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Caller-supplied correlation identifier
    pub id: String,
    /// Final readiness score in [0, 100], rounded to one decimal
    pub score: f64,
    /// Readiness category for the score
    pub category: ReadinessCategory,
    /// Full component breakdown
    pub breakdown: ScoreBreakdown,
    /// Per-signal trust levels
    pub confidence_profile: ConfidenceProfile,
    /// Detected issues, ordered by text position
    pub issues: Vec<Issue>,
    /// Inferred assumptions
    pub assumptions: Vec<Assumption>,
    /// Text statistics
    pub stats: TextStats,
    /// Statement kind hint
    pub kind: StatementKind,
    /// True when a LOW-confidence signal coincides with a HIGH_RISK category;
    /// presentation aid only, the score itself is unaffected
    pub provisional: bool,
    /// Version of the ruleset that produced this result
    pub ruleset_version: String,
}

impl Analysis {
    /// Serialize the result to the canonical JSON wire form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(StatementKind::Requirement.to_string(), "requirement");
        assert_eq!(StatementKind::TestCase.to_string(), "test_case");
    }
}
