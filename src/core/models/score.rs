//! Readiness scoring results

use serde::{Deserialize, Serialize};

/// Readiness classification against the configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessCategory {
    /// Score at or above the ready threshold
    Ready,
    /// Score between the thresholds
    NeedsClarification,
    /// Score below the high-risk threshold
    HighRisk,
}

impl std::fmt::Display for ReadinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "READY"),
            Self::NeedsClarification => write!(f, "NEEDS_CLARIFICATION"),
            Self::HighRisk => write!(f, "HIGH_RISK"),
        }
    }
}

/// Component scores and the aggregated readiness score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    /// 100 minus summed subjective-term and weak-modality severities
    pub lexical: f64,
    /// 100 minus summed testability-gap severities
    pub testability: f64,
    /// 100 minus summed undefined-reference severities
    pub reference: f64,
    /// Summed assumption weights (weak ones scaled by the configured factor)
    pub assumption_penalty: f64,
    /// Weighted sum of the components minus the penalty, clamped to [0, 100]
    pub score: f64,
    /// Category assignment for the final score
    pub category: ReadinessCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_screaming_snake() {
        let json = serde_json::to_string(&ReadinessCategory::NeedsClarification).unwrap();
        assert_eq!(json, "\"NEEDS_CLARIFICATION\"");
    }
}
