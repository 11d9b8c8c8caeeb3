//! Per-signal confidence annotations

use serde::{Deserialize, Serialize};

/// Trust level for one signal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Both ambiguity signals present
    Low,
    /// Exactly one ambiguity signal present
    Medium,
    /// No ambiguity signal
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Signal categories that carry their own confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Keyword-based lexical detections
    Lexical,
    /// Structure-based testability detections
    Testability,
    /// Anaphora-based reference detections
    Reference,
    /// Assumption inference
    Assumption,
}

/// Per-signal trust attached to an analysis result
///
/// Derived by the confidence estimator, never directly settable; it
/// annotates trust and leaves detection and scoring untouched.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfidenceProfile {
    /// Confidence in lexical detections
    pub lexical: Confidence,
    /// Confidence in testability detections
    pub testability: Confidence,
    /// Confidence in reference detections
    pub reference: Confidence,
    /// Confidence in assumption inference
    pub assumption: Confidence,
}

impl ConfidenceProfile {
    /// Confidence level for one signal category
    #[must_use]
    pub const fn get(&self, signal: SignalCategory) -> Confidence {
        match signal {
            SignalCategory::Lexical => self.lexical,
            SignalCategory::Testability => self.testability,
            SignalCategory::Reference => self.reference,
            SignalCategory::Assumption => self.assumption,
        }
    }

    /// Whether any signal is at LOW confidence
    #[must_use]
    pub fn has_low_signal(&self) -> bool {
        [self.lexical, self.testability, self.reference, self.assumption]
            .iter()
            .any(|c| *c == Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }

    #[test]
    fn test_low_signal_detection() {
        let profile = ConfidenceProfile {
            lexical: Confidence::High,
            testability: Confidence::Low,
            reference: Confidence::High,
            assumption: Confidence::Medium,
        };
        assert!(profile.has_low_signal());
        assert_eq!(profile.get(SignalCategory::Testability), Confidence::Low);
        assert_eq!(profile.get(SignalCategory::Lexical), Confidence::High);
    }
}
