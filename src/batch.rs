//! Batch submission types
//!
//! A batch is an ordered list of (identifier, text) pairs. Items are
//! analyzed independently; each result slot holds either a complete
//! analysis or an explicit error descriptor, and the slot order matches
//! the submitted order so correlation identifiers are preserved.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::core::models::Analysis;

/// One statement submitted for batch analysis
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Caller-supplied correlation identifier
    pub id: String,
    /// Statement text
    pub text: String,
}

impl BatchItem {
    /// Create a batch item
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// Error descriptor for a failed batch item
#[derive(Debug, Clone, Serialize)]
pub struct ItemError {
    /// Correlation identifier of the failed item
    pub id: String,
    /// Stable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Result slot for one batch item
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The item was analyzed to completion
    Analyzed {
        /// The full analysis result
        analysis: Analysis,
    },
    /// The item failed or was skipped; the descriptor says why
    Failed {
        /// The error descriptor
        error: ItemError,
    },
}

impl BatchOutcome {
    /// Correlation identifier of the item this slot belongs to
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Analyzed { analysis } => &analysis.id,
            Self::Failed { error } => &error.id,
        }
    }

    /// Whether the item completed successfully
    #[must_use]
    pub const fn is_analyzed(&self) -> bool {
        matches!(self, Self::Analyzed { .. })
    }

    /// Build a descriptor for an item skipped by cancellation
    #[must_use]
    pub fn canceled(id: &str) -> Self {
        Self::Failed {
            error: ItemError {
                id: id.to_string(),
                code: "CANCELED".to_string(),
                message: "batch was canceled before this item was scheduled".to_string(),
            },
        }
    }
}

/// Results for a whole batch, in submission order
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// One slot per submitted item
    pub results: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Number of successfully analyzed items
    #[must_use]
    pub fn analyzed(&self) -> usize {
        self.results.iter().filter(|r| r.is_analyzed()).count()
    }

    /// Number of failed or skipped items
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.analyzed()
    }
}

/// Cooperative cancellation flag shared between the caller and a running
/// batch
///
/// Cancellation stops scheduling remaining items; items already analyzed
/// keep their completed results.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-canceled state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_roundtrip() {
        let token = CancelToken::new();
        assert!(!token.is_canceled());
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_canceled());
    }

    #[test]
    fn test_canceled_outcome_descriptor() {
        let outcome = BatchOutcome::canceled("REQ-7");
        assert!(!outcome.is_analyzed());
        assert_eq!(outcome.id(), "REQ-7");
        match outcome {
            BatchOutcome::Failed { error } => assert_eq!(error.code, "CANCELED"),
            BatchOutcome::Analyzed { .. } => panic!("expected failure descriptor"),
        }
    }
}
