//! Core data model
//!
//! Tagged-variant types for issues, assumptions, confidence, and scores.
//! Categories are enums with payloads; detectors are data-driven over the
//! ruleset, so adding a rule never requires a new type.

pub mod analysis;
pub mod assumption;
pub mod confidence;
pub mod issue;
pub mod score;

pub use analysis::{Analysis, StatementKind};
pub use assumption::{Assumption, AssumptionDimension, AssumptionStrength};
pub use confidence::{Confidence, ConfidenceProfile, SignalCategory};
pub use issue::{Issue, IssueCategory};
pub use score::{ReadinessCategory, ScoreBreakdown};
