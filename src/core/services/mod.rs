//! Analysis services
//!
//! Pure functions over the preprocessed statement and the loaded ruleset,
//! run strictly downstream: detection and inference feed confidence
//! estimation, scoring, and feedback. No service mutates an upstream
//! result.

pub mod assumption;
pub mod confidence;
pub mod detector;
pub mod feedback;
pub mod scorer;

pub use assumption::infer_assumptions;
pub use confidence::estimate;
pub use detector::detect_issues;
pub use feedback::attach_feedback;
pub use scorer::{categorize, score};
