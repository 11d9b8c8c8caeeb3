//! reqgate - a library for scoring the automation readiness of requirements
//! and test cases
//!
//! This library provides a deterministic, rule-driven analysis engine that
//! detects linguistic ambiguity and hidden assumptions in requirement text
//! and aggregates them into a 0-100 readiness score with actionable
//! clarification feedback.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod batch;
pub mod core;
pub mod engine;
pub mod error;
pub mod nlp;
pub mod ruleset;
