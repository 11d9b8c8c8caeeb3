//! Unit tests for reqgate
//!
//! These tests verify individual components and the engine pipeline against
//! the built-in ruleset and lexicon.

#[path = "unit/batch_test.rs"]
mod batch_test;

#[path = "unit/engine_test.rs"]
mod engine_test;

#[path = "unit/ruleset_test.rs"]
mod ruleset_test;

#[path = "unit/scenario_test.rs"]
mod scenario_test;
