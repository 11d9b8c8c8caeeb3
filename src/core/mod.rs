//! Core analysis logic
//!
//! Pure, deterministic services over the preprocessed statement and the
//! loaded ruleset. No I/O happens in this module tree.

pub mod models;
pub mod services;
