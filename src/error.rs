//! Engine error taxonomy
//!
//! Errors split into two families: system-level errors (configuration,
//! linguistic model) that abort engine initialization before any analysis,
//! and per-item errors (invalid input, internal faults) that are isolated to
//! one statement's result slot during batch processing.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level engine error
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid input text - recoverable, reported per item
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Invalid or incomplete ruleset - fatal at startup
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Linguistic model failed to load - fatal at startup
    #[error("linguistic model unavailable: {0}")]
    ModelUnavailable(String),

    /// Unexpected internal fault during one statement's processing
    #[error("analysis failure: {0}")]
    AnalysisFailure(String),
}

impl EngineError {
    /// Stable error code for item-boundary error descriptors
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Input(err) => err.code(),
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            Self::AnalysisFailure(_) => "ANALYSIS_PANIC",
        }
    }
}

/// Errors for statement text that cannot be analyzed
#[derive(Debug, Clone, Copy, Error)]
pub enum InputError {
    /// Text is empty or whitespace-only
    #[error("text is empty or whitespace-only")]
    Empty,

    /// Text exceeds the configured length limit
    #[error("text exceeds {limit} characters (got {got})")]
    TooLong {
        /// Configured maximum length
        limit: usize,
        /// Actual length of the submitted text
        got: usize,
    },
}

impl InputError {
    /// Stable error code for error descriptors
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY_INPUT",
            Self::TooLong { .. } => "INPUT_TOO_LONG",
        }
    }
}

/// Errors raised while loading or validating a ruleset document
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ruleset file could not be read
    #[error("cannot read ruleset {path}: {source}")]
    Read {
        /// Path of the document
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Ruleset document is not valid TOML / does not match the schema
    #[error("malformed ruleset document: {0}")]
    Parse(#[from] Box<toml::de::Error>),

    /// Thresholds violate `high_risk < ready` within [0, 100]
    #[error("invalid thresholds: high_risk={high_risk}, ready={ready}")]
    InvalidThresholds {
        /// Configured lower threshold
        high_risk: f64,
        /// Configured upper threshold
        ready: f64,
    },

    /// A detector category has no rule covering it
    #[error("no rule covers category '{0}'")]
    UncoveredCategory(String),

    /// An assumption dimension has no keyword lexicon
    #[error("no lexicon for assumption dimension '{0}'")]
    UncoveredDimension(String),

    /// A required fallback template is missing
    #[error("missing fallback template for '{0}'")]
    MissingFallbackTemplate(String),

    /// A rule weight is outside the accepted range
    #[error("rule '{id}' has invalid weight {weight}")]
    InvalidWeight {
        /// Offending rule id
        id: String,
        /// Configured weight
        weight: f64,
    },

    /// A testability phrase pattern is not a valid regex
    #[error("rule '{id}' has invalid pattern: {source}")]
    InvalidPattern {
        /// Offending rule id
        id: String,
        /// Regex compilation error
        source: regex::Error,
    },

    /// Component weights do not form a usable weighting
    #[error("component weights must be positive (lexical={lexical}, testability={testability}, reference={reference})")]
    InvalidComponentWeights {
        /// Lexical component weight
        lexical: f64,
        /// Testability component weight
        testability: f64,
        /// Reference component weight
        reference: f64,
    },
}
