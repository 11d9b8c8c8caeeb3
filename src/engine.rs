//! Analysis engine lifecycle
//!
//! The engine owns the process-wide shared state: a validated ruleset and
//! the linguistic lexicon, both loaded once at construction and shared
//! read-only by concurrent analyses. Replacing the ruleset is an explicit
//! reload that swaps an `Arc` snapshot; analyses in flight keep the
//! snapshot they started with, so a reload can never corrupt a running
//! analysis.
//!
//! # Examples
//!
//! ```
//! use reqgate::engine::Engine;
//!
//! let engine = Engine::builtin().unwrap();
//! let analysis = engine.analyze("The system should respond fast.").unwrap();
//! assert!(!analysis.issues.is_empty());
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, RwLock};

use log::{debug, info};
use rayon::prelude::*;

use crate::batch::{BatchItem, BatchOutcome, BatchReport, CancelToken, ItemError};
use crate::core::models::{Analysis, ReadinessCategory};
use crate::core::services;
use crate::error::{EngineError, InputError};
use crate::nlp::{Lexicon, Preprocessor};
use crate::ruleset::RuleSet;

/// The analysis engine
///
/// Cheap to share behind an `Arc`; all analysis entry points take `&self`.
#[derive(Debug)]
pub struct Engine {
    rules: RwLock<Arc<RuleSet>>,
    preprocessor: Preprocessor,
}

impl Engine {
    /// Create an engine over a loaded ruleset and the built-in lexicon
    ///
    /// Fails with `ModelUnavailable` if the lexicon cannot be loaded;
    /// configuration errors surface earlier, when the ruleset document is
    /// parsed. Both failures abort initialization before any analysis.
    pub fn new(rules: RuleSet) -> Result<Self, EngineError> {
        let lexicon = Lexicon::builtin()?.clone();
        Ok(Self::with_model(rules, lexicon))
    }

    /// Create an engine with both the ruleset and an explicit lexicon
    #[must_use]
    pub fn with_model(rules: RuleSet, lexicon: Lexicon) -> Self {
        info!(
            "engine initialized (ruleset v{}, lexicon v{})",
            rules.version(),
            lexicon.version()
        );
        Self {
            rules: RwLock::new(Arc::new(rules)),
            preprocessor: Preprocessor::new(Arc::new(lexicon)),
        }
    }

    /// Create an engine from the built-in ruleset and lexicon
    pub fn builtin() -> Result<Self, EngineError> {
        Self::new(RuleSet::builtin()?)
    }

    /// Version of the currently active ruleset
    #[must_use]
    pub fn ruleset_version(&self) -> String {
        self.snapshot().version().to_string()
    }

    /// Atomically replace the active ruleset
    ///
    /// The document has already been validated by the loader; the swap
    /// itself cannot fail. Reloading an unchanged document leaves analysis
    /// results identical.
    pub fn reload(&self, rules: RuleSet) {
        let rules = Arc::new(rules);
        let previous = {
            let mut guard = match self.rules.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            std::mem::replace(&mut *guard, rules)
        };
        info!(
            "ruleset reloaded (v{} -> v{})",
            previous.version(),
            self.ruleset_version()
        );
    }

    /// Analyze a single statement
    ///
    /// Pure and synchronous; deterministic for identical (text, ruleset
    /// version, lexicon version).
    pub fn analyze(&self, text: &str) -> Result<Analysis, EngineError> {
        self.analyze_as(text, "")
    }

    /// Analyze a single statement under a correlation identifier
    pub fn analyze_as(&self, text: &str, id: &str) -> Result<Analysis, EngineError> {
        let rules = self.snapshot();
        self.run_pipeline(&rules, id, text)
    }

    /// Analyze a batch of statements in parallel
    ///
    /// Items are independent: per-item input errors and internal faults
    /// occupy only that item's result slot and never abort siblings.
    /// Cancellation is cooperative: items not yet scheduled when the token
    /// trips are reported as canceled descriptors, while completed results
    /// are kept.
    #[must_use]
    pub fn analyze_batch(&self, items: &[BatchItem], cancel: &CancelToken) -> BatchReport {
        let rules = self.snapshot();
        debug!("analyzing batch of {} statements", items.len());

        let results = items
            .par_iter()
            .map(|item| {
                if cancel.is_canceled() {
                    return BatchOutcome::canceled(&item.id);
                }
                self.run_item(&rules, item)
            })
            .collect();

        BatchReport { results }
    }

    /// Run one batch item, catching unexpected faults at the item boundary
    fn run_item(&self, rules: &RuleSet, item: &BatchItem) -> BatchOutcome {
        let outcome =
            catch_unwind(AssertUnwindSafe(|| self.run_pipeline(rules, &item.id, &item.text)));
        match outcome {
            Ok(Ok(analysis)) => BatchOutcome::Analyzed { analysis },
            Ok(Err(err)) => BatchOutcome::Failed {
                error: ItemError {
                    id: item.id.clone(),
                    code: err.code().to_string(),
                    message: err.to_string(),
                },
            },
            Err(panic) => BatchOutcome::Failed {
                error: ItemError {
                    id: item.id.clone(),
                    code: "ANALYSIS_PANIC".to_string(),
                    message: panic_message(&panic),
                },
            },
        }
    }

    /// The full single-statement pipeline, strictly downstream
    fn run_pipeline(
        &self,
        rules: &RuleSet,
        id: &str,
        text: &str,
    ) -> Result<Analysis, EngineError> {
        if text.len() > rules.limits.max_chars {
            return Err(EngineError::Input(InputError::TooLong {
                limit: rules.limits.max_chars,
                got: text.len(),
            }));
        }

        let parsed = self.preprocessor.parse(text)?;
        debug!(
            "preprocessed {} tokens across {} sentences",
            parsed.stats.tokens, parsed.stats.sentences
        );

        let mut issues = services::detect_issues(rules, &parsed);
        let mut assumptions = services::infer_assumptions(rules, &parsed);
        let confidence_profile = services::estimate(rules, &parsed);
        let breakdown = services::score(rules, &issues, &assumptions);
        services::attach_feedback(rules, &mut issues, &mut assumptions);

        let category = breakdown.category;
        let provisional =
            confidence_profile.has_low_signal() && category == ReadinessCategory::HighRisk;

        Ok(Analysis {
            id: id.to_string(),
            score: breakdown.score,
            category,
            breakdown,
            confidence_profile,
            issues,
            assumptions,
            stats: parsed.stats,
            kind: rules.classifier.classify(text),
            provisional,
            ruleset_version: rules.version().to_string(),
        })
    }

    /// Snapshot of the active ruleset; analyses hold it for their full run
    fn snapshot(&self) -> Arc<RuleSet> {
        match self.rules.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock only means a writer panicked mid-reload; the
            // stored Arc is still a complete, validated ruleset.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic.downcast_ref::<&str>().map_or_else(
        || {
            panic
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "unexpected internal fault".to_string())
        },
        |s| (*s).to_string(),
    )
}
