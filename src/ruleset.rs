//! Ruleset document loading and validation
//!
//! The ruleset is a versioned TOML document: keyword lists, severity
//! weights, assumption lexicons, action triggers, thresholds, and feedback
//! templates. It is loaded once at engine construction and shared read-only
//! by all concurrent analyses; replacing it is an explicit reload, never an
//! implicit mutation.
//!
//! The schema is a contract: unknown fields are ignored, missing required
//! fields abort loading with a configuration error, and every category a
//! detector relies on must be covered or loading fails - detection never
//! silently skips a missing rule.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::core::models::{AssumptionDimension, IssueCategory, StatementKind};
use crate::error::{ConfigError, EngineError};

/// The built-in ruleset document, embedded at compile time
const BUILTIN_RULES: &str = include_str!("../rules/default.toml");

// ---------------------------------------------------------------------------
// Raw document schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RuleSetDoc {
    version: String,
    thresholds: Thresholds,
    weights: Weights,
    confidence: ConfidenceTuning,
    #[serde(default)]
    limits: Limits,
    rules: Vec<RuleCfg>,
    dimensions: Vec<DimensionCfg>,
    #[serde(default)]
    actions: Vec<ActionCfg>,
    #[serde(default)]
    environment_check: Option<EnvironmentCheckCfg>,
    #[serde(default)]
    templates: Vec<TemplateCfg>,
    fallback_templates: FallbackTemplates,
    #[serde(default)]
    classifier: Option<ClassifierCfg>,
}

/// Readiness category thresholds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Thresholds {
    /// Scores at or above this value are READY
    pub ready: f64,
    /// Scores below this value are HIGH_RISK
    pub high_risk: f64,
}

/// Component weighting for the final score
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Weights {
    /// Weight of the lexical component
    pub lexical: f64,
    /// Weight of the testability component
    pub testability: f64,
    /// Weight of the reference component
    pub reference: f64,
    /// Scale applied to WEAK assumption weights in the penalty
    pub weak_assumption_factor: f64,
}

/// Tuning for the confidence estimator
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConfidenceTuning {
    /// Ambiguous attachments above this count trip the parse signal
    pub max_ambiguous_attachments: usize,
    /// Word counts below this trip the anchoring signal
    pub min_anchor_tokens: usize,
}

/// Input limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Limits {
    /// Maximum statement length in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

const fn default_max_chars() -> usize {
    10_000
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_chars: default_max_chars() }
    }
}

#[derive(Debug, Deserialize)]
struct RuleCfg {
    id: String,
    category: IssueCategory,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    structural: bool,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct DimensionCfg {
    dimension: AssumptionDimension,
    keywords: Vec<String>,
    weight: f64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ActionCfg {
    trigger: String,
    implies: Vec<ImpliedCfg>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImpliedCfg {
    dimension: AssumptionDimension,
    description: String,
    #[serde(default)]
    unless: Vec<String>,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentCheckCfg {
    ui_actions: Vec<String>,
    indicators: Vec<String>,
    description: String,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct TemplateCfg {
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    category: Option<IssueCategory>,
    #[serde(default)]
    dimension: Option<AssumptionDimension>,
    impact: String,
    question: String,
    #[serde(default)]
    terms: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
struct FallbackTemplates {
    issue: TemplatePair,
    assumption: TemplatePair,
}

/// An impact/question template pair
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatePair {
    /// Impact explanation with `{text}` / `{dimension}` placeholders
    pub impact: String,
    /// Clarification question with the same placeholders
    pub question: String,
}

#[derive(Debug, Deserialize)]
struct ClassifierCfg {
    requirement_patterns: Vec<String>,
    test_case_patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Compiled ruleset
// ---------------------------------------------------------------------------

/// A keyword rule compiled for n-gram matching
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Rule identifier
    pub id: String,
    /// Issue category this rule produces
    pub category: IssueCategory,
    /// Keyword phrases, each a sequence of lowercased words
    pub phrases: Vec<Vec<String>>,
    /// Severity weight
    pub weight: f64,
}

/// A compiled testability phrase rule
#[derive(Debug, Clone)]
pub struct PhraseRule {
    /// Rule identifier
    pub id: String,
    /// Case-insensitive pattern matched against the raw text
    pub regex: Regex,
    /// Severity weight
    pub weight: f64,
}

/// The structural subject-verb-object completeness rule
#[derive(Debug, Clone)]
pub struct StructuralRule {
    /// Rule identifier
    pub id: String,
    /// Severity weight
    pub weight: f64,
}

/// Keyword lexicon for one assumption dimension
#[derive(Debug, Clone)]
pub struct DimensionLexicon {
    /// The dimension this lexicon detects
    pub dimension: AssumptionDimension,
    /// Keyword phrases, each a sequence of lowercased words
    pub phrases: Vec<Vec<String>>,
    /// Penalty weight for assumptions in this dimension
    pub weight: f64,
    /// Description template with a `{text}` placeholder
    pub description: String,
}

/// One assumption implied by an action trigger
#[derive(Debug, Clone)]
pub struct ImpliedAssumption {
    /// Dimension of the implied assumption
    pub dimension: AssumptionDimension,
    /// What the action silently relies on
    pub description: String,
    /// Phrases that make the assumption explicit and suppress it
    pub unless: Vec<String>,
    /// Optional dedicated clarification question
    pub question: Option<String>,
}

/// A trigger word/phrase mapped to its implied assumptions
#[derive(Debug, Clone)]
pub struct ActionTrigger {
    /// Trigger phrase as a sequence of lowercased words
    pub trigger: Vec<String>,
    /// Assumptions implied by the trigger
    pub implies: Vec<ImpliedAssumption>,
}

/// UI-interaction-without-environment check
#[derive(Debug, Clone)]
pub struct EnvironmentCheck {
    /// UI interaction verbs
    pub ui_actions: Vec<String>,
    /// Environment terms whose presence satisfies the check
    pub indicators: Vec<String>,
    /// Description of the implied environment assumption
    pub description: String,
    /// Penalty weight
    pub weight: f64,
}

/// A feedback template with optional per-term question overrides
#[derive(Debug, Clone)]
pub struct Template {
    /// Impact explanation
    pub impact: String,
    /// Clarification question
    pub question: String,
    /// Per-term question overrides, keyed by lowercased matched text
    pub terms: HashMap<String, String>,
}

/// Feedback template store with fallback chain
#[derive(Debug, Clone)]
pub struct TemplateStore {
    by_rule: HashMap<String, Template>,
    by_category: HashMap<IssueCategory, Template>,
    by_dimension: HashMap<AssumptionDimension, Template>,
    issue_fallback: TemplatePair,
    assumption_fallback: TemplatePair,
}

impl TemplateStore {
    /// Template for a rule id, if configured
    #[must_use]
    pub fn for_rule(&self, rule: &str) -> Option<&Template> {
        self.by_rule.get(rule)
    }

    /// Template for an issue category, if configured
    #[must_use]
    pub fn for_category(&self, category: IssueCategory) -> Option<&Template> {
        self.by_category.get(&category)
    }

    /// Template for an assumption dimension, if configured
    #[must_use]
    pub fn for_dimension(&self, dimension: AssumptionDimension) -> Option<&Template> {
        self.by_dimension.get(&dimension)
    }

    /// Generic issue fallback (always present)
    #[must_use]
    pub const fn issue_fallback(&self) -> &TemplatePair {
        &self.issue_fallback
    }

    /// Generic assumption fallback (always present)
    #[must_use]
    pub const fn assumption_fallback(&self) -> &TemplatePair {
        &self.assumption_fallback
    }
}

/// Statement kind classifier compiled from indicator patterns
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    requirement: Vec<Regex>,
    test_case: Vec<Regex>,
}

impl Classifier {
    /// Classify text by counting indicator pattern hits
    #[must_use]
    pub fn classify(&self, text: &str) -> StatementKind {
        let requirement = self.requirement.iter().filter(|r| r.is_match(text)).count();
        let test_case = self.test_case.iter().filter(|r| r.is_match(text)).count();
        if requirement > test_case {
            StatementKind::Requirement
        } else if test_case > requirement {
            StatementKind::TestCase
        } else {
            StatementKind::Unknown
        }
    }
}

/// A loaded, validated, compiled ruleset
///
/// Immutable once constructed; shared read-only by concurrent analyses.
#[derive(Debug, Clone)]
pub struct RuleSet {
    version: String,
    /// Readiness thresholds
    pub thresholds: Thresholds,
    /// Component weights
    pub weights: Weights,
    /// Confidence tuning
    pub confidence: ConfidenceTuning,
    /// Input limits
    pub limits: Limits,
    /// Keyword rules (subjective terms, weak modality, references)
    pub keyword_rules: Vec<KeywordRule>,
    /// Testability phrase rules
    pub phrase_rules: Vec<PhraseRule>,
    /// The structural completeness rule
    pub structural_rule: StructuralRule,
    /// Assumption dimension lexicons
    pub dimensions: Vec<DimensionLexicon>,
    /// Action triggers
    pub actions: Vec<ActionTrigger>,
    /// UI environment check, if configured
    pub environment_check: Option<EnvironmentCheck>,
    /// Feedback templates
    pub templates: TemplateStore,
    /// Statement kind classifier
    pub classifier: Classifier,
}

impl RuleSet {
    /// The built-in ruleset shipped with the crate
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Parse and validate a ruleset document from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let doc: RuleSetDoc =
            toml::from_str(content).map_err(|e| ConfigError::Parse(Box::new(e)))?;
        Ok(Self::compile(doc)?)
    }

    /// Load a ruleset document from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read { path: path.to_path_buf(), source }
        })?;
        Self::from_toml_str(&content)
    }

    /// Ruleset version string
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Keyword rules for one category
    #[must_use]
    pub fn keyword_rules_for(&self, category: IssueCategory) -> impl Iterator<Item = &KeywordRule> {
        self.keyword_rules.iter().filter(move |r| r.category == category)
    }

    fn compile(doc: RuleSetDoc) -> Result<Self, ConfigError> {
        validate_thresholds(doc.thresholds)?;
        validate_weights(doc.weights)?;

        let mut keyword_rules = Vec::new();
        let mut phrase_rules = Vec::new();
        let mut structural_rule = None;
        for rule in &doc.rules {
            if rule.weight < 0.0 || !rule.weight.is_finite() {
                return Err(ConfigError::InvalidWeight {
                    id: rule.id.clone(),
                    weight: rule.weight,
                });
            }
            if rule.structural {
                structural_rule = Some(StructuralRule {
                    id: rule.id.clone(),
                    weight: rule.weight,
                });
                continue;
            }
            if !rule.keywords.is_empty() {
                keyword_rules.push(KeywordRule {
                    id: rule.id.clone(),
                    category: rule.category,
                    phrases: split_phrases(&rule.keywords),
                    weight: rule.weight,
                });
            }
            for pattern in &rule.patterns {
                let regex = compile_insensitive(pattern).map_err(|source| {
                    ConfigError::InvalidPattern { id: rule.id.clone(), source }
                })?;
                phrase_rules.push(PhraseRule {
                    id: rule.id.clone(),
                    regex,
                    weight: rule.weight,
                });
            }
        }

        // Detector coverage: silence is a configuration error, not a skip
        for category in [
            IssueCategory::SubjectiveTerm,
            IssueCategory::WeakModality,
            IssueCategory::UndefinedReference,
        ] {
            if !keyword_rules.iter().any(|r| r.category == category) {
                return Err(ConfigError::UncoveredCategory(category.to_string()));
            }
        }
        let structural_rule = structural_rule
            .ok_or_else(|| ConfigError::UncoveredCategory(IssueCategory::TestabilityGap.to_string()))?;

        let dimensions: Vec<DimensionLexicon> = doc
            .dimensions
            .iter()
            .map(|d| DimensionLexicon {
                dimension: d.dimension,
                phrases: split_phrases(&d.keywords),
                weight: d.weight,
                description: d.description.clone(),
            })
            .collect();
        for dimension in [
            AssumptionDimension::Environment,
            AssumptionDimension::Data,
            AssumptionDimension::State,
        ] {
            if !dimensions.iter().any(|d| d.dimension == dimension) {
                return Err(ConfigError::UncoveredDimension(dimension.to_string()));
            }
        }

        let actions = doc
            .actions
            .iter()
            .map(|a| ActionTrigger {
                trigger: split_words(&a.trigger),
                implies: a
                    .implies
                    .iter()
                    .map(|i| ImpliedAssumption {
                        dimension: i.dimension,
                        description: i.description.clone(),
                        unless: i.unless.iter().map(|u| u.to_lowercase()).collect(),
                        question: i.question.clone(),
                    })
                    .collect(),
            })
            .collect();

        let environment_check = doc.environment_check.map(|e| EnvironmentCheck {
            ui_actions: e.ui_actions.iter().map(|a| a.to_lowercase()).collect(),
            indicators: e.indicators.iter().map(|i| i.to_lowercase()).collect(),
            description: e.description,
            weight: e.weight,
        });

        let templates = compile_templates(&doc.templates, doc.fallback_templates)?;

        let classifier = match doc.classifier {
            Some(cfg) => Classifier {
                requirement: compile_patterns(&cfg.requirement_patterns)?,
                test_case: compile_patterns(&cfg.test_case_patterns)?,
            },
            None => Classifier::default(),
        };

        Ok(Self {
            version: doc.version,
            thresholds: doc.thresholds,
            weights: doc.weights,
            confidence: doc.confidence,
            limits: doc.limits,
            keyword_rules,
            phrase_rules,
            structural_rule,
            dimensions,
            actions,
            environment_check,
            templates,
            classifier,
        })
    }
}

fn validate_thresholds(thresholds: Thresholds) -> Result<(), ConfigError> {
    let Thresholds { ready, high_risk } = thresholds;
    let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
    if !in_range(ready) || !in_range(high_risk) || high_risk >= ready {
        return Err(ConfigError::InvalidThresholds { high_risk, ready });
    }
    Ok(())
}

fn validate_weights(weights: Weights) -> Result<(), ConfigError> {
    let Weights { lexical, testability, reference, weak_assumption_factor } = weights;
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(lexical) || !positive(testability) || !positive(reference) {
        return Err(ConfigError::InvalidComponentWeights { lexical, testability, reference });
    }
    if !weak_assumption_factor.is_finite() || !(0.0..=1.0).contains(&weak_assumption_factor) {
        return Err(ConfigError::InvalidWeight {
            id: "weak_assumption_factor".to_string(),
            weight: weak_assumption_factor,
        });
    }
    Ok(())
}

fn compile_templates(
    configured: &[TemplateCfg],
    fallbacks: FallbackTemplates,
) -> Result<TemplateStore, ConfigError> {
    for (name, pair) in [("issue", &fallbacks.issue), ("assumption", &fallbacks.assumption)] {
        if pair.impact.trim().is_empty() || pair.question.trim().is_empty() {
            return Err(ConfigError::MissingFallbackTemplate(name.to_string()));
        }
    }

    let mut by_rule = HashMap::new();
    let mut by_category = HashMap::new();
    let mut by_dimension = HashMap::new();
    for cfg in configured {
        let template = Template {
            impact: cfg.impact.clone(),
            question: cfg.question.clone(),
            terms: cfg.terms.iter().map(|(k, v)| (k.to_lowercase(), v.clone())).collect(),
        };
        if let Some(rule) = &cfg.rule {
            by_rule.insert(rule.clone(), template.clone());
        }
        if let Some(category) = cfg.category {
            by_category.insert(category, template.clone());
        }
        if let Some(dimension) = cfg.dimension {
            by_dimension.insert(dimension, template);
        }
    }

    Ok(TemplateStore {
        by_rule,
        by_category,
        by_dimension,
        issue_fallback: fallbacks.issue,
        assumption_fallback: fallbacks.assumption,
    })
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            compile_insensitive(p).map_err(|source| ConfigError::InvalidPattern {
                id: p.clone(),
                source,
            })
        })
        .collect()
}

fn compile_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){pattern}"))
}

fn split_phrases(keywords: &[String]) -> Vec<Vec<String>> {
    keywords.iter().map(|k| split_words(k)).collect()
}

fn split_words(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ruleset_loads() {
        let rules = RuleSet::builtin().unwrap();
        assert!(!rules.version().is_empty());
        assert!(rules.thresholds.high_risk < rules.thresholds.ready);
        assert!(rules.keyword_rules_for(IssueCategory::SubjectiveTerm).next().is_some());
        assert!(rules.keyword_rules_for(IssueCategory::WeakModality).next().is_some());
        assert!(rules.keyword_rules_for(IssueCategory::UndefinedReference).next().is_some());
        assert!(!rules.phrase_rules.is_empty());
        assert!(!rules.actions.is_empty());
        assert!(rules.environment_check.is_some());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut doc = String::from(BUILTIN_RULES);
        doc.push_str("\n[future_section]\nsome_key = 1\n");
        assert!(RuleSet::from_toml_str(&doc).is_ok());
    }

    #[test]
    fn test_missing_thresholds_fails() {
        let doc = BUILTIN_RULES.replace("[thresholds]", "[thresholds_gone]");
        let err = RuleSet::from_toml_str(&doc).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_inverted_thresholds_fail() {
        let doc = BUILTIN_RULES.replace("ready = 70.0", "ready = 30.0");
        let err = RuleSet::from_toml_str(&doc).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Configuration(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_phrase_splitting() {
        let phrases = split_phrases(&["if possible".to_string(), "should".to_string()]);
        assert_eq!(phrases[0], vec!["if", "possible"]);
        assert_eq!(phrases[1], vec!["should"]);
    }
}
