//! Linguistic model loading
//!
//! The "model" is a versioned closed-class lexicon document: word lists for
//! determiners, pronouns, prepositions, modals, auxiliaries, and a verb
//! vocabulary. A built-in document ships with the crate; an external
//! document can be loaded instead. Either way the model is loaded once at
//! engine construction and shared read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::EngineError;

/// The built-in lexicon document, embedded at compile time
const BUILTIN_LEXICON: &str = include_str!("../../rules/lexicon.toml");

static BUILTIN: Lazy<Result<Lexicon, String>> =
    Lazy::new(|| Lexicon::from_toml_str(BUILTIN_LEXICON).map_err(|e| e.to_string()));

/// Raw document schema (unknown fields ignored)
#[derive(Debug, Deserialize)]
struct LexiconDoc {
    version: String,
    determiners: Vec<String>,
    pronouns: Vec<String>,
    demonstratives: Vec<String>,
    prepositions: Vec<String>,
    conjunctions: Vec<String>,
    subordinators: Vec<String>,
    modals: Vec<String>,
    auxiliaries: Vec<String>,
    verbs: Vec<String>,
    adjectives: Vec<String>,
}

/// Loaded closed-class lexicon shared by all analyses
#[derive(Debug, Clone)]
pub struct Lexicon {
    version: String,
    determiners: HashSet<String>,
    pronouns: HashSet<String>,
    demonstratives: HashSet<String>,
    prepositions: HashSet<String>,
    conjunctions: HashSet<String>,
    subordinators: HashSet<String>,
    modals: HashSet<String>,
    auxiliaries: HashSet<String>,
    verbs: HashSet<String>,
    adjectives: HashSet<String>,
}

impl Lexicon {
    /// The built-in lexicon shipped with the crate
    ///
    /// Parsed once per process. A malformed embedded document surfaces as
    /// `ModelUnavailable` at engine construction, never per call.
    pub fn builtin() -> Result<&'static Self, EngineError> {
        match &*BUILTIN {
            Ok(lexicon) => Ok(lexicon),
            Err(message) => Err(EngineError::ModelUnavailable(message.clone())),
        }
    }

    /// Parse a lexicon document from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let doc: LexiconDoc = toml::from_str(content)
            .map_err(|e| EngineError::ModelUnavailable(e.to_string()))?;
        Ok(Self::from_doc(doc))
    }

    /// Load a lexicon document from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ModelUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    fn from_doc(doc: LexiconDoc) -> Self {
        Self {
            version: doc.version,
            determiners: to_set(doc.determiners),
            pronouns: to_set(doc.pronouns),
            demonstratives: to_set(doc.demonstratives),
            prepositions: to_set(doc.prepositions),
            conjunctions: to_set(doc.conjunctions),
            subordinators: to_set(doc.subordinators),
            modals: to_set(doc.modals),
            auxiliaries: to_set(doc.auxiliaries),
            verbs: inflect_verbs(doc.verbs),
            adjectives: to_set(doc.adjectives),
        }
    }

    /// Model version string
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Lookup helpers, all over lowercased forms
    #[must_use]
    pub fn is_determiner(&self, word: &str) -> bool {
        self.determiners.contains(word)
    }

    /// Check for personal pronouns
    #[must_use]
    pub fn is_pronoun(&self, word: &str) -> bool {
        self.pronouns.contains(word)
    }

    /// Check for demonstratives
    #[must_use]
    pub fn is_demonstrative(&self, word: &str) -> bool {
        self.demonstratives.contains(word)
    }

    /// Check for prepositions
    #[must_use]
    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }

    /// Check for coordinating conjunctions
    #[must_use]
    pub fn is_conjunction(&self, word: &str) -> bool {
        self.conjunctions.contains(word)
    }

    /// Check for clause subordinators (given, when, if, ...)
    #[must_use]
    pub fn is_subordinator(&self, word: &str) -> bool {
        self.subordinators.contains(word)
    }

    /// Check for modal verbs
    #[must_use]
    pub fn is_modal(&self, word: &str) -> bool {
        self.modals.contains(word)
    }

    /// Check for auxiliary verbs
    #[must_use]
    pub fn is_auxiliary(&self, word: &str) -> bool {
        self.auxiliaries.contains(word)
    }

    /// Check for known verbs (any inflected form)
    #[must_use]
    pub fn is_verb(&self, word: &str) -> bool {
        self.verbs.contains(word)
    }

    /// Check for known adjectives
    #[must_use]
    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }
}

fn to_set(words: Vec<String>) -> HashSet<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// Expand base verbs into their regular inflected forms
///
/// Covers -s/-es, -d/-ed and -ing with final-e dropping. Irregular forms
/// must be listed explicitly in the document.
fn inflect_verbs(bases: Vec<String>) -> HashSet<String> {
    let mut set = HashSet::new();
    for base in bases {
        let base = base.to_lowercase();
        let stem = base.strip_suffix('e').unwrap_or(&base).to_string();
        if base.ends_with('s')
            || base.ends_with('x')
            || base.ends_with('z')
            || base.ends_with("ch")
            || base.ends_with("sh")
        {
            set.insert(format!("{base}es"));
        } else {
            set.insert(format!("{base}s"));
        }
        if base.ends_with('e') {
            set.insert(format!("{base}d"));
        } else {
            set.insert(format!("{base}ed"));
        }
        set.insert(format!("{stem}ing"));
        set.insert(base);
    }
    set
}
