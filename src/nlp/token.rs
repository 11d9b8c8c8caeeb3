//! Token types for preprocessed statement text

use serde::{Deserialize, Serialize};

/// A span in statement text (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains another
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Coarse part-of-speech tag assigned by the lexicon tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Personal pronoun (it, they, ...)
    Pronoun,
    /// Demonstrative (this, that, these, those)
    Demonstrative,
    /// Main verb
    Verb,
    /// Auxiliary verb (is, has, was, ...)
    Aux,
    /// Modal verb (should, could, may, ...)
    Modal,
    /// Adjective
    Adjective,
    /// Adverb
    Adverb,
    /// Determiner (the, a, an, ...)
    Determiner,
    /// Preposition (in, within, for, ...)
    Preposition,
    /// Conjunction / subordinator (and, when, if, ...)
    Conjunction,
    /// Numeric literal
    Number,
    /// Punctuation
    Punct,
    /// Anything the tagger cannot classify
    Other,
}

impl PosTag {
    /// Whether this tag can head or fill a noun phrase
    #[must_use]
    pub const fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }

    /// Whether this tag is a referring expression candidate
    #[must_use]
    pub const fn is_referential(self) -> bool {
        matches!(self, Self::Pronoun | Self::Demonstrative)
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Noun => "noun",
            Self::ProperNoun => "proper_noun",
            Self::Pronoun => "pronoun",
            Self::Demonstrative => "demonstrative",
            Self::Verb => "verb",
            Self::Aux => "aux",
            Self::Modal => "modal",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Determiner => "determiner",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Number => "number",
            Self::Punct => "punct",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// Grammatical relation in the shallow dependency pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRel {
    /// Nominal subject of the main verb
    Nsubj,
    /// Direct object of the main verb
    Dobj,
    /// Auxiliary or modal attached to the main verb
    Aux,
    /// Determiner attached to a nominal
    Det,
    /// Preposition attached to a verb or nominal head
    Prep,
    /// Object of a preposition
    Pobj,
    /// Token inside a sentence-initial condition clause
    Advcl,
}

/// A single token with its tag and position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Original surface text
    pub text: String,
    /// Lowercased form used for rule matching
    pub lower: String,
    /// Byte span in the submitted text
    pub span: Span,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Index of the sentence this token belongs to
    pub sentence: usize,
}

impl Token {
    /// Whether the token is a word (not punctuation or number)
    #[must_use]
    pub const fn is_word(&self) -> bool {
        !matches!(self.pos, PosTag::Punct | PosTag::Number)
    }
}

/// One dependency arc between two token indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepArc {
    /// Index of the head token
    pub head: usize,
    /// Index of the dependent token
    pub dependent: usize,
    /// Relation label
    pub relation: DepRel,
}
