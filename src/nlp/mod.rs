//! Linguistic preprocessing layer
//!
//! Tokenization, part-of-speech tagging, and a shallow dependency pass over
//! statement text, driven by a loadable closed-class lexicon.

pub mod lexicon;
pub mod preprocess;
pub mod token;

pub use lexicon::Lexicon;
pub use preprocess::{ParsedStatement, Preprocessor, SentenceParse, TextStats};
pub use token::{DepArc, DepRel, PosTag, Span, Token};
