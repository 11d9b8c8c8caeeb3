//! Linguistic preprocessing
//!
//! Turns raw statement text into tokens with part-of-speech tags, sentence
//! boundaries, and a shallow dependency pass (main verb, subject, object,
//! prepositional attachments, condition clauses). The pass is deterministic
//! for identical input and lexicon version; prepositional phrases with more
//! than one plausible head are counted as ambiguous attachments rather than
//! resolved by guess.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{EngineError, InputError};
use crate::nlp::lexicon::Lexicon;
use crate::nlp::token::{DepArc, DepRel, PosTag, Span, Token};

/// Basic statistics about the preprocessed text
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TextStats {
    /// Number of sentences
    pub sentences: usize,
    /// Number of tokens including punctuation
    pub tokens: usize,
    /// Number of word tokens
    pub words: usize,
    /// Number of distinct lowercased word forms
    pub unique_words: usize,
}

/// Parse results for one sentence
#[derive(Debug, Clone, Copy)]
pub struct SentenceParse {
    /// First token index (inclusive)
    pub start: usize,
    /// Last token index (exclusive)
    pub end: usize,
    /// Main verb token index, if a verb was found
    pub main_verb: Option<usize>,
    /// Subject token index
    pub subject: Option<usize>,
    /// Direct object token index
    pub object: Option<usize>,
    /// Token range of a sentence-initial condition clause, if any
    pub condition: Option<(usize, usize)>,
}

impl SentenceParse {
    /// Whether the sentence has an observable action with a participant
    #[must_use]
    pub const fn has_actionable_clause(&self) -> bool {
        self.main_verb.is_some() && (self.subject.is_some() || self.object.is_some())
    }

    /// Whether a token index falls inside the condition clause
    #[must_use]
    pub fn in_condition(&self, index: usize) -> bool {
        self.condition.is_some_and(|(start, end)| index >= start && index < end)
    }
}

/// A fully preprocessed statement
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    /// The submitted text
    pub text: String,
    /// Token sequence with tags and spans
    pub tokens: Vec<Token>,
    /// Per-sentence parse results
    pub sentences: Vec<SentenceParse>,
    /// Dependency arcs across the statement
    pub arcs: Vec<DepArc>,
    /// Count of prepositional phrases with more than one plausible head
    pub ambiguous_attachments: usize,
    /// Text statistics
    pub stats: TextStats,
}

impl ParsedStatement {
    /// The sentence parse a token belongs to
    #[must_use]
    pub fn sentence_of(&self, index: usize) -> Option<&SentenceParse> {
        self.tokens.get(index).and_then(|t| self.sentences.get(t.sentence))
    }

    /// Whether a token is the main verb, subject, or object of its sentence
    #[must_use]
    pub fn is_core_argument(&self, index: usize) -> bool {
        self.sentence_of(index).is_some_and(|s| {
            s.main_verb == Some(index) || s.subject == Some(index) || s.object == Some(index)
        })
    }
}

/// Lexicon-driven preprocessor
///
/// Stateless per call; the lexicon is shared read-only.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    lexicon: Arc<Lexicon>,
}

impl Preprocessor {
    /// Create a preprocessor over a loaded lexicon
    #[must_use]
    pub const fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// The lexicon this preprocessor tags with
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Preprocess raw statement text
    ///
    /// Fails with an input error on empty or whitespace-only text. The
    /// returned structure is derived; the submitted text is never mutated.
    pub fn parse(&self, text: &str) -> Result<ParsedStatement, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::Input(InputError::Empty));
        }

        let mut tokens = self.tokenize(text);
        self.retag_in_context(&mut tokens);
        let sentence_count = tokens.last().map_or(0, |t| t.sentence + 1);

        let mut sentences = Vec::with_capacity(sentence_count);
        let mut arcs = Vec::new();
        let mut ambiguous = 0;
        let mut start = 0;
        for index in 0..sentence_count {
            let end = tokens[start..]
                .iter()
                .position(|t| t.sentence != index)
                .map_or(tokens.len(), |offset| start + offset);
            let parse = self.parse_sentence(&tokens, start, end, &mut arcs, &mut ambiguous);
            sentences.push(parse);
            start = end;
        }

        let stats = compute_stats(&tokens, sentence_count);
        Ok(ParsedStatement {
            text: text.to_string(),
            tokens,
            sentences,
            arcs,
            ambiguous_attachments: ambiguous,
            stats,
        })
    }

    /// Split text into word, number, and punctuation tokens with byte spans
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut sentence = 0;
        let mut chars = text.char_indices().peekable();

        while let Some(&(start, ch)) = chars.peek() {
            if ch.is_whitespace() {
                chars.next();
                continue;
            }
            if ch.is_alphanumeric() {
                let mut end = start;
                while let Some(&(pos, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '\'' || c == '-' || c == '_' {
                        end = pos + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let surface = &text[start..end];
                let lower = surface.to_lowercase();
                let pos = self.tag(surface, &lower, &tokens, sentence);
                tokens.push(Token {
                    text: surface.to_string(),
                    lower,
                    span: Span::new(start, end),
                    pos,
                    sentence,
                });
            } else {
                chars.next();
                let end = start + ch.len_utf8();
                tokens.push(Token {
                    text: ch.to_string(),
                    lower: ch.to_string(),
                    span: Span::new(start, end),
                    pos: PosTag::Punct,
                    sentence,
                });
                if matches!(ch, '.' | '!' | '?') {
                    sentence += 1;
                }
            }
        }

        // A trailing terminator bumps the counter past the last sentence;
        // clamp so every token belongs to a real sentence.
        let last_sentence = tokens
            .iter()
            .filter(|t| t.is_word())
            .map(|t| t.sentence)
            .max()
            .unwrap_or(0);
        for token in &mut tokens {
            if token.sentence > last_sentence {
                token.sentence = last_sentence;
            }
        }
        tokens
    }

    /// Assign a tag from lexicon membership plus suffix heuristics
    fn tag(&self, surface: &str, lower: &str, before: &[Token], sentence: usize) -> PosTag {
        if lower.chars().next().is_some_and(char::is_numeric) {
            return PosTag::Number;
        }
        let sentence_initial =
            before.iter().rev().take_while(|t| t.sentence == sentence).all(|t| !t.is_word());
        let prev_word = before.iter().rev().find(|t| t.sentence == sentence && t.is_word());
        let after_clause_break = prev_word.is_none()
            || before.last().is_some_and(|t| t.pos == PosTag::Punct)
            || prev_word.is_some_and(|t| t.pos == PosTag::Conjunction);

        if self.lexicon.is_demonstrative(lower) {
            return PosTag::Demonstrative;
        }
        if self.lexicon.is_pronoun(lower) {
            return PosTag::Pronoun;
        }
        if self.lexicon.is_determiner(lower) {
            return PosTag::Determiner;
        }
        if self.lexicon.is_modal(lower) {
            return PosTag::Modal;
        }
        if self.lexicon.is_auxiliary(lower) {
            return PosTag::Aux;
        }
        if self.lexicon.is_subordinator(lower) && after_clause_break {
            return PosTag::Conjunction;
        }
        if self.lexicon.is_preposition(lower) {
            return PosTag::Preposition;
        }
        if self.lexicon.is_conjunction(lower) {
            return PosTag::Conjunction;
        }
        if self.lexicon.is_verb(lower) {
            return PosTag::Verb;
        }
        if self.lexicon.is_adjective(lower) {
            return PosTag::Adjective;
        }
        if lower.ends_with("ly") {
            return PosTag::Adverb;
        }
        if (lower.ends_with("ing") || lower.ends_with("ed"))
            && prev_word.is_some_and(|t| matches!(t.pos, PosTag::Aux | PosTag::Modal))
        {
            return PosTag::Verb;
        }
        if !sentence_initial && surface.chars().next().is_some_and(char::is_uppercase) {
            return PosTag::ProperNoun;
        }
        PosTag::Noun
    }

    /// Second pass fixups that need right context
    fn retag_in_context(&self, tokens: &mut [Token]) {
        for index in 0..tokens.len() {
            // An unknown word between a modal/aux and a nominal or clause end
            // is most plausibly the verb: "the page must refresh".
            if tokens[index].pos == PosTag::Noun
                && index > 0
                && matches!(tokens[index - 1].pos, PosTag::Modal | PosTag::Aux)
                && !self.lexicon.is_adjective(&tokens[index].lower)
            {
                tokens[index].pos = PosTag::Verb;
            }
        }
    }

    /// Shallow dependency pass over one sentence
    fn parse_sentence(
        &self,
        tokens: &[Token],
        start: usize,
        end: usize,
        arcs: &mut Vec<DepArc>,
        ambiguous: &mut usize,
    ) -> SentenceParse {
        let condition = self.find_condition_clause(tokens, start, end);
        let main_start = condition.map_or(start, |(_, cond_end)| cond_end);

        let main_verb = (main_start..end)
            .find(|&i| tokens[i].pos == PosTag::Verb)
            .or_else(|| (start..end).find(|&i| tokens[i].pos == PosTag::Verb));

        let subject = main_verb.and_then(|verb| {
            (main_start..verb)
                .rev()
                .find(|&i| tokens[i].pos.is_nominal() || tokens[i].pos.is_referential())
        });

        let object = main_verb.and_then(|verb| {
            for i in verb + 1..end {
                match tokens[i].pos {
                    PosTag::Preposition | PosTag::Conjunction | PosTag::Punct => return None,
                    pos if pos.is_nominal() || pos.is_referential() => return Some(i),
                    _ => {},
                }
            }
            None
        });

        if let Some(verb) = main_verb {
            if let Some(subj) = subject {
                arcs.push(DepArc { head: verb, dependent: subj, relation: DepRel::Nsubj });
            }
            if let Some(obj) = object {
                arcs.push(DepArc { head: verb, dependent: obj, relation: DepRel::Dobj });
            }
            // Modal and auxiliary chain directly before the verb
            let mut i = verb;
            while i > main_start {
                i -= 1;
                match tokens[i].pos {
                    PosTag::Modal | PosTag::Aux => {
                        arcs.push(DepArc { head: verb, dependent: i, relation: DepRel::Aux });
                    },
                    PosTag::Adverb => {},
                    _ => break,
                }
            }
            if let Some((cond_start, cond_end)) = condition {
                for i in cond_start..cond_end {
                    if tokens[i].is_word() {
                        arcs.push(DepArc { head: verb, dependent: i, relation: DepRel::Advcl });
                    }
                }
            }
        }

        attach_determiners(tokens, start, end, arcs);
        attach_prepositions(tokens, start, end, main_verb, arcs, ambiguous);

        SentenceParse { start, end, main_verb, subject, object, condition }
    }

    /// Sentence-initial subordinate clause up to the first comma
    fn find_condition_clause(
        &self,
        tokens: &[Token],
        start: usize,
        end: usize,
    ) -> Option<(usize, usize)> {
        let first_word = (start..end).find(|&i| tokens[i].is_word())?;
        if tokens[first_word].pos != PosTag::Conjunction
            || !self.lexicon.is_subordinator(&tokens[first_word].lower)
        {
            return None;
        }
        let comma = (first_word..end).find(|&i| tokens[i].lower == ",")?;
        Some((first_word, comma))
    }

}

fn attach_determiners(tokens: &[Token], start: usize, end: usize, arcs: &mut Vec<DepArc>) {
    for i in start..end {
        if tokens[i].pos != PosTag::Determiner {
            continue;
        }
        // A determiner binds the nearest following nominal
        if let Some(head) = (i + 1..end.min(i + 4)).find(|&j| tokens[j].pos.is_nominal()) {
            arcs.push(DepArc { head, dependent: i, relation: DepRel::Det });
        }
    }
}

/// Attach prepositional phrases, counting genuinely ambiguous ones
///
/// A nominal between the main verb and the preposition competes with the
/// verb for attachment; that configuration is counted as ambiguous and the
/// phrase is attached to the verb as the recorded policy.
fn attach_prepositions(
    tokens: &[Token],
    start: usize,
    end: usize,
    main_verb: Option<usize>,
    arcs: &mut Vec<DepArc>,
    ambiguous: &mut usize,
) {
    for i in start..end {
        if tokens[i].pos != PosTag::Preposition {
            continue;
        }
        let pobj = (i + 1..end)
            .take_while(|&j| tokens[j].pos != PosTag::Punct)
            .find(|&j| tokens[j].pos.is_nominal() || tokens[j].pos == PosTag::Number);
        let verb_head = main_verb.filter(|&v| v < i);
        let nominal_head =
            verb_head.and_then(|v| (v + 1..i).rev().find(|&j| tokens[j].pos.is_nominal()));

        let head = match (verb_head, nominal_head) {
            (Some(verb), Some(_)) => {
                *ambiguous += 1;
                Some(verb)
            },
            (Some(verb), None) => Some(verb),
            (None, _) => (start..i).rev().find(|&j| tokens[j].pos.is_nominal()),
        };

        if let Some(head) = head {
            arcs.push(DepArc { head, dependent: i, relation: DepRel::Prep });
            if let Some(obj) = pobj {
                arcs.push(DepArc { head: i, dependent: obj, relation: DepRel::Pobj });
            }
        }
    }
}

fn compute_stats(tokens: &[Token], sentences: usize) -> TextStats {
    let words = tokens.iter().filter(|t| t.is_word()).count();
    let unique: HashSet<&str> =
        tokens.iter().filter(|t| t.is_word()).map(|t| t.lower.as_str()).collect();
    TextStats {
        sentences,
        tokens: tokens.len(),
        words,
        unique_words: unique.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(Arc::new(Lexicon::builtin().unwrap().clone()))
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = preprocessor().parse("   \t\n").unwrap_err();
        assert!(matches!(err, EngineError::Input(InputError::Empty)));
    }

    #[test]
    fn test_tokens_carry_spans_into_original_text() {
        let parsed = preprocessor().parse("The system responds.").unwrap();
        let spans: Vec<&str> =
            parsed.tokens.iter().map(|t| &parsed.text[t.span.start..t.span.end]).collect();
        assert_eq!(spans, vec!["The", "system", "responds", "."]);
    }

    #[test]
    fn test_svo_extraction() {
        let parsed = preprocessor().parse("It updates the record.").unwrap();
        let sentence = &parsed.sentences[0];
        let verb = sentence.main_verb.unwrap();
        assert_eq!(parsed.tokens[verb].lower, "updates");
        assert_eq!(parsed.tokens[sentence.subject.unwrap()].lower, "it");
        assert_eq!(parsed.tokens[sentence.object.unwrap()].lower, "record");
        assert!(sentence.has_actionable_clause());
    }

    #[test]
    fn test_subject_without_object_is_actionable() {
        let parsed = preprocessor().parse("The system should respond fast.").unwrap();
        let sentence = &parsed.sentences[0];
        assert_eq!(parsed.tokens[sentence.subject.unwrap()].lower, "system");
        assert!(sentence.object.is_none());
        assert!(sentence.has_actionable_clause());
    }

    #[test]
    fn test_condition_clause_detection() {
        let parsed = preprocessor()
            .parse("Given the user is logged in, the dashboard loads within 2 seconds.")
            .unwrap();
        let sentence = &parsed.sentences[0];
        let (start, end) = sentence.condition.unwrap();
        assert_eq!(parsed.tokens[start].lower, "given");
        assert!(parsed.tokens[start..end].iter().any(|t| t.lower == "logged"));
        // Main clause parsed past the condition
        assert_eq!(parsed.tokens[sentence.main_verb.unwrap()].lower, "loads");
        assert_eq!(parsed.tokens[sentence.subject.unwrap()].lower, "dashboard");
    }

    #[test]
    fn test_pp_after_plain_verb_is_unambiguous() {
        let parsed = preprocessor().parse("The dashboard loads within 2 seconds.").unwrap();
        assert_eq!(parsed.ambiguous_attachments, 0);
    }

    #[test]
    fn test_pp_after_object_counts_as_ambiguous() {
        let parsed = preprocessor().parse("It updates the record in the database.").unwrap();
        assert_eq!(parsed.ambiguous_attachments, 1);
    }

    #[test]
    fn test_multi_sentence_segmentation() {
        let parsed = preprocessor().parse("The user saves the form. It closes.").unwrap();
        assert_eq!(parsed.stats.sentences, 2);
        assert_eq!(parsed.sentences.len(), 2);
        let second = &parsed.sentences[1];
        assert_eq!(parsed.tokens[second.subject.unwrap()].lower, "it");
    }

    #[test]
    fn test_stats() {
        let parsed = preprocessor().parse("The form saves the form.").unwrap();
        assert_eq!(parsed.stats.words, 5);
        assert_eq!(parsed.stats.unique_words, 3);
        assert_eq!(parsed.stats.tokens, 6);
    }

    #[test]
    fn test_determinism() {
        let a = preprocessor().parse("The system should respond fast.").unwrap();
        let b = preprocessor().parse("The system should respond fast.").unwrap();
        let tags_a: Vec<_> = a.tokens.iter().map(|t| t.pos).collect();
        let tags_b: Vec<_> = b.tokens.iter().map(|t| t.pos).collect();
        assert_eq!(tags_a, tags_b);
        assert_eq!(a.arcs, b.arcs);
    }
}
