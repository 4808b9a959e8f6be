// src/grammar.rs
//! Grammar correction seam and the built-in English spelling corrector.
//!
//! The corrector only touches ASCII words of three or more letters that are
//! missing from the vocabulary, replacing each with the closest known word
//! (Damerau-Levenshtein distance <= 2, most common word first on ties).
//! Capitalized words in the middle of a sentence are taken as names and left
//! alone. Punctuation and spacing are never changed.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::sync::Arc;
use strsim::damerau_levenshtein;

use crate::lexicon::Lexicons;

const MIN_WORD_LEN: usize = 3;
const MAX_EDIT_DISTANCE: usize = 2;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]+\b").expect("word regex"));

pub trait GrammarCorrector: Send + Sync {
    fn correct(&self, english_text: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

/// Always fails, so callers report correction as unavailable.
#[derive(Debug, Clone, Default)]
pub struct DisabledGrammarCorrector;

impl GrammarCorrector for DisabledGrammarCorrector {
    fn correct(&self, _english_text: &str) -> Result<String> {
        bail!("grammar correction disabled")
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    lexicons: Arc<Lexicons>,
}

impl SpellingCorrector {
    pub fn new(lexicons: Arc<Lexicons>) -> Self {
        Self { lexicons }
    }

    /// Best replacement for a lower-case word, if it is unknown and something is close.
    pub fn suggest(&self, word: &str) -> Option<&str> {
        let vocab = &self.lexicons.vocabulary;
        if word.len() < MIN_WORD_LEN || vocab.contains(word) {
            return None;
        }

        let mut best: Option<(usize, &str)> = None;
        for candidate in vocab.iter() {
            if candidate.len().abs_diff(word.len()) > MAX_EDIT_DISTANCE {
                continue;
            }
            let d = damerau_levenshtein(word, candidate);
            if d == 0 || d > MAX_EDIT_DISTANCE {
                continue;
            }
            // vocab.iter() is in rank order, so strict `<` keeps the most common word.
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, candidate));
            }
        }
        best.map(|(_, w)| w)
    }
}

impl GrammarCorrector for SpellingCorrector {
    fn correct(&self, english_text: &str) -> Result<String> {
        let out = WORD_RE.replace_all(english_text, |caps: &Captures| {
            let m = caps.get(0).map_or("", |m| m.as_str());
            let start = caps.get(0).map_or(0, |m| m.start());

            if starts_upper(m) && !at_sentence_start(english_text, start) {
                return m.to_string();
            }
            match self.suggest(&m.to_ascii_lowercase()) {
                Some(fixed) => match_case(m, fixed),
                None => m.to_string(),
            }
        });
        Ok(out.into_owned())
    }

    fn name(&self) -> &'static str {
        "spelling"
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// True when only whitespace and sentence-ending punctuation precede `pos`
/// back to the previous word.
fn at_sentence_start(text: &str, pos: usize) -> bool {
    for c in text[..pos].chars().rev() {
        if c.is_whitespace() || c == '"' || c == '\'' || c == '(' {
            continue;
        }
        return matches!(c, '.' | '!' | '?');
    }
    true
}

fn match_case(original: &str, fixed: &str) -> String {
    if original.len() > 1 && original.chars().all(|c| c.is_ascii_uppercase()) {
        return fixed.to_ascii_uppercase();
    }
    if starts_upper(original) {
        let mut chars = fixed.chars();
        return match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
    }
    fixed.to_string()
}
