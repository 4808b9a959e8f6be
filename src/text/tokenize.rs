// src/text/tokenize.rs
//! Word tokenizer shared by scoring, highlighting and rewriting.
//!
//! Words keep inner apostrophes (`it's`, `don't`) and every punctuation mark is
//! its own token, so token indices line up with what a reader would count.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\w+(?:['’]\w+)*|[^\w\s]").expect("tokenizer regex"));

/// Lower-cased token texts; the index in the returned vector is the token position.
pub fn tokenize_lower(input: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(input)
        .map(|m| m.as_str().replace('’', "'").to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let toks = tokenize_lower("I love this, it's wonderful!");
        assert_eq!(toks, vec!["i", "love", "this", ",", "it's", "wonderful", "!"]);
    }

    #[test]
    fn punctuation_takes_its_own_position() {
        let toks = tokenize_lower("Bad day... really");
        assert_eq!(toks.len(), 6);
        assert_eq!(toks[1], "day");
        assert_eq!(toks[2], ".");
        assert_eq!(toks[5], "really");
    }

    #[test]
    fn unicode_words_survive() {
        let toks = tokenize_lower("Çok ÜZGÜN bir gün");
        assert_eq!(toks, vec!["çok", "üzgün", "bir", "gün"]);
    }

    #[test]
    fn curly_apostrophe_folds_to_ascii() {
        assert_eq!(tokenize_lower("Don’t"), vec!["don't"]);
    }
}
