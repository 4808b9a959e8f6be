// src/highlight.rs
//! Position-indexed emotional words.
//!
//! Same keyword scan as the emotion scorer, but over every token (stop words
//! included) so positions match the raw token sequence.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::emotion::EmotionCategory;
use crate::lexicon::Lexicons;
use crate::text::tokenize_lower;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionHighlight {
    pub word: String,
    pub emotion: EmotionCategory,
    /// 0-based token index in the English-equivalent text.
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct EmotionHighlighter {
    lexicons: Arc<Lexicons>,
}

impl EmotionHighlighter {
    pub fn new(lexicons: Arc<Lexicons>) -> Self {
        Self { lexicons }
    }

    /// One record per (token, matching category); ascending position, then
    /// category declaration order.
    pub fn highlight(&self, english_text: &str) -> Vec<EmotionHighlight> {
        let mut out = Vec::new();
        for (position, token) in tokenize_lower(english_text).into_iter().enumerate() {
            for emotion in self.lexicons.emotions.categories_of(&token) {
                out.push(EmotionHighlight {
                    word: token.clone(),
                    emotion,
                    position,
                });
            }
        }
        out
    }
}
