// src/emotion.rs
//! Emotion scoring: keyword frequencies over five fixed categories, fused with
//! the overall polarity.
//!
//! Two phases:
//! 1. Count keyword hits per category on the stop-word-filtered tokens and
//!    divide by the total hit count, so the raw vector sums to 1 (or is all 0).
//! 2. Raise floors from polarity: a positive polarity lifts `happiness` to at
//!    least `|p|`; otherwise `sadness` is lifted to `0.7·|p|` and `anger` to
//!    `0.3·|p|`. Nothing is renormalized afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::lexicon::Lexicons;
use crate::text::tokenize_lower;

const SADNESS_SHARE: f64 = 0.7;
const ANGER_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Happiness,
    Sadness,
    Anger,
    Fear,
    Surprise,
}

impl EmotionCategory {
    /// Declaration order; ties anywhere in the crate are broken by it.
    pub const ALL: [EmotionCategory; 5] = [
        EmotionCategory::Happiness,
        EmotionCategory::Sadness,
        EmotionCategory::Anger,
        EmotionCategory::Fear,
        EmotionCategory::Surprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionCategory::Happiness => "happiness",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Anger => "anger",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Surprise => "surprise",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score per category. Serializes as a map with exactly the five keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub happiness: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
}

impl EmotionScores {
    pub fn get(&self, category: EmotionCategory) -> f64 {
        match category {
            EmotionCategory::Happiness => self.happiness,
            EmotionCategory::Sadness => self.sadness,
            EmotionCategory::Anger => self.anger,
            EmotionCategory::Fear => self.fear,
            EmotionCategory::Surprise => self.surprise,
        }
    }

    fn slot(&mut self, category: EmotionCategory) -> &mut f64 {
        match category {
            EmotionCategory::Happiness => &mut self.happiness,
            EmotionCategory::Sadness => &mut self.sadness,
            EmotionCategory::Anger => &mut self.anger,
            EmotionCategory::Fear => &mut self.fear,
            EmotionCategory::Surprise => &mut self.surprise,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, f64)> + '_ {
        EmotionCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn max(&self) -> f64 {
        self.iter().map(|(_, v)| v).fold(0.0, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Highest-scoring category; the earliest declared wins a tie.
    pub fn primary(&self) -> EmotionCategory {
        let mut best = EmotionCategory::Happiness;
        for (c, v) in self.iter() {
            if v > self.get(best) {
                best = c;
            }
        }
        best
    }

    pub fn rounded(&self) -> Self {
        let mut out = *self;
        for c in EmotionCategory::ALL {
            let v = out.slot(c);
            *v = round2(*v);
        }
        out
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct EmotionScorer {
    lexicons: Arc<Lexicons>,
}

impl EmotionScorer {
    pub fn new(lexicons: Arc<Lexicons>) -> Self {
        Self { lexicons }
    }

    /// Phase 1: frequency-normalized keyword hits on English-equivalent text.
    pub fn raw_scores(&self, english_text: &str) -> EmotionScores {
        let mut counts = EmotionScores::default();
        let mut total = 0.0;

        for token in tokenize_lower(english_text) {
            if self.lexicons.is_stop_word(&token) {
                continue;
            }
            for category in self.lexicons.emotions.categories_of(&token) {
                *counts.slot(category) += 1.0;
                total += 1.0;
            }
        }

        if total > 0.0 {
            for c in EmotionCategory::ALL {
                *counts.slot(c) /= total;
            }
        }
        counts
    }

    /// Phase 2: floor-raising override from the overall polarity.
    pub fn fuse(raw: EmotionScores, polarity: f64) -> EmotionScores {
        let mut out = raw;
        let magnitude = polarity.abs();
        if polarity > 0.0 {
            out.happiness = out.happiness.max(magnitude);
        } else {
            out.sadness = out.sadness.max(magnitude * SADNESS_SHARE);
            out.anger = out.anger.max(magnitude * ANGER_SHARE);
        }
        out
    }

    pub fn score(&self, english_text: &str, polarity: f64) -> EmotionScores {
        Self::fuse(self.raw_scores(english_text), polarity)
    }
}
