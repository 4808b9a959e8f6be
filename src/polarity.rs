// src/polarity.rs
//! Polarity / subjectivity scoring and the three-way sentiment label.
//!
//! [`PolarityScorer`] is the seam over the scoring capability. The default
//! [`LexiconPolarityScorer`] averages per-word assessments from the polarity
//! lexicon:
//! - an intensifier right before a word scales its polarity and subjectivity,
//! - a negator in the previous 1..=3 tokens multiplies polarity by -0.5.
//!
//! [`PolarityEngine`] turns a score into label + confidence with fixed
//! thresholds (±0.05, exclusive).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::emotion::round2;
use crate::lexicon::Lexicons;
use crate::text::tokenize_lower;

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;
const NEGATION_FACTOR: f64 = -0.5;
const NEGATION_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScore {
    /// In [-1, 1].
    pub polarity: f64,
    /// In [0, 1].
    pub subjectivity: f64,
}

pub trait PolarityScorer: Send + Sync {
    fn score(&self, english_text: &str) -> PolarityScore;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct LexiconPolarityScorer {
    lexicons: Arc<Lexicons>,
}

impl LexiconPolarityScorer {
    pub fn new(lexicons: Arc<Lexicons>) -> Self {
        Self { lexicons }
    }
}

impl PolarityScorer for LexiconPolarityScorer {
    fn score(&self, english_text: &str) -> PolarityScore {
        let lx = &self.lexicons.polarity;
        let tokens = tokenize_lower(english_text);

        let mut assessed = 0usize;
        let mut pol_sum = 0.0;
        let mut subj_sum = 0.0;

        for (i, tok) in tokens.iter().enumerate() {
            let Some(&(mut pol, mut subj)) = lx.words.get(tok.as_str()) else {
                continue;
            };

            if let Some(&factor) = i
                .checked_sub(1)
                .and_then(|p| lx.intensifiers.get(tokens[p].as_str()))
            {
                pol *= factor;
                subj *= factor;
            }

            let negated = (1..=NEGATION_WINDOW)
                .any(|k| i >= k && lx.negators.contains(tokens[i - k].as_str()));
            if negated {
                pol *= NEGATION_FACTOR;
            }

            pol_sum += pol.clamp(-1.0, 1.0);
            subj_sum += subj.clamp(0.0, 1.0);
            assessed += 1;
        }

        if assessed == 0 {
            return PolarityScore::default();
        }
        let n = assessed as f64;
        PolarityScore {
            polarity: (pol_sum / n).clamp(-1.0, 1.0),
            subjectivity: (subj_sum / n).clamp(0.0, 1.0),
        }
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("unknown sentiment label: {other}")),
        }
    }
}

/// Confidence in [0, 100]: |polarity|·100 rounded to 2 decimals.
pub fn confidence_from_polarity(polarity: f64) -> f64 {
    round2(polarity.abs() * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityReading {
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
}

#[derive(Clone)]
pub struct PolarityEngine {
    scorer: Arc<dyn PolarityScorer>,
}

impl PolarityEngine {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn score(&self, english_text: &str) -> PolarityScore {
        self.scorer.score(english_text)
    }

    pub fn evaluate(&self, english_text: &str) -> PolarityReading {
        let PolarityScore {
            polarity,
            subjectivity,
        } = self.score(english_text);
        PolarityReading {
            polarity,
            subjectivity,
            sentiment: SentimentLabel::from_polarity(polarity),
            confidence: confidence_from_polarity(polarity),
        }
    }
}
