// src/intensity.rs
//! Three-tier intensity from the strongest emotion and the polarity magnitude.
//!
//! Light needs both signals under the light bound and High needs both at or
//! above the moderate bound. Anything mixed is Moderate: one strong signal
//! next to a weak one never reaches High.
//!
//! This departs from the looser "either signal over 0.6 is High" wording:
//! `classify(0.7, 0.4)` is Moderate (2), not High.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionScores;

const LIGHT_BOUND: f64 = 0.3;
const MODERATE_BOUND: f64 = 0.6;

/// Serialized as the tier number: 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IntensityTier {
    Light = 1,
    Moderate = 2,
    High = 3,
}

impl IntensityTier {
    pub fn classify(max_emotion: f64, polarity: f64) -> Self {
        let abs_polarity = polarity.abs();
        if max_emotion < LIGHT_BOUND && abs_polarity < LIGHT_BOUND {
            IntensityTier::Light
        } else if max_emotion >= MODERATE_BOUND && abs_polarity >= MODERATE_BOUND {
            IntensityTier::High
        } else {
            IntensityTier::Moderate
        }
    }

    pub fn from_scores(scores: &EmotionScores, polarity: f64) -> Self {
        Self::classify(scores.max(), polarity)
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<IntensityTier> for u8 {
    fn from(t: IntensityTier) -> u8 {
        t.level()
    }
}

impl TryFrom<u8> for IntensityTier {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(IntensityTier::Light),
            2 => Ok(IntensityTier::Moderate),
            3 => Ok(IntensityTier::High),
            other => Err(format!("intensity tier out of range: {other}")),
        }
    }
}
