// src/preferences.rs
//! Display adaptation of an analysis for a caller's stored preferences.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionScores;
use crate::highlight::EmotionHighlight;
use crate::intensity::IntensityTier;
use crate::pipeline::AnalysisResult;
use crate::polarity::SentimentLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    pub show_detailed_emotions: bool,
    pub show_text_suggestions: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_detailed_emotions: true,
            show_text_suggestions: true,
        }
    }
}

impl DisplayPreferences {
    /// Whether improvement suggestions should be computed at all.
    pub fn wants_suggestions(&self) -> bool {
        self.show_text_suggestions
    }
}

/// Borrowed projection of an [`AnalysisResult`]; the record itself is never changed.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView<'a> {
    pub text: &'a str,
    pub cleaned_text: &'a str,
    pub language_code: &'a str,
    pub language_name: &'a str,
    pub translated_text: Option<&'a str>,
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_scores: Option<&'a EmotionScores>,
    pub intensity: IntensityTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_emotions: Option<&'a [EmotionHighlight]>,
}

impl<'a> AnalysisView<'a> {
    pub fn adapt(result: &'a AnalysisResult, prefs: &DisplayPreferences) -> Self {
        let detailed = prefs.show_detailed_emotions;
        Self {
            text: &result.text,
            cleaned_text: &result.cleaned_text,
            language_code: &result.language_code,
            language_name: &result.language_name,
            translated_text: result.translated_text.as_deref(),
            sentiment: result.sentiment,
            polarity: result.polarity,
            subjectivity: result.subjectivity,
            confidence: result.confidence,
            emotion_scores: detailed.then_some(&result.emotion_scores),
            intensity: result.intensity,
            highlighted_emotions: detailed.then_some(result.highlighted_emotions.as_slice()),
        }
    }
}
