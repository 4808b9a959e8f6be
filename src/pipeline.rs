// src/pipeline.rs
//! Sentiment pipeline: one call from raw text to a complete [`AnalysisResult`].
//!
//! Steps run strictly in sequence: normalize, identify language, translate to
//! English (once, shared by every later step), polarity, emotions, intensity,
//! highlights. Each step degrades through its own fallback, so `analyze`
//! itself cannot fail; only the JSON boundary rejects malformed requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::emotion::{EmotionCategory, EmotionScorer, EmotionScores};
use crate::error::{AnalysisError, Result};
use crate::highlight::{EmotionHighlight, EmotionHighlighter};
use crate::intensity::IntensityTier;
use crate::language::{LanguageDetector, LanguageIdentifier};
use crate::lexicon::Lexicons;
use crate::polarity::{PolarityEngine, PolarityScorer, SentimentLabel};
use crate::stats;
use crate::telemetry::anon_id;
use crate::text::clean_text;
use crate::translate::TranslatorAdapter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub cleaned_text: String,
    pub language_code: String,
    pub language_name: String,
    /// English equivalent; `None` when the text was identified as English.
    pub translated_text: Option<String>,
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
    pub confidence: f64,
    /// Rounded to 2 decimals.
    pub emotion_scores: EmotionScores,
    pub intensity: IntensityTier,
    pub highlighted_emotions: Vec<EmotionHighlight>,
}

impl AnalysisResult {
    /// argmax of the emotion scores, earliest category on ties.
    pub fn primary_emotion(&self) -> EmotionCategory {
        self.emotion_scores.primary()
    }
}

#[derive(Clone)]
pub struct SentimentPipeline {
    identifier: LanguageIdentifier,
    translator: TranslatorAdapter,
    polarity: PolarityEngine,
    emotions: EmotionScorer,
    highlighter: EmotionHighlighter,
}

impl SentimentPipeline {
    pub fn new(
        lexicons: Arc<Lexicons>,
        detector: Arc<dyn LanguageDetector>,
        translator: TranslatorAdapter,
        scorer: Arc<dyn PolarityScorer>,
    ) -> Self {
        Self {
            identifier: LanguageIdentifier::new(detector, lexicons.clone()),
            translator,
            polarity: PolarityEngine::new(scorer),
            emotions: EmotionScorer::new(lexicons.clone()),
            highlighter: EmotionHighlighter::new(lexicons),
        }
    }

    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let id = anon_id(text);
        let cleaned_text = clean_text(text);

        let language = self.identifier.identify(&cleaned_text);
        debug!(%id, lang = %language.code, fallback = language.fallback, "language identified");

        let english = self.translator.to_english(&cleaned_text, &language.code).await;

        let reading = self.polarity.evaluate(&english);
        debug!(%id, polarity = reading.polarity, sentiment = %reading.sentiment, "polarity scored");

        let scores = self.emotions.score(&english, reading.polarity);
        // Tier from unrounded scores; rounding is presentation only.
        let intensity = IntensityTier::from_scores(&scores, reading.polarity);
        let highlighted_emotions = self.highlighter.highlight(&english);
        debug!(
            %id,
            intensity = intensity.level(),
            highlights = highlighted_emotions.len(),
            "emotions scored"
        );

        let result = AnalysisResult {
            text: text.to_string(),
            translated_text: (!language.is_english()).then_some(english),
            cleaned_text,
            language_code: language.code,
            language_name: language.name,
            sentiment: reading.sentiment,
            polarity: reading.polarity,
            subjectivity: reading.subjectivity,
            confidence: reading.confidence,
            emotion_scores: scores.rounded(),
            intensity,
            highlighted_emotions,
        };
        stats::record_analysis(&result);
        result
    }

    /// Request shape: `{"text": "..."}`.
    pub async fn analyze_json(&self, req: &Value) -> Result<AnalysisResult> {
        let text = required_text(req)?;
        Ok(self.analyze(text).await)
    }
}

/// The non-empty string `text` field of a JSON request object.
pub(crate) fn required_text(req: &Value) -> Result<&str> {
    let obj = req
        .as_object()
        .ok_or_else(|| AnalysisError::invalid_input("request must be a JSON object"))?;
    match obj.get("text") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(AnalysisError::invalid_input("`text` is required"))
        }
        Some(_) => Err(AnalysisError::invalid_input("`text` must be a string")),
    }
}
