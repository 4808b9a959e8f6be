// tests/pipeline_e2e.rs
use async_trait::async_trait;
use sentiment_lens::language::LanguageDetector;
use sentiment_lens::polarity::{LexiconPolarityScorer, PolarityScore, PolarityScorer};
use sentiment_lens::translate::{DisabledTranslator, Translator, TranslatorAdapter};
use sentiment_lens::{
    AnalysisError, DetectionError, EmotionCategory, IntensityTier, Lexicons, Runtime,
    SentimentLabel, SentimentPipeline,
};
use serde_json::json;
use std::sync::Arc;

struct FixedDetector(&'static str);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        Ok(self.0.to_string())
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct FailingDetector;

impl LanguageDetector for FailingDetector {
    fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        Err(DetectionError::Backend("offline".into()))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Dictionary translator for the handful of phrases used below.
struct PhraseBook;

#[async_trait]
impl Translator for PhraseBook {
    async fn translate(&self, text: &str, source: &str, target: &str) -> anyhow::Result<String> {
        match (source, target, text) {
            ("tr", "en", "Bugün çok mutluyum!") => Ok("I am very happy today!".into()),
            ("es", "en", "Odio esto, es terrible") => Ok("I hate this, it is terrible".into()),
            _ => anyhow::bail!("no phrase for {source}->{target}"),
        }
    }
    fn name(&self) -> &'static str {
        "phrasebook"
    }
}

struct ConstScorer(f64);

impl PolarityScorer for ConstScorer {
    fn score(&self, _english_text: &str) -> PolarityScore {
        PolarityScore {
            polarity: self.0,
            subjectivity: 0.5,
        }
    }
    fn name(&self) -> &'static str {
        "const"
    }
}

fn pipeline(
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    scorer: Option<Arc<dyn PolarityScorer>>,
) -> SentimentPipeline {
    let lx = Arc::new(Lexicons::builtin());
    let scorer = scorer.unwrap_or_else(|| Arc::new(LexiconPolarityScorer::new(lx.clone())));
    SentimentPipeline::new(lx, detector, TranslatorAdapter::new(translator), scorer)
}

fn english() -> SentimentPipeline {
    pipeline(
        Arc::new(FixedDetector("en")),
        Arc::new(DisabledTranslator),
        None,
    )
}

#[tokio::test]
async fn positive_english_sentence() {
    let r = english().analyze("I love this, it's wonderful!").await;
    assert_eq!(r.language_code, "en");
    assert_eq!(r.language_name, "English");
    assert!(r.translated_text.is_none());
    assert_eq!(r.sentiment, SentimentLabel::Positive);
    assert!(r.confidence > 0.0);
    assert!(r.emotion_scores.happiness > 0.0);
    assert_eq!(r.primary_emotion(), EmotionCategory::Happiness);
}

#[tokio::test]
async fn negative_english_sentence() {
    let r = english().analyze("I hate everything, this is terrible").await;
    assert_eq!(r.sentiment, SentimentLabel::Negative);
    assert!(r.emotion_scores.anger > 0.0 || r.emotion_scores.sadness > 0.0);
    // no emotion keywords here; the scores come from polarity fusion alone
    assert!(r.highlighted_emotions.is_empty());
    assert_eq!(r.primary_emotion(), EmotionCategory::Sadness);
}

#[tokio::test]
async fn real_detector_reports_english() {
    let rt = Runtime::offline().unwrap();
    let r = rt.pipeline.analyze("I love this, it's wonderful!").await;
    assert_eq!(r.language_code, "en");
    assert_eq!(r.language_name, "English");
    assert_eq!(r.sentiment, SentimentLabel::Positive);
}

#[tokio::test]
async fn real_detector_reports_short_turkish() {
    let rt = Runtime::offline().unwrap();
    let r = rt.pipeline.analyze("Bu film berbattı, hiç sevmedim.").await;
    assert_eq!(r.language_code, "tr");
    assert_eq!(r.language_name, "Turkish");
}

#[tokio::test]
async fn cleaning_happens_before_everything() {
    let r = english()
        .analyze("  <b>So happy</b>   see https://example.com/x  ")
        .await;
    assert_eq!(r.cleaned_text, "So happy see");
    assert_eq!(r.text, "  <b>So happy</b>   see https://example.com/x  ");
    assert_eq!(r.highlighted_emotions.len(), 1);
    assert_eq!(r.highlighted_emotions[0].position, 1);
}

#[tokio::test]
async fn non_english_goes_through_translation() {
    let p = pipeline(Arc::new(FixedDetector("tr")), Arc::new(PhraseBook), None);
    let r = p.analyze("Bugün çok mutluyum!").await;
    assert_eq!(r.language_code, "tr");
    assert_eq!(r.language_name, "Turkish");
    assert_eq!(r.translated_text.as_deref(), Some("I am very happy today!"));
    assert_eq!(r.sentiment, SentimentLabel::Positive);
    assert!(r
        .highlighted_emotions
        .iter()
        .any(|h| h.word == "happy" && h.emotion == EmotionCategory::Happiness));
}

#[tokio::test]
async fn failed_translation_keeps_original_text() {
    let p = pipeline(Arc::new(FixedDetector("es")), Arc::new(DisabledTranslator), None);
    let r = p.analyze("Odio esto, es terrible").await;
    assert_eq!(r.language_code, "es");
    // untranslated text is still scored; "terrible" is shared vocabulary
    assert_eq!(r.translated_text.as_deref(), Some("Odio esto, es terrible"));
    assert_eq!(r.sentiment, SentimentLabel::Negative);
}

#[tokio::test]
async fn detector_failure_falls_back_to_english() {
    let p = pipeline(Arc::new(FailingDetector), Arc::new(PhraseBook), None);
    let r = p.analyze("whatever this is").await;
    assert_eq!(r.language_code, "en");
    assert_eq!(r.language_name, "English (Default)");
    assert!(r.translated_text.is_none());

    let unsupported = pipeline(Arc::new(FixedDetector("nl")), Arc::new(PhraseBook), None)
        .analyze("whatever this is")
        .await;
    assert_eq!(unsupported.language_code, r.language_code);
    assert_eq!(unsupported.language_name, r.language_name);
}

#[tokio::test]
async fn sentiment_thresholds_through_pipeline() {
    for (p, expected) in [
        (0.05, SentimentLabel::Neutral),
        (0.051, SentimentLabel::Positive),
        (-0.05, SentimentLabel::Neutral),
        (-0.051, SentimentLabel::Negative),
    ] {
        let r = pipeline(
            Arc::new(FixedDetector("en")),
            Arc::new(DisabledTranslator),
            Some(Arc::new(ConstScorer(p))),
        )
        .analyze("The report was published today")
        .await;
        assert_eq!(r.sentiment, expected, "polarity {p}");
    }
}

#[tokio::test]
async fn fusion_and_intensity_from_polarity() {
    let r = pipeline(
        Arc::new(FixedDetector("en")),
        Arc::new(DisabledTranslator),
        Some(Arc::new(ConstScorer(-0.9))),
    )
    .analyze("The report was published today")
    .await;
    // no keywords: scores come from fusion alone
    assert_eq!(r.emotion_scores.sadness, 0.63);
    assert_eq!(r.emotion_scores.anger, 0.27);
    assert_eq!(r.emotion_scores.happiness, 0.0);
    assert_eq!(r.confidence, 90.0);
    assert_eq!(r.intensity, IntensityTier::High);

    let mild = pipeline(
        Arc::new(FixedDetector("en")),
        Arc::new(DisabledTranslator),
        Some(Arc::new(ConstScorer(0.1))),
    )
    .analyze("The report was published today")
    .await;
    assert_eq!(mild.intensity, IntensityTier::Light);
}

#[tokio::test]
async fn result_serializes_with_fixed_shape() {
    let r = english().analyze("I am so happy").await;
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["sentiment"], "Positive");
    assert!(v["intensity"].is_u64());
    assert!(v["translated_text"].is_null());
    let emotions = v["emotion_scores"].as_object().unwrap();
    assert_eq!(emotions.len(), 5);
    assert_eq!(v["highlighted_emotions"][0]["emotion"], "happiness");
}

#[tokio::test]
async fn json_boundary_rejects_bad_requests() {
    let p = english();
    let ok = p.analyze_json(&json!({"text": "I am so happy"})).await.unwrap();
    assert_eq!(ok.sentiment, SentimentLabel::Positive);

    for bad in [json!({}), json!({"text": 42}), json!({"text": ""}), json!(null)] {
        let err = p.analyze_json(&bad).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)), "{bad}");
    }
}
