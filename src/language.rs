// src/language.rs
//! Language identification with a deterministic English fallback.
//!
//! The detector behind [`LanguageDetector`] may report any code; the identifier
//! only ever returns a member of the supported set. Unsupported codes and
//! detector failures both collapse into the same fallback pair.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::DetectionError;
use crate::lexicon::{Lexicons, FALLBACK_LANGUAGE_CODE, FALLBACK_LANGUAGE_NAME};
use crate::telemetry::anon_id;

/// Single-operation seam over a language detection capability.
pub trait LanguageDetector: Send + Sync {
    /// Returns a language code such as `"en"` or `"zh-tw"`.
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
    /// Detector name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Trigram detector backed by `whatlang`.
#[derive(Debug, Clone)]
pub struct WhatlangDetector {
    require_reliable: bool,
}

impl WhatlangDetector {
    pub fn new(require_reliable: bool) -> Self {
        Self { require_reliable }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let info = whatlang::detect(text).ok_or(DetectionError::NoFeatures)?;
        let code = lang_to_code(info.lang());
        if self.require_reliable && !info.is_reliable() {
            return Err(DetectionError::Unreliable(format!(
                "{code} at {:.2}",
                info.confidence()
            )));
        }
        Ok(code)
    }

    fn name(&self) -> &'static str {
        "whatlang"
    }
}

fn lang_to_code(lang: whatlang::Lang) -> String {
    use whatlang::Lang::*;
    match lang {
        Eng => "en".to_string(),
        Tur => "tr".to_string(),
        Spa => "es".to_string(),
        Fra => "fr".to_string(),
        Deu => "de".to_string(),
        Ita => "it".to_string(),
        Por => "pt".to_string(),
        Rus => "ru".to_string(),
        Ara => "ar".to_string(),
        Cmn => "zh".to_string(),
        Jpn => "ja".to_string(),
        Kor => "ko".to_string(),
        // Everything else keeps its ISO 639-3 code and falls back later.
        other => other.code().to_string(),
    }
}

/// Every Chinese variant is reported under one canonical code.
pub fn canonical_code(code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    if code == "zh" || code.starts_with("zh-") || code.starts_with("zh_") {
        "zh-cn".to_string()
    } else {
        code
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    pub code: String,
    pub name: String,
    /// True when the English fallback was used.
    pub fallback: bool,
}

impl DetectedLanguage {
    pub fn fallback() -> Self {
        Self {
            code: FALLBACK_LANGUAGE_CODE.to_string(),
            name: FALLBACK_LANGUAGE_NAME.to_string(),
            fallback: true,
        }
    }

    pub fn is_english(&self) -> bool {
        self.code == "en"
    }
}

#[derive(Clone)]
pub struct LanguageIdentifier {
    detector: Arc<dyn LanguageDetector>,
    lexicons: Arc<Lexicons>,
}

impl LanguageIdentifier {
    pub fn new(detector: Arc<dyn LanguageDetector>, lexicons: Arc<Lexicons>) -> Self {
        Self { detector, lexicons }
    }

    pub fn identify(&self, text: &str) -> DetectedLanguage {
        if text.trim().is_empty() {
            return DetectedLanguage::fallback();
        }

        let raw = match self.detector.detect(text) {
            Ok(code) => code,
            Err(e) => {
                warn!(
                    id = %anon_id(text),
                    detector = self.detector.name(),
                    error = %e,
                    "language detection failed, using fallback"
                );
                return DetectedLanguage::fallback();
            }
        };

        let code = canonical_code(&raw);
        match self.lexicons.languages.name(&code) {
            Some(name) => DetectedLanguage {
                code,
                name: name.to_string(),
                fallback: false,
            },
            None => {
                debug!(id = %anon_id(text), detected = %code, "unsupported language, using fallback");
                DetectedLanguage::fallback()
            }
        }
    }
}
