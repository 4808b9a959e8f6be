// src/improve.rs
//! Text improvement suggestions: tone-shifting rewrite, grammar correction
//! and alternative expressions, composed into one record.
//!
//! All three work on an English-equivalent text obtained through the
//! best-effort translator, so they degrade to operating on the original
//! wording when translation is unavailable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::grammar::GrammarCorrector;
use crate::language::canonical_code;
use crate::lexicon::Lexicons;
use crate::pipeline::required_text;
use crate::polarity::{PolarityEngine, SentimentLabel};
use crate::telemetry::anon_id;
use crate::text::tokenize_lower;
use crate::translate::TranslatorAdapter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChange {
    pub original: String,
    pub improved: String,
    /// Token index in the lower-cased English text.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovedText {
    pub original_text: String,
    pub improved_text: String,
    pub changes_made: bool,
    pub changes: Vec<TextChange>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarCorrections {
    pub original_text: String,
    pub corrected_text: String,
    pub changes_made: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionAlternatives {
    pub original: String,
    /// Table order, unranked.
    pub alternatives: Vec<String>,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeExpressions {
    pub original_text: String,
    pub alternatives: Vec<ExpressionAlternatives>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestions {
    pub original_text: String,
    pub improved_text: ImprovedText,
    pub grammar_corrections: GrammarCorrections,
    pub alternative_expressions: AlternativeExpressions,
}

#[derive(Clone)]
pub struct TextImprover {
    translator: TranslatorAdapter,
    polarity: PolarityEngine,
    grammar: Arc<dyn GrammarCorrector>,
    lexicons: Arc<Lexicons>,
}

impl TextImprover {
    pub fn new(
        translator: TranslatorAdapter,
        polarity: PolarityEngine,
        grammar: Arc<dyn GrammarCorrector>,
        lexicons: Arc<Lexicons>,
    ) -> Self {
        Self {
            translator,
            polarity,
            grammar,
            lexicons,
        }
    }

    /// Swap every negative word for the first alternative of the
    /// negative-to-positive table. Non-negative text is returned untouched.
    ///
    /// The rewrite is rejoined with single spaces and lower-cased, then
    /// translated back to `lang` when that is not English.
    pub async fn improve_negative_text(&self, text: &str, lang: &str) -> ImprovedText {
        let english = self.translator.to_english(text, lang).await;
        let polarity = self.polarity.score(&english).polarity;

        if polarity >= 0.0 {
            return ImprovedText {
                original_text: text.to_string(),
                improved_text: text.to_string(),
                changes_made: false,
                changes: Vec::new(),
                message: "Text already has a non-negative tone; no changes made.".to_string(),
            };
        }

        let mut words = tokenize_lower(&english);
        let mut changes = Vec::new();
        for (position, word) in words.iter_mut().enumerate() {
            let Some(first) = self
                .lexicons
                .negative_to_positive
                .lookup_any(word.as_str())
                .and_then(|alts| alts.first())
            else {
                continue;
            };
            changes.push(TextChange {
                original: word.clone(),
                improved: first.clone(),
                position,
            });
            *word = first.clone();
        }

        let rewritten = words.join(" ");
        let improved_text = self.translator.from_english(&rewritten, lang).await;
        debug!(id = %anon_id(text), lang, polarity, changes = changes.len(), "negative text rewritten");

        ImprovedText {
            original_text: text.to_string(),
            improved_text,
            changes_made: !changes.is_empty(),
            message: format!(
                "{} negative expression(s) replaced with more positive alternatives.",
                changes.len()
            ),
            changes,
        }
    }

    /// English only. Other languages get the input back with an
    /// "unsupported" message; a failing corrector yields "unavailable".
    pub fn correct_grammar(&self, text: &str, lang: &str) -> GrammarCorrections {
        let unchanged = |message: String| GrammarCorrections {
            original_text: text.to_string(),
            corrected_text: text.to_string(),
            changes_made: false,
            message,
        };

        if lang != "en" {
            return unchanged(format!(
                "Grammar correction is not supported for language {lang}."
            ));
        }

        match self.grammar.correct(text) {
            Ok(corrected) => {
                let changes_made = corrected != text;
                GrammarCorrections {
                    original_text: text.to_string(),
                    corrected_text: corrected,
                    changes_made,
                    message: if changes_made {
                        "Grammar errors corrected.".to_string()
                    } else {
                        "No grammar errors found.".to_string()
                    },
                }
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(
                    id = %anon_id(text),
                    corrector = self.grammar.name(),
                    %error,
                    "grammar correction failed, keeping original text"
                );
                unchanged("Grammar correction is currently unavailable.".to_string())
            }
        }
    }

    /// Attach the full alternative list for every token found in the
    /// common-expression table of `lang` (English table for anything but
    /// Turkish). `_sentiment` is accepted for callers but does not filter.
    pub async fn suggest_alternative_expressions(
        &self,
        text: &str,
        lang: &str,
        _sentiment: SentimentLabel,
    ) -> AlternativeExpressions {
        let english = self.translator.to_english(text, lang).await;
        let table = self.lexicons.common_expressions.for_language(lang);

        let alternatives: Vec<_> = tokenize_lower(&english)
            .into_iter()
            .enumerate()
            .filter_map(|(position, word)| {
                table.get(&word).map(|alts| ExpressionAlternatives {
                    alternatives: alts.to_vec(),
                    original: word,
                    position,
                })
            })
            .collect();

        AlternativeExpressions {
            original_text: text.to_string(),
            message: format!(
                "Found alternative suggestions for {} expression(s).",
                alternatives.len()
            ),
            alternatives,
        }
    }

    pub async fn get_text_improvements(
        &self,
        text: &str,
        lang: &str,
        sentiment: SentimentLabel,
    ) -> ImprovementSuggestions {
        let improved_text = self.improve_negative_text(text, lang).await;
        let grammar_corrections = self.correct_grammar(text, lang);
        let alternative_expressions = self
            .suggest_alternative_expressions(text, lang, sentiment)
            .await;

        ImprovementSuggestions {
            original_text: text.to_string(),
            improved_text,
            grammar_corrections,
            alternative_expressions,
        }
    }

    /// Request shape: `{"text": .., "language_code"?: "en", "sentiment"?: "Neutral"}`.
    pub async fn improvements_json(&self, req: &Value) -> Result<ImprovementSuggestions> {
        let text = required_text(req)?;

        let lang = match req.get("language_code") {
            None | Some(Value::Null) => "en".to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => canonical_code(s),
            Some(_) => {
                return Err(AnalysisError::invalid_input(
                    "`language_code` must be a non-empty string",
                ))
            }
        };

        let sentiment = match req.get("sentiment") {
            None | Some(Value::Null) => SentimentLabel::default(),
            Some(Value::String(s)) => s
                .parse::<SentimentLabel>()
                .map_err(AnalysisError::InvalidInput)?,
            Some(_) => {
                return Err(AnalysisError::invalid_input("`sentiment` must be a string"))
            }
        };

        Ok(self.get_text_improvements(text, &lang, sentiment).await)
    }
}
