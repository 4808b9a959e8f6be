// src/runtime.rs
//! Wires every component from a [`PipelineConfig`]: tables, detector,
//! translator, scorer, corrector, then the pipeline and the improver that
//! share them.

use std::sync::Arc;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{AnalysisError, Result};
use crate::grammar::{DisabledGrammarCorrector, GrammarCorrector, SpellingCorrector};
use crate::improve::TextImprover;
use crate::language::WhatlangDetector;
use crate::lexicon::Lexicons;
use crate::pipeline::SentimentPipeline;
use crate::polarity::{LexiconPolarityScorer, PolarityEngine, PolarityScorer};
use crate::translate::{build_translator, TranslatorAdapter};

pub struct Runtime {
    pub cfg: PipelineConfig,
    pub lexicons: Arc<Lexicons>,
    pub pipeline: SentimentPipeline,
    pub improver: TextImprover,
}

impl Runtime {
    /// Config from env/default path, then [`Runtime::from_config`].
    pub fn load() -> Result<Self> {
        let cfg =
            PipelineConfig::load_default().map_err(|e| AnalysisError::config(format!("{e:#}")))?;
        Self::from_config(cfg)
    }

    /// Config problems surface as [`AnalysisError::Config`], broken tables as
    /// [`AnalysisError::Lexicon`].
    pub fn from_config(cfg: PipelineConfig) -> Result<Self> {
        let lexicons = Arc::new(match &cfg.lexicon_dir {
            Some(dir) => Lexicons::from_dir(dir)?,
            None => Lexicons::builtin(),
        });

        let translator = build_translator(&cfg.translator)
            .map_err(|e| AnalysisError::config(format!("translator: {e:#}")))?;
        let translator = TranslatorAdapter::new(translator);
        let detector = Arc::new(WhatlangDetector::new(cfg.detector.require_reliable));
        let scorer: Arc<dyn PolarityScorer> = Arc::new(LexiconPolarityScorer::new(lexicons.clone()));
        let grammar: Arc<dyn GrammarCorrector> = if cfg.grammar.enabled {
            Arc::new(SpellingCorrector::new(lexicons.clone()))
        } else {
            Arc::new(DisabledGrammarCorrector)
        };

        // Safe diagnostics only: no endpoint credentials.
        info!(
            translator = translator.provider_name(),
            detector = "whatlang",
            require_reliable = cfg.detector.require_reliable,
            grammar = grammar.name(),
            vocabulary = lexicons.vocabulary.len(),
            "sentiment runtime ready"
        );

        let pipeline = SentimentPipeline::new(
            lexicons.clone(),
            detector,
            translator.clone(),
            scorer.clone(),
        );
        let improver = TextImprover::new(
            translator,
            PolarityEngine::new(scorer),
            grammar,
            lexicons.clone(),
        );

        Ok(Self {
            cfg,
            lexicons,
            pipeline,
            improver,
        })
    }

    /// Built-in tables, no network: translation disabled.
    pub fn offline() -> Result<Self> {
        Self::from_config(PipelineConfig::default())
    }
}
