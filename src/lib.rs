// src/lib.rs
// Public library surface for the binary, integration tests and embedding hosts.

pub mod config;
pub mod emotion;
pub mod error;
pub mod grammar;
pub mod highlight;
pub mod improve;
pub mod intensity;
pub mod language;
pub mod lexicon;
pub mod pipeline;
pub mod polarity;
pub mod preferences;
pub mod runtime;
pub mod stats;
pub mod telemetry;
pub mod text;
pub mod translate;

// ---- Re-exports for stable public API ----
pub use crate::config::PipelineConfig;
pub use crate::emotion::{EmotionCategory, EmotionScores};
pub use crate::error::{AnalysisError, DetectionError};
pub use crate::improve::{ImprovementSuggestions, TextImprover};
pub use crate::intensity::IntensityTier;
pub use crate::lexicon::Lexicons;
pub use crate::pipeline::{AnalysisResult, SentimentPipeline};
pub use crate::polarity::SentimentLabel;
pub use crate::preferences::{AnalysisView, DisplayPreferences};
pub use crate::runtime::Runtime;
