// src/error.rs
//! Error types surfaced at the library boundary.
//!
//! Only invalid input and broken configuration ever reach a caller. Failures of
//! the external capabilities (detection, translation, grammar correction) are
//! absorbed by their adapters and replaced with a fallback.

/// Result alias for boundary operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Missing or malformed request field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Config file, environment override or translator settings rejected.
    #[error("configuration error: {0}")]
    Config(String),

    /// A data table could not be read or parsed.
    #[error("lexicon error: {0}")]
    Lexicon(String),
}

impl AnalysisError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn lexicon(msg: impl Into<String>) -> Self {
        Self::Lexicon(msg.into())
    }
}

/// Raised by a [`crate::language::LanguageDetector`]; never leaves the identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("no language features in input")]
    NoFeatures,

    #[error("detection below reliability threshold ({0})")]
    Unreliable(String),

    #[error("detector failure: {0}")]
    Backend(String),
}
