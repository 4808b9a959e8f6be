// src/config/mod.rs
//! Pipeline configuration (TOML or JSON).
//!
//! Resolution order:
//! 1) `$SENTIMENT_CONFIG_PATH` (must exist)
//! 2) `config/sentiment.toml`
//! 3) built-in defaults
//!
//! `SENTIMENT_TRANSLATOR_ENABLED=0|1` overrides `translator.enabled` after loading.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_TRANSLATOR_ENABLED: &str = "SENTIMENT_TRANSLATOR_ENABLED";
pub const ENV_TRANSLATOR_API_KEY: &str = "TRANSLATOR_API_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";

const DEFAULT_ENDPOINT: &str = "https://libretranslate.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub translator: TranslatorConfig,
    pub detector: DetectorConfig,
    pub grammar: GrammarConfig,
    /// Directory with replacement data tables; missing files use the embedded ones.
    pub lexicon_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub enabled: bool,
    /// "libretranslate" | "none" (case-insensitive)
    pub provider: String,
    pub endpoint: String,
    /// "ENV" means: read from TRANSLATOR_API_KEY
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "libretranslate".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Treat low-confidence detections as failures (English fallback).
    pub require_reliable: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            require_reliable: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub enabled: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl PipelineConfig {
    /// Load from an explicit path. `.json` parses as JSON, anything else as TOML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let cfg: PipelineConfig = if ext == "json" {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing JSON config {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("parsing TOML config {}", path.display()))?
        };
        cfg.finalize()
    }

    /// Load using env var + fallbacks (see module docs).
    pub fn load_default() -> Result<Self> {
        let cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display());
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default().finalize()?
        };
        cfg.apply_env_overrides()
    }

    /// Normalize provider, resolve the API key and sanitize numeric ranges.
    fn finalize(mut self) -> Result<Self> {
        let t = &mut self.translator;
        t.provider = t.provider.trim().to_lowercase();
        if !matches!(t.provider.as_str(), "libretranslate" | "none") {
            bail!("Unsupported translator provider in config: {}", t.provider);
        }

        if let Some(key) = &t.api_key {
            if key.trim().eq_ignore_ascii_case("env") {
                let resolved = env::var(ENV_TRANSLATOR_API_KEY)
                    .map_err(|_| anyhow!("Missing {ENV_TRANSLATOR_API_KEY} env var"))?;
                t.api_key = Some(resolved);
            }
        }

        if t.endpoint.trim().is_empty() {
            t.endpoint = DEFAULT_ENDPOINT.to_string();
        }
        t.timeout_secs = t.timeout_secs.clamp(1, MAX_TIMEOUT_SECS);
        Ok(self)
    }

    fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(v) = env::var(ENV_TRANSLATOR_ENABLED) {
            self.translator.enabled = match v.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => bail!("{ENV_TRANSLATOR_ENABLED} must be 0 or 1, got {other:?}"),
            };
        }
        Ok(self)
    }
}
