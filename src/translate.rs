// src/translate.rs
//! Best-effort translation.
//!
//! [`Translator`] is the single-operation seam over a translation service.
//! [`TranslatorAdapter`] is what the rest of the crate calls: it never fails,
//! English input skips the service entirely, and any error is logged once and
//! answered with the untranslated text.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::TranslatorConfig;
use crate::telemetry::anon_id;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Used when translation is disabled; every call fails so callers take their
/// fallback path.
#[derive(Debug, Clone, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
        bail!("translation disabled")
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// LibreTranslate-compatible HTTP API.
pub struct LibreTranslateClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sentiment-lens/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building translator http client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }
}

#[derive(Serialize)]
struct TranslateReq<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResp {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let req = TranslateReq {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let resp: TranslateResp = self
            .http
            .post(format!("{}/translate", self.endpoint))
            .json(&req)
            .send()
            .await
            .context("translate post")?
            .error_for_status()
            .context("translate non-2xx")?
            .json()
            .await
            .context("translate body")?;

        if resp.translated_text.trim().is_empty() && !text.trim().is_empty() {
            return Err(anyhow!("translator returned empty text"));
        }
        Ok(resp.translated_text)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}

pub type DynTranslator = Arc<dyn Translator>;

/// Factory: build a translator according to config.
///
/// * `enabled == false` or provider `"none"` → [`DisabledTranslator`].
/// * provider `"libretranslate"` → [`LibreTranslateClient`].
pub fn build_translator(cfg: &TranslatorConfig) -> Result<DynTranslator> {
    if !cfg.enabled {
        return Ok(Arc::new(DisabledTranslator));
    }
    match cfg.provider.as_str() {
        "libretranslate" => {
            let client = LibreTranslateClient::new(
                &cfg.endpoint,
                cfg.api_key.clone(),
                Duration::from_secs(cfg.timeout_secs),
            )?;
            Ok(Arc::new(client))
        }
        "none" => Ok(Arc::new(DisabledTranslator)),
        other => bail!("unsupported translator provider: {other}"),
    }
}

#[derive(Clone)]
pub struct TranslatorAdapter {
    inner: DynTranslator,
}

impl TranslatorAdapter {
    pub fn new(inner: DynTranslator) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }

    /// English-equivalent text. English input is returned as is without a call.
    pub async fn to_english(&self, text: &str, source: &str) -> String {
        if source == "en" {
            return text.to_string();
        }
        self.best_effort(text, source, "en").await
    }

    /// Translate English text back to `target`; English targets skip the call.
    pub async fn from_english(&self, text: &str, target: &str) -> String {
        if target == "en" {
            return text.to_string();
        }
        self.best_effort(text, "en", target).await
    }

    async fn best_effort(&self, text: &str, source: &str, target: &str) -> String {
        match self.inner.translate(text, source, target).await {
            Ok(out) => {
                debug!(id = %anon_id(text), source, target, "translated");
                out
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(
                    id = %anon_id(text),
                    provider = self.inner.name(),
                    source,
                    target,
                    %error,
                    "translation failed, keeping original text"
                );
                text.to_string()
            }
        }
    }
}
