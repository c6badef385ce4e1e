//! Language oracle: detect-language + translate, behind one capability trait.
//!
//! Providers:
//! - `LibreTranslateOracle`: real remote calls (LibreTranslate-compatible JSON API)
//! - `DisabledOracle`: never called, the pipeline skips cross-lingual blending
//! - `MockOracle`: canned results (or failures) for tests and local runs

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::oracle::OracleConfig;

/// Detected dominant language with a confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub lang: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(lang: impl Into<String>, confidence: f32) -> Self {
        Self {
            lang: lang.into().to_lowercase(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
pub trait LanguageOracle: Send + Sync {
    async fn detect(&self, text: &str) -> anyhow::Result<Detection>;
    async fn translate(&self, text: &str, dest_lang: &str) -> anyhow::Result<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
    /// `false` lets callers skip the oracle without counting a failure.
    fn enabled(&self) -> bool {
        true
    }
}

pub type DynOracle = Arc<dyn LanguageOracle>;

/// Factory: build an oracle according to config.
///
/// * `enabled == false` or provider "disabled" -> `DisabledOracle`
/// * provider "libretranslate" -> `LibreTranslateOracle` with the configured timeout
pub fn build_oracle(config: &OracleConfig) -> anyhow::Result<DynOracle> {
    if !config.enabled {
        return Ok(Arc::new(DisabledOracle));
    }
    match config.provider.as_str() {
        "libretranslate" => {
            let oracle = LibreTranslateOracle::new(
                &config.base_url,
                config.api_key.clone(),
                Duration::from_millis(config.timeout_ms),
            )?;
            Ok(Arc::new(oracle))
        }
        "disabled" => Ok(Arc::new(DisabledOracle)),
        other => anyhow::bail!("unsupported oracle provider: {other}"),
    }
}

// ------------------------------------------------------------
// LibreTranslate provider
// ------------------------------------------------------------

pub struct LibreTranslateOracle {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateOracle {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("teranga-sentiment/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout.min(Duration::from_secs(4)))
            .timeout(timeout)
            .build()
            .context("building oracle http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl LanguageOracle for LibreTranslateOracle {
    async fn detect(&self, text: &str) -> anyhow::Result<Detection> {
        #[derive(Serialize)]
        struct Req<'a> {
            q: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            api_key: Option<&'a str>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            language: String,
            /// Percent, 0..100.
            confidence: f32,
        }

        let candidates: Vec<Candidate> = self
            .http
            .post(self.endpoint("detect"))
            .json(&Req {
                q: text,
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await
            .context("detect request")?
            .error_for_status()
            .context("detect status")?
            .json()
            .await
            .context("detect body")?;

        let best = candidates
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .ok_or_else(|| anyhow!("detect returned no candidates"))?;
        Ok(Detection::new(best.language, best.confidence / 100.0))
    }

    async fn translate(&self, text: &str, dest_lang: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Req<'a> {
            q: &'a str,
            source: &'a str,
            target: &'a str,
            format: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            api_key: Option<&'a str>,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Resp {
            translated_text: String,
        }

        let body: Resp = self
            .http
            .post(self.endpoint("translate"))
            .json(&Req {
                q: text,
                source: "auto",
                target: dest_lang,
                format: "text",
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await
            .context("translate request")?
            .error_for_status()
            .context("translate status")?
            .json()
            .await
            .context("translate body")?;

        let out = body.translated_text.trim().to_string();
        if out.is_empty() {
            anyhow::bail!("translate returned an empty rendering");
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}

// ------------------------------------------------------------
// Disabled + mock providers
// ------------------------------------------------------------

/// Used when the oracle is turned off in config.
pub struct DisabledOracle;

#[async_trait]
impl LanguageOracle for DisabledOracle {
    async fn detect(&self, _text: &str) -> anyhow::Result<Detection> {
        Err(anyhow!("language oracle disabled"))
    }
    async fn translate(&self, _text: &str, _dest_lang: &str) -> anyhow::Result<String> {
        Err(anyhow!("language oracle disabled"))
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
    fn enabled(&self) -> bool {
        false
    }
}

/// Deterministic oracle. A `None` field makes the matching call fail.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    pub detection: Option<Detection>,
    pub translation: Option<String>,
}

impl MockOracle {
    pub fn canned(lang: &str, confidence: f32, translation: &str) -> Self {
        Self {
            detection: Some(Detection::new(lang, confidence)),
            translation: Some(translation.to_string()),
        }
    }

    /// Every call errors, like an unreachable service.
    pub fn failing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LanguageOracle for MockOracle {
    async fn detect(&self, _text: &str) -> anyhow::Result<Detection> {
        self.detection
            .clone()
            .ok_or_else(|| anyhow!("mock oracle: detection unavailable"))
    }
    async fn translate(&self, _text: &str, _dest_lang: &str) -> anyhow::Result<String> {
        self.translation
            .clone()
            .ok_or_else(|| anyhow!("mock oracle: translation unavailable"))
    }
    fn name(&self) -> &'static str {
        "mock"
    }
}
