//! Cross-lingual normalization: translate non-native text and re-score it.
//!
//! Any oracle failure or timeout degrades to "no translation"; nothing here
//! is ever surfaced to the caller.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, warn};

use super::lexicon::ValenceLexicon;
use super::oracle::{Detection, LanguageOracle};
use super::scoring::score_base;
use crate::config::oracle::OracleConfig;

/// When to trust a detection enough to translate.
#[derive(Debug, Clone)]
pub struct TranslationPolicy {
    /// Languages the lexicon covers natively; never translated.
    pub native_languages: HashSet<String>,
    /// Detection confidence must be strictly above this.
    pub min_confidence: f32,
    pub target_language: String,
    /// Per oracle call.
    pub timeout: Duration,
}

impl Default for TranslationPolicy {
    fn default() -> Self {
        Self::from_config(&OracleConfig::default())
    }
}

impl TranslationPolicy {
    pub fn from_config(cfg: &OracleConfig) -> Self {
        Self {
            native_languages: cfg
                .native_languages
                .iter()
                .map(|l| l.trim().to_lowercase())
                .collect(),
            min_confidence: cfg.min_confidence,
            target_language: cfg.target_language.clone(),
            timeout: Duration::from_millis(cfg.timeout_ms),
        }
    }

    pub fn should_translate(&self, detected: &Detection) -> bool {
        !self.native_languages.contains(&detected.lang) && detected.confidence > self.min_confidence
    }
}

/// Outcome of the cross-lingual step. `translated_score` and `info` are
/// either both set or both empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossLingual {
    pub detected: Option<Detection>,
    pub translated_score: Option<f32>,
    pub info: Option<String>,
}

impl CrossLingual {
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Detect the language of `text`; when it is foreign and confidently
/// detected, translate it and score the rendering with the same lexicon.
pub async fn maybe_translate_and_score(
    text: &str,
    oracle: &dyn LanguageOracle,
    lexicon: &ValenceLexicon,
    policy: &TranslationPolicy,
) -> CrossLingual {
    if text.trim().is_empty() || !oracle.enabled() {
        return CrossLingual::skipped();
    }

    let Some(detected) = guarded("detect", policy.timeout, oracle.detect(text)).await else {
        return CrossLingual::skipped();
    };
    debug!(
        provider = oracle.name(),
        lang = %detected.lang,
        confidence = detected.confidence,
        "language detected"
    );

    if !policy.should_translate(&detected) {
        return CrossLingual {
            detected: Some(detected),
            ..CrossLingual::default()
        };
    }

    let Some(rendering) = guarded(
        "translate",
        policy.timeout,
        oracle.translate(text, &policy.target_language),
    )
    .await
    else {
        return CrossLingual {
            detected: Some(detected),
            ..CrossLingual::default()
        };
    };

    let score = score_base(&rendering, lexicon);
    counter!("sentiment_translations_total").increment(1);
    debug!(lang = %detected.lang, translated_score = score, "translated and re-scored");

    CrossLingual {
        detected: Some(detected),
        translated_score: Some(score),
        info: Some(format!("Translated: {rendering}")),
    }
}

/// Run one oracle call under `limit`; errors and timeouts become `None`.
async fn guarded<T, F>(stage: &'static str, limit: Duration, call: F) -> Option<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(v)) => Some(v),
        Ok(Err(e)) => {
            debug!(stage, error = %format!("{e:#}"), "oracle call failed");
            counter!("sentiment_oracle_errors_total", "stage" => stage).increment(1);
            None
        }
        Err(_) => {
            warn!(stage, timeout_ms = limit.as_millis() as u64, "oracle call timed out");
            counter!("sentiment_oracle_errors_total", "stage" => stage).increment(1);
            None
        }
    }
}
