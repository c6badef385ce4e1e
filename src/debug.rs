//! Dev-only diagnostics for analyses. Raw message text is never logged,
//! only a short SHA-256 based id.

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::analyze::{AnalysisTrace, SentimentLabel};

pub const ENV_DEV_LOG: &str = "SENTIMENT_DEV_LOG";

// Dev logging gate: SENTIMENT_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn dev_log_analysis(text: &str, label: SentimentLabel, trace: &AnalysisTrace) {
    let id = anon_hash(text);
    debug!(
        target: "sentiment",
        %id,
        base = trace.base_score,
        intensified = trace.intensified_score,
        intensity = trace.emotional_intensity,
        negation = trace.negation_factor,
        score = trace.final_score,
        "analysis trace"
    );
    if !dev_logging_enabled() {
        return;
    }
    info!(
        target: "sentiment",
        %id,
        label = label.as_str(),
        score = trace.final_score,
        lang = ?trace.detected_language,
        translated = trace.translation_info.is_some(),
        chars = text.chars().count(),
        "analysis"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("Mungi xiif lool");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, anon_hash("Mungi xiif lool"));
        assert_ne!(a, anon_hash("Ana baax rek"));
        // sha256("") = e3b0c442 98fc...
        assert_eq!(anon_hash(""), "e3b0c44298fc");
    }
}
