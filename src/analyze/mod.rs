// src/analyze/mod.rs
//! Analysis pipeline entry: base score -> cross-lingual blend -> intensifiers
//! -> emotional intensity -> negation -> clamp -> label.

pub mod intensifiers;
pub mod intensity;
pub mod lexicon;
pub mod negation;
pub mod oracle;
pub mod scoring;
pub mod translate;

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};

use crate::debug::dev_log_analysis;

// Re-export convenient types.
pub use crate::analyze::intensifiers::{apply_intensifiers, IntensifierTable};
pub use crate::analyze::intensity::{emotional_intensity, EmotionalPatterns};
pub use crate::analyze::lexicon::{build_lexicon, ValenceLexicon};
pub use crate::analyze::negation::{negation_factor, NegationSet};
pub use crate::analyze::oracle::{
    build_oracle, Detection, DisabledOracle, DynOracle, LanguageOracle, MockOracle,
};
pub use crate::analyze::scoring::score_base;
pub use crate::analyze::translate::{maybe_translate_and_score, CrossLingual, TranslationPolicy};

pub const POSITIVE_THRESHOLD: f32 = 0.15;
pub const NEGATIVE_THRESHOLD: f32 = -0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f32) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Every intermediate value of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTrace {
    /// Lexicon score of the text as written.
    pub native_score: f32,
    pub translated_score: Option<f32>,
    pub detected_language: Option<String>,
    /// Native score, averaged with the translated one when present.
    pub base_score: f32,
    pub intensified_score: f32,
    pub emotional_intensity: f32,
    pub negation_factor: f32,
    pub final_score: f32,
    pub translation_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub label: SentimentLabel,
    pub score: f32,
    pub trace: AnalysisTrace,
}

/// Immutable scoring tables, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct SentimentTables {
    pub lexicon: ValenceLexicon,
    pub intensifiers: IntensifierTable,
    pub negations: NegationSet,
    pub patterns: EmotionalPatterns,
}

impl SentimentTables {
    pub fn builtin() -> Self {
        Self {
            lexicon: build_lexicon(),
            intensifiers: IntensifierTable::builtin(),
            negations: NegationSet::builtin(),
            patterns: EmotionalPatterns::builtin(),
        }
    }
}

pub struct SmartAnalyzer {
    tables: Arc<SentimentTables>,
    oracle: DynOracle,
    policy: TranslationPolicy,
}

impl SmartAnalyzer {
    pub fn new(tables: Arc<SentimentTables>, oracle: DynOracle, policy: TranslationPolicy) -> Self {
        Self {
            tables,
            oracle,
            policy,
        }
    }

    /// Analyzer without cross-lingual blending.
    pub fn offline(tables: Arc<SentimentTables>) -> Self {
        Self::new(tables, Arc::new(DisabledOracle), TranslationPolicy::default())
    }

    pub fn tables(&self) -> &SentimentTables {
        &self.tables
    }

    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    /// Run the full pipeline. Steps are strictly ordered: negation and
    /// emphasis act on the already-intensified magnitude.
    ///
    /// Errors only when an intermediate value is not finite.
    pub async fn analyze(&self, text: &str) -> anyhow::Result<Analysis> {
        let started = Instant::now();
        let t = &*self.tables;

        // (1) Lexicon score
        let native = score_base(text, &t.lexicon);

        // (2) Cross-lingual blend
        let cross =
            maybe_translate_and_score(text, self.oracle.as_ref(), &t.lexicon, &self.policy).await;
        let base = match cross.translated_score {
            Some(translated) => (native + translated) / 2.0,
            None => native,
        };

        // (3) Intensifiers
        let intensified = apply_intensifiers(text, base, &t.intensifiers);

        // (4)-(5) Emphasis
        let intensity = emotional_intensity(text, &t.patterns);
        let mut raw_final = intensified * intensity;

        // (6) Negation
        let negation = negation_factor(text, &t.negations);
        raw_final *= negation;

        let checks = [
            ("base", base),
            ("intensified", intensified),
            ("intensity", intensity),
            ("negation", negation),
            ("final", raw_final),
        ];
        if let Some((stage, v)) = checks.iter().find(|(_, v)| !v.is_finite()) {
            anyhow::bail!("non-finite {stage} score ({v})");
        }

        // (7)-(8) Clamp + classify
        let final_score = raw_final.clamp(-1.0, 1.0);
        let label = SentimentLabel::from_score(final_score);

        let trace = AnalysisTrace {
            native_score: native,
            translated_score: cross.translated_score,
            detected_language: cross.detected.map(|d| d.lang),
            base_score: base,
            intensified_score: intensified,
            emotional_intensity: intensity,
            negation_factor: negation,
            final_score,
            translation_info: cross.info,
        };

        counter!("sentiment_analyses_total", "label" => label.as_str()).increment(1);
        histogram!("sentiment_analysis_ms").record(started.elapsed().as_secs_f64() * 1_000.0);
        dev_log_analysis(text, label, &trace);

        Ok(Analysis {
            label,
            score: final_score,
            trace,
        })
    }
}
