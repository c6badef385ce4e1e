//! Emotional intensity from surface features only (no lexicon).
//!
//! Four signals, added on top of a neutral 1.0:
//! - runs of 3+ identical letters ("noooon", "suuuper"): +0.3 each
//! - runs of `!`: +0.2 each, at most +1.0 in total
//! - uppercase ratio above 0.3: + the ratio itself
//! - laughter / emoticon tokens (`:)`, `haha`, `mdr`, ...): +0.2 each
//!
//! The result is capped at 3.0.

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

pub const LETTER_RUN_WEIGHT: f32 = 0.3;
pub const LETTER_RUN_MIN: usize = 3;
pub const EXCLAMATION_WEIGHT: f32 = 0.2;
pub const EXCLAMATION_CAP: f32 = 1.0;
pub const CAPS_RATIO_THRESHOLD: f32 = 0.3;
pub const EMOTIVE_WEIGHT: f32 = 0.2;
pub const MAX_INTENSITY: f32 = 3.0;

/// Default emotive patterns, matched in order against the lowercased text.
pub const DEFAULT_EMOTIVE_PATTERNS: &[&str] = &[
    r"[:;]-?(?:[)(\]\[]|[dp]\b)",
    r"<3",
    r"haha",
    r"hihi",
    r"hehe",
    r"lol",
    r"ptdr",
    r"mdr",
];

static RE_EXCLAMATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"!+").expect("exclamation regex"));

static RE_EMOTIVE_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    compile_alternation(DEFAULT_EMOTIVE_PATTERNS.iter().copied()).expect("default emotive regex")
});

/// Ordered surface patterns used for the laughter/emoticon signal.
#[derive(Debug, Clone)]
pub struct EmotionalPatterns {
    sources: Vec<String>,
    emotive: Regex,
}

impl EmotionalPatterns {
    pub fn builtin() -> Self {
        Self {
            sources: DEFAULT_EMOTIVE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            emotive: RE_EMOTIVE_DEFAULT.clone(),
        }
    }

    /// Compile a custom pattern list. Earlier patterns take precedence where
    /// two of them could match at the same position.
    pub fn from_patterns<I, S>(patterns: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<String> = patterns.into_iter().map(|p| p.as_ref().to_string()).collect();
        if sources.is_empty() {
            anyhow::bail!("emotive pattern list is empty");
        }
        let emotive = compile_alternation(sources.iter().map(String::as_str))?;
        Ok(Self { sources, emotive })
    }

    pub fn patterns(&self) -> &[String] {
        &self.sources
    }

    /// Number of non-overlapping emotive matches in `lowered`.
    fn emotive_count(&self, lowered: &str) -> usize {
        self.emotive.find_iter(lowered).count()
    }
}

impl Default for EmotionalPatterns {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile_alternation<'a, I>(patterns: I) -> anyhow::Result<Regex>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for (i, p) in patterns.into_iter().enumerate() {
        Regex::new(p).with_context(|| format!("emotive pattern #{i} `{p}`"))?;
        if i > 0 {
            joined.push('|');
        }
        joined.push_str("(?:");
        joined.push_str(p);
        joined.push(')');
    }
    Regex::new(&joined).context("compiling emotive alternation")
}

/// Count maximal runs of at least `LETTER_RUN_MIN` identical letters,
/// compared case-insensitively. A run of any length counts once.
pub fn letter_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut prev: Option<char> = None;
    let mut len = 0usize;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphabetic() && prev == Some(c) {
            len += 1;
        } else {
            if len >= LETTER_RUN_MIN {
                runs += 1;
            }
            len = if c.is_alphabetic() { 1 } else { 0 };
        }
        prev = Some(c);
    }
    if len >= LETTER_RUN_MIN {
        runs += 1;
    }
    runs
}

/// Fraction of uppercase characters over all characters (0 for empty text).
pub fn caps_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f32 / total as f32
}

/// Multiplicative emphasis factor in [1.0, 3.0].
pub fn emotional_intensity(text: &str, patterns: &EmotionalPatterns) -> f32 {
    let mut intensity = 1.0_f32;
    let lowered = text.to_lowercase();

    intensity += letter_runs(text) as f32 * LETTER_RUN_WEIGHT;

    let bangs = RE_EXCLAMATION.find_iter(text).count() as f32;
    intensity += (bangs * EXCLAMATION_WEIGHT).min(EXCLAMATION_CAP);

    let caps = caps_ratio(text);
    if caps > CAPS_RATIO_THRESHOLD {
        intensity += caps;
    }

    intensity += patterns.emotive_count(&lowered) as f32 * EMOTIVE_WEIGHT;

    intensity.min(MAX_INTENSITY)
}
