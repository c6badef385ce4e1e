//! Base scorer: valence-sum-and-normalize over the lexicon.
//!
//! compound = sum / sqrt(sum^2 + alpha), which is monotonic in `sum` and
//! strictly inside (-1, 1). Unknown tokens contribute 0, empty text scores 0.

use super::lexicon::ValenceLexicon;

/// Smoothing constant of the normalization (same order as classic VADER).
pub const NORMALIZATION_ALPHA: f32 = 15.0;

/// Compress a raw valence sum into [-1, 1].
pub fn normalize(sum: f32) -> f32 {
    normalize_wide(f64::from(sum))
}

// `hypot` keeps sum^2 from overflowing for very large valences. A non-finite
// sum stays non-finite (NaN) so the orchestrator can reject it.
fn normalize_wide(sum: f64) -> f32 {
    if sum == 0.0 {
        return 0.0;
    }
    let alpha = f64::from(NORMALIZATION_ALPHA);
    ((sum / sum.hypot(alpha.sqrt())) as f32).clamp(-1.0, 1.0)
}

/// Compound polarity of `text` in [-1, 1]. Pure; depends only on the lexicon.
pub fn score_base(text: &str, lexicon: &ValenceLexicon) -> f32 {
    let sum: f64 = text
        .split_whitespace()
        .map(|tok| f64::from(token_valence(tok, lexicon)))
        .sum();
    normalize_wide(sum)
}

/// Valence for one whitespace token.
///
/// Edge punctuation is trimmed ("génial," -> "génial"). Tokens made only of
/// punctuation are looked up raw so emoticons like `:)` still score. An
/// unknown elided form (`j'adore`) falls back to the part after the apostrophe.
fn token_valence(tok: &str, lexicon: &ValenceLexicon) -> f32 {
    let lower = tok.to_lowercase().replace('\u{2019}', "'");
    let word = lower.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return lexicon.valence(&lower);
    }
    if let Some(v) = lexicon.get(word) {
        return v;
    }
    match word.rsplit_once('\'') {
        Some((_, tail)) if !tail.is_empty() => lexicon.valence(tail),
        _ => 0.0,
    }
}
