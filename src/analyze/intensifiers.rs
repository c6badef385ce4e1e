//! Amplifier words / phrases (French, Wolof, English) and the bounded boost.

use std::collections::HashMap;

/// Upper bound of the cumulative boost.
pub const MAX_BOOST: f32 = 2.5;

/// Built-in multipliers. Keys containing a space are phrases.
pub const DEFAULT_INTENSIFIERS: &[(&str, f32)] = &[
    // French
    ("très", 1.5),
    ("vraiment", 1.4),
    ("super", 1.3),
    ("hyper", 1.4),
    ("trop", 1.2),
    ("complètement", 1.6),
    ("totalement", 1.5),
    ("extrêmement", 1.7),
    ("énormément", 1.6),
    // Wolof
    ("lool", 1.4),
    ("bu bees", 1.3),
    ("bari", 1.2),
    // English
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.7),
    ("totally", 1.5),
];

/// word/phrase -> multiplier (> 0). Single words match whole whitespace tokens,
/// phrases match by substring in the lowercased text.
#[derive(Debug, Clone, Default)]
pub struct IntensifierTable {
    words: HashMap<String, f32>,
    phrases: Vec<(String, f32)>,
}

impl IntensifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut t = Self::new();
        for (key, mult) in DEFAULT_INTENSIFIERS {
            // Built-ins are positive and finite by construction.
            let _ = t.insert(key, *mult);
        }
        t
    }

    /// Add or replace an entry. Rejects non-finite or non-positive multipliers.
    /// Whitespace inside a phrase is collapsed to single spaces.
    pub fn insert(&mut self, key: &str, multiplier: f32) -> anyhow::Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            anyhow::bail!("intensifier `{key}` has invalid multiplier {multiplier}");
        }
        let key = key
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if key.is_empty() {
            anyhow::bail!("intensifier key is empty");
        }
        if key.contains(char::is_whitespace) {
            match self.phrases.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = multiplier,
                None => self.phrases.push((key, multiplier)),
            }
        } else {
            self.words.insert(key, multiplier);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.words.get(key).copied().or_else(|| {
            self.phrases
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, m)| *m)
        })
    }

    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cumulative boost for `text`, capped at `MAX_BOOST`.
    pub fn boost(&self, text: &str) -> f32 {
        let lowered = text.to_lowercase();
        let mut total = 1.0_f32;

        for word in lowered.split_whitespace() {
            if let Some(m) = self.words.get(word) {
                tracing::debug!(intensifier = word, multiplier = *m, "intensifier hit");
                total *= m;
            }
        }
        for (phrase, m) in &self.phrases {
            for _ in lowered.matches(phrase.as_str()) {
                tracing::debug!(intensifier = %phrase, multiplier = *m, "intensifier hit");
                total *= m;
            }
        }

        total.min(MAX_BOOST)
    }
}

/// Scale `base_score` by the text's intensifier boost.
pub fn apply_intensifiers(text: &str, base_score: f32, table: &IntensifierTable) -> f32 {
    base_score * table.boost(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn no_intensifier_keeps_score() {
        let t = IntensifierTable::builtin();
        assert_eq!(apply_intensifiers("c'est bien", 0.4, &t), 0.4);
    }

    #[test]
    fn token_match_is_case_insensitive() {
        let t = IntensifierTable::builtin();
        assert!(approx(apply_intensifiers("TRÈS bien", 0.4, &t), 0.6));
        assert!(approx(apply_intensifiers("xiif lool", -0.5, &t), -0.7));
    }

    #[test]
    fn multipliers_compound_up_to_the_cap() {
        let t = IntensifierTable::builtin();
        // 1.5 * 1.4 = 2.1
        assert!(approx(t.boost("très vraiment"), 2.1));
        // 1.5 * 1.7 * 1.6 > 2.5
        assert_eq!(t.boost("très extrêmement complètement"), MAX_BOOST);
    }

    #[test]
    fn phrases_match_by_substring() {
        let t = IntensifierTable::builtin();
        assert!(approx(t.boost("dama xiif bu bees"), 1.3));
        assert!(approx(t.boost("BU BEES bu bees"), 1.69));
    }

    #[test]
    fn punctuation_glued_tokens_do_not_match() {
        let t = IntensifierTable::builtin();
        assert_eq!(t.boost("très!"), 1.0);
    }

    #[test]
    fn insert_validates_and_overrides() {
        let mut t = IntensifierTable::builtin();
        assert!(t.insert("grave", 0.0).is_err());
        assert!(t.insert("grave", f32::NAN).is_err());
        assert!(t.insert("  ", 1.2).is_err());
        t.insert("Grave", 1.3).unwrap();
        t.insert("trop", 1.25).unwrap();
        assert_eq!(t.get("grave"), Some(1.3));
        assert_eq!(t.get("trop"), Some(1.25));
        assert_eq!(t.get("bu bees"), Some(1.3));
    }

    #[test]
    fn phrase_spacing_is_collapsed_on_insert() {
        let mut t = IntensifierTable::new();
        t.insert(" Bu   Baax\t", 1.3).unwrap();
        assert_eq!(t.get("bu baax"), Some(1.3));
        assert_eq!(t.len(), 1);
        assert!(approx(t.boost("dafa neex bu baax"), 1.3));
    }

    #[test]
    fn boost_magnitude_grows_with_an_intensifier() {
        let t = IntensifierTable::builtin();
        for base in [-0.8_f32, -0.1, 0.1, 0.8] {
            let plain = apply_intensifiers("content", base, &t).abs();
            let boosted = apply_intensifiers("vraiment content", base, &t).abs();
            assert!(boosted > plain, "base {base}: {boosted} <= {plain}");
        }
    }
}
