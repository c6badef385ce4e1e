//! Negation markers and the compounding negation factor.
//!
//! Every token position whose 3-token lookback contains a marker multiplies
//! the factor by -0.8, so one negated position gives -0.8, two give 0.64,
//! three give -0.512, and so on.

use std::collections::HashSet;

pub const LOOKBACK: usize = 3;
pub const NEGATION_STEP: f32 = -0.8;

pub const DEFAULT_NEGATIONS: &[&str] = &[
    // French
    "pas", "non", "jamais", "rien", "aucun", "personne", "nulle", "point", "guère",
    // Wolof
    "déet", "deedeet",
    // English
    "not", "no", "never", "nothing", "nobody", "without", "cannot", "can't", "don't",
    "isn't", "wasn't", "won't",
];

#[derive(Debug, Clone, Default)]
pub struct NegationSet {
    markers: HashSet<String>,
}

impl NegationSet {
    pub fn builtin() -> Self {
        let mut set = Self::default();
        set.extend(DEFAULT_NEGATIONS.iter().copied());
        set
    }

    /// Add markers (lowercased, blanks ignored).
    pub fn extend<I, S>(&mut self, markers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for m in markers {
            let m = m.as_ref().trim().to_lowercase();
            if !m.is_empty() {
                self.markers.insert(m);
            }
        }
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.markers.contains(token)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Number of token positions that have a marker among the preceding
/// `LOOKBACK` whitespace tokens.
pub fn negated_positions(text: &str, negations: &NegationSet) -> usize {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    (0..words.len())
        .filter(|&i| {
            let start = i.saturating_sub(LOOKBACK);
            words[start..i].iter().any(|w| negations.contains(w))
        })
        .count()
}

/// Compounding negation factor: `NEGATION_STEP ^ negated_positions`.
pub fn negation_factor(text: &str, negations: &NegationSet) -> f32 {
    let n = negated_positions(text, negations);
    (0..n).fold(1.0_f32, |acc, _| acc * NEGATION_STEP)
}
