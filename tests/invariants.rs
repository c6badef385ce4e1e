// tests/invariants.rs
//
// Seeded randomized checks of the pipeline bounds over noisy chat-like text.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use teranga_sentiment::analyze::{
    apply_intensifiers, emotional_intensity, score_base, SentimentTables, SmartAnalyzer,
};

const WORDS: &[&str] = &[
    "pas", "non", "jamais", "déet", "not", "très", "vraiment", "lool", "bu", "bees", "super",
    "génial", "déteste", "content", "baax", "xiif", "teranga", "bon", "happy", "hate", "lol",
    "mdr", "haha", ":)", ":(", "<3", "!!!", "?!", "...", "NOOOON", "GÉNIAL", "suuuper", "ok",
    "c'est", "j'adore", "Mungi", "rek", "du", "tout", "¿Cómo", "estás?",
];

fn random_message(rng: &mut StdRng) -> String {
    let n = rng.random_range(0..24);
    let mut out = String::new();
    for i in 0..n {
        if i > 0 {
            out.push(' ');
        }
        if rng.random_bool(0.8) {
            out.push_str(WORDS[rng.random_range(0..WORDS.len())]);
        } else {
            // raw noise: letters, caps, punctuation
            let len = rng.random_range(1..8);
            for _ in 0..len {
                let c = match rng.random_range(0..5) {
                    0 => rng.random_range(b'a'..=b'z') as char,
                    1 => rng.random_range(b'A'..=b'Z') as char,
                    2 => '!',
                    3 => 'o',
                    _ => 'é',
                };
                out.push(c);
            }
        }
    }
    out
}

#[tokio::test]
async fn final_score_and_intensity_stay_bounded() {
    let tables = Arc::new(SentimentTables::builtin());
    let an = SmartAnalyzer::offline(tables.clone());
    let mut rng = StdRng::seed_from_u64(0x7e7a);

    for _ in 0..2_000 {
        let msg = random_message(&mut rng);
        let a = an.analyze(&msg).await.expect("analysis");
        assert!(
            (-1.0..=1.0).contains(&a.score),
            "score {} out of range for {msg:?}",
            a.score
        );
        let i = emotional_intensity(&msg, &tables.patterns);
        assert!((1.0..=3.0).contains(&i), "intensity {i} for {msg:?}");
        assert_eq!(a.trace.emotional_intensity, i);
        let b = score_base(&msg, &tables.lexicon);
        assert!((-1.0..=1.0).contains(&b), "base {b} for {msg:?}");
    }
}

#[tokio::test]
async fn analysis_is_deterministic_without_an_oracle() {
    let an = SmartAnalyzer::offline(Arc::new(SentimentTables::builtin()));
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..300 {
        let msg = random_message(&mut rng);
        let first = an.analyze(&msg).await.unwrap();
        let second = an.analyze(&msg).await.unwrap();
        assert_eq!(first.trace, second.trace, "{msg:?}");
        assert_eq!(first.label, second.label);
    }
}

#[test]
fn intensifier_never_shrinks_magnitude() {
    let tables = SentimentTables::builtin();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let msg = random_message(&mut rng);
        let base: f32 = rng.random_range(-1.0..1.0);
        if base == 0.0 {
            continue;
        }
        let without = apply_intensifiers(&msg, base, &tables.intensifiers).abs();
        let with = apply_intensifiers(&format!("très {msg}"), base, &tables.intensifiers).abs();
        // capped boosts may already sit at the ceiling
        assert!(with >= without, "{msg:?}: {with} < {without}");
    }
}
