use super::*;

fn default_score(a: usize, b: usize) -> f64 {
    compute_score(a, b, &ScoreWeights::default())
}

#[test]
fn no_findings_is_perfect() {
    assert_eq!(default_score(0, 0), 100.0);
}

#[test]
fn mixed_findings() {
    assert_eq!(default_score(3, 4), 95.0);
    assert_eq!(default_score(0, 1), 99.5);
    assert_eq!(default_score(10, 0), 90.0);
}

#[test]
fn floored_at_zero() {
    assert_eq!(default_score(100, 0), 0.0);
    assert_eq!(default_score(150, 300), 0.0);
    assert_eq!(default_score(0, 201), 0.0);
}

#[test]
fn never_negative_and_matches_formula() {
    for a in 0..130 {
        for b in (0..260).step_by(7) {
            let s = default_score(a, b);
            let expected = (100.0 - a as f64 - 0.5 * b as f64).max(0.0);
            assert!(s >= 0.0);
            assert!((s - expected).abs() < 1e-9, "a={a} b={b}: {s} != {expected}");
        }
    }
}

#[test]
fn custom_weights() {
    let w = ScoreWeights {
        structured: 2.0,
        text: 0.0,
    };
    assert_eq!(compute_score(5, 1000, &w), 90.0);
}

#[test]
fn weights_from_config() {
    let cfg = crate::config::ScoringConfig {
        structured_penalty: 1.5,
        text_penalty: 0.25,
    };
    let w = ScoreWeights::from(&cfg);
    assert_eq!(w.structured, 1.5);
    assert_eq!(w.text, 0.25);
    assert_eq!(ScoreWeights::from(&crate::config::ScoringConfig::default()), ScoreWeights::default());
}
