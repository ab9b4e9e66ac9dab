//! Quality score from finding counts.
//!
//! The score starts at 100 and loses a fixed penalty per finding,
//! structured findings weighing more than line-oriented ones, and is
//! floored at zero.

use serde::Serialize;

use crate::config::ScoringConfig;

/// Perfect score for a repository with no findings.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    /// Deduction per structured finding (pylint).
    pub structured: f64,
    /// Deduction per line-oriented finding (flake8).
    pub text: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            structured: 1.0,
            text: 0.5,
        }
    }
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(cfg: &ScoringConfig) -> Self {
        Self {
            structured: cfg.structured_penalty,
            text: cfg.text_penalty,
        }
    }
}

/// `max(0, 100 - structured * w_structured - text * w_text)`.
pub fn compute_score(structured: usize, text: usize, weights: &ScoreWeights) -> f64 {
    let raw = MAX_SCORE - structured as f64 * weights.structured - text as f64 * weights.text;
    raw.max(0.0)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
