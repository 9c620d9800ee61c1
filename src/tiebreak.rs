// Tie breaking and final selection

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TieBreakConfig;
use crate::types::Direction;

/// How exact score ties are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreakPolicy {
    /// Earliest direction in enumeration order wins; no randomness at all
    Stable,
    /// Small uniform noise added to every score
    Jitter,
}

/// A scored candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub direction: Direction,
    pub score: f64,
    pub jitter: f64,
}

impl ScoredMove {
    pub fn total(&self) -> f64 {
        self.score + self.jitter
    }
}

impl TieBreakConfig {
    /// Draws the jitter for one candidate; always 0 under `Stable`
    pub fn jitter<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.policy {
            TieBreakPolicy::Stable => 0.0,
            TieBreakPolicy::Jitter if self.jitter_magnitude > 0.0 => {
                rng.random::<f64>() * self.jitter_magnitude
            }
            TieBreakPolicy::Jitter => 0.0,
        }
    }
}

/// Argmax over `score + jitter`; the first maximum wins
pub fn select_best(scored: &[ScoredMove]) -> Option<&ScoredMove> {
    scored.iter().fold(None, |best: Option<&ScoredMove>, candidate| match best {
        Some(b) if b.total() >= candidate.total() => Some(b),
        _ => Some(candidate),
    })
}
