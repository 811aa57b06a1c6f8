//! Token estimation.
//!
//! Exact tokenization depends on the provider's encoding, so the
//! conversation takes any [`TokenEstimator`]. The default estimate is one
//! token per four characters, rounded up.

/// Tokens added per message for role and framing
pub const MESSAGE_OVERHEAD_TOKENS: usize = 4;

/// Estimates how many tokens a piece of text costs.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> usize;
}

/// Character-ratio heuristic (`ceil(chars / chars_per_token)`)
#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    chars_per_token: usize,
}

impl CharRatioEstimator {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}
