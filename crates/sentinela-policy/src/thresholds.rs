//! Length-tiered thresholded argmax

use sentinela_core::{DecisionSource, Probabilities, Sentiment};

use crate::config::OverlayConfig;

/// Fallback applied when no rule fires.
///
/// Long comments must clear both an absolute cutoff and a margin over the
/// opposite class before leaving Neutral. Short comments use fixed cutoffs.
/// Anything below the Neutral floor falls through to raw argmax.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    config: OverlayConfig,
}

impl ThresholdPolicy {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn decide(&self, probs: &Probabilities, token_count: usize) -> (Sentiment, DecisionSource) {
        let (pos, neg, neu) = (probs.positive, probs.negative, probs.neutral);

        let (positive, negative, neutral_floor) = if token_count >= self.config.length_threshold {
            let long = &self.config.long_text;
            (
                pos >= long.positive && pos >= long.positive_ratio * neg,
                neg >= long.negative && neg >= long.negative_ratio * pos,
                long.neutral,
            )
        } else {
            let short = &self.config.short_text;
            (pos >= short.positive, neg >= short.negative, short.neutral)
        };

        if positive {
            (Sentiment::Positive, DecisionSource::Threshold)
        } else if negative {
            (Sentiment::Negative, DecisionSource::Threshold)
        } else if neu > neutral_floor {
            (Sentiment::Neutral, DecisionSource::Threshold)
        } else {
            (probs.argmax(), DecisionSource::Argmax)
        }
    }
}
