//! Overlay configuration

use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cutoffs used by the decision overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Comments with at least this many tokens use the long-text cutoffs
    #[serde(default = "default_length_threshold")]
    pub length_threshold: usize,

    #[serde(default)]
    pub long_text: LongTextCutoffs,

    #[serde(default)]
    pub short_text: ShortTextCutoffs,

    /// Neutral mass required by the lukewarm-expression rule
    #[serde(default = "default_lukewarm_neutral")]
    pub lukewarm_neutral: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            length_threshold: default_length_threshold(),
            long_text: LongTextCutoffs::default(),
            short_text: ShortTextCutoffs::default(),
            lukewarm_neutral: default_lukewarm_neutral(),
        }
    }
}

impl OverlayConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid overlay config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Reject cutoffs outside [0, 1] and non-positive ratios
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("long_text.positive", self.long_text.positive),
            ("long_text.negative", self.long_text.negative),
            ("long_text.neutral", self.long_text.neutral),
            ("short_text.positive", self.short_text.positive),
            ("short_text.negative", self.short_text.negative),
            ("short_text.neutral", self.short_text.neutral),
            ("lukewarm_neutral", self.lukewarm_neutral),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        for (name, value) in [
            ("long_text.positive_ratio", self.long_text.positive_ratio),
            ("long_text.negative_ratio", self.long_text.negative_ratio),
        ] {
            if value <= 0.0 {
                return Err(Error::config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

/// Long comments need both an absolute probability and a margin over the
/// opposite class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTextCutoffs {
    #[serde(default = "default_long_positive")]
    pub positive: f64,
    /// Positive must be at least this multiple of Negative
    #[serde(default = "default_ratio")]
    pub positive_ratio: f64,
    #[serde(default = "default_long_negative")]
    pub negative: f64,
    /// Negative must be at least this multiple of Positive
    #[serde(default = "default_ratio")]
    pub negative_ratio: f64,
    #[serde(default = "default_neutral")]
    pub neutral: f64,
}

impl Default for LongTextCutoffs {
    fn default() -> Self {
        Self {
            positive: default_long_positive(),
            positive_ratio: default_ratio(),
            negative: default_long_negative(),
            negative_ratio: default_ratio(),
            neutral: default_neutral(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTextCutoffs {
    #[serde(default = "default_short_positive")]
    pub positive: f64,
    #[serde(default = "default_short_negative")]
    pub negative: f64,
    #[serde(default = "default_neutral")]
    pub neutral: f64,
}

impl Default for ShortTextCutoffs {
    fn default() -> Self {
        Self {
            positive: default_short_positive(),
            negative: default_short_negative(),
            neutral: default_neutral(),
        }
    }
}

fn default_length_threshold() -> usize {
    8
}

fn default_long_positive() -> f64 {
    0.55
}

fn default_long_negative() -> f64 {
    0.45
}

fn default_ratio() -> f64 {
    1.5
}

fn default_short_positive() -> f64 {
    0.45
}

fn default_short_negative() -> f64 {
    0.35
}

fn default_neutral() -> f64 {
    0.30
}

fn default_lukewarm_neutral() -> f64 {
    0.30
}
