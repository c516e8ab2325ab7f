//! Core types for Sentinela

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Three-class sentiment taxonomy.
///
/// Index order is canonical and persisted with every model artifact:
/// Negative = 0, Neutral = 1, Positive = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// All classes in canonical index order
    pub const ALL: [Sentiment; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// Priority used when two classes share the top probability
    pub const TIE_BREAK: [Sentiment; 3] = [Self::Neutral, Self::Negative, Self::Positive];

    /// Canonical class index
    pub fn index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Neutral => 1,
            Self::Positive => 2,
        }
    }

    /// Class for a canonical index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label string
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass over the three classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl Probabilities {
    /// Build from raw class scores in canonical order, normalizing to sum 1.
    ///
    /// Degenerate input (non-finite, negative, or all zero) yields the uniform triple.
    pub fn from_scores(scores: [f64; 3]) -> Self {
        let valid = scores.iter().all(|s| s.is_finite() && *s >= 0.0);
        let sum: f64 = scores.iter().sum();
        if !valid || sum <= f64::EPSILON {
            return Self::uniform();
        }
        Self {
            negative: scores[0] / sum,
            neutral: scores[1] / sum,
            positive: scores[2] / sum,
        }
    }

    /// Uniform triple
    pub fn uniform() -> Self {
        Self {
            negative: 1.0 / 3.0,
            neutral: 1.0 / 3.0,
            positive: 1.0 / 3.0,
        }
    }

    /// Probability of one class
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    /// Scores in canonical index order
    pub fn as_array(&self) -> [f64; 3] {
        [self.negative, self.neutral, self.positive]
    }

    /// Sum of the triple
    pub fn total(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }

    /// Largest class probability
    pub fn max(&self) -> f64 {
        self.negative.max(self.neutral).max(self.positive)
    }

    /// Most probable class, ties resolved by [`Sentiment::TIE_BREAK`]
    pub fn argmax(&self) -> Sentiment {
        let mut best = Sentiment::TIE_BREAK[0];
        for candidate in Sentiment::TIE_BREAK.iter().skip(1) {
            if self.get(*candidate) > self.get(best) {
                best = *candidate;
            }
        }
        best
    }
}

/// Confidence bucket reported alongside the numeric confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.75 {
            Self::High
        } else if confidence >= 0.50 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Selected lexical features reported with each prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub emoji_score: f64,
    pub pos_word_score: f64,
    pub neg_word_score: f64,
    pub sentiment_diff: f64,
    pub overall_sentiment: f64,
    pub word_count: usize,
    pub char_count: usize,
    pub is_simple_courtesy: bool,
}

/// What produced the final label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionSource {
    /// An overlay rule fired
    Rule { name: String },
    /// The length-tiered threshold policy
    Threshold,
    /// Raw argmax with the fixed tie-break order
    Argmax,
}

impl fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule { name } => write!(f, "rule:{name}"),
            Self::Threshold => f.write_str("threshold"),
            Self::Argmax => f.write_str("argmax"),
        }
    }
}

/// A single classification outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Final label after the decision overlay
    pub label: Sentiment,

    /// Ensemble probabilities, reported unchanged by the overlay
    pub probabilities: Probabilities,

    /// Largest class probability
    pub confidence: f64,

    /// Lexical feature snapshot
    pub features: FeatureSnapshot,

    /// Rule or policy that decided the label
    pub decided_by: DecisionSource,

    /// When the prediction was made
    pub timestamp: DateTime<Utc>,
}

impl Prediction {
    /// Create a prediction stamped with the current time
    pub fn new(
        label: Sentiment,
        probabilities: Probabilities,
        features: FeatureSnapshot,
        decided_by: DecisionSource,
    ) -> Self {
        Self {
            label,
            confidence: probabilities.max(),
            probabilities,
            features,
            decided_by,
            timestamp: Utc::now(),
        }
    }

    /// True when two predictions agree on everything except the timestamp
    pub fn same_outcome(&self, other: &Prediction) -> bool {
        self.label == other.label
            && self.probabilities == other.probabilities
            && self.features == other.features
            && self.decided_by == other.decided_by
    }
}

/// Inline error carried by a failed analysis record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: String,
    pub message: String,
}

impl From<&Error> for ErrorRecord {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Output record of a single or batch analysis.
///
/// Always well-formed: failures are reported through `error`, never raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Sentiment>,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Probabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<DecisionSource>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl AnalysisRecord {
    /// Record for a successful prediction
    pub fn from_prediction(text: impl Into<String>, prediction: Prediction) -> Self {
        Self {
            text: text.into(),
            label: Some(prediction.label),
            confidence: prediction.confidence,
            confidence_level: ConfidenceLevel::from_confidence(prediction.confidence),
            probabilities: Some(prediction.probabilities),
            features: Some(prediction.features),
            decided_by: Some(prediction.decided_by),
            timestamp: prediction.timestamp,
            error: None,
        }
    }

    /// Record for a failed analysis
    pub fn failure(text: impl Into<String>, err: &Error) -> Self {
        Self {
            text: text.into(),
            label: None,
            confidence: 0.0,
            confidence_level: ConfidenceLevel::Low,
            probabilities: None,
            features: None,
            decided_by: None,
            timestamp: Utc::now(),
            error: Some(ErrorRecord::from(err)),
        }
    }

    /// Whether the analysis succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
