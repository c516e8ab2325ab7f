//! Sentinela Core
//!
//! Core types and errors shared across the Sentinela components.
//!
//! This crate provides:
//! - The three-class sentiment taxonomy and its canonical index order
//! - Probability triples with a fixed argmax tie-break
//! - Prediction and analysis records handed to collaborators
//! - The error taxonomy used by every component

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AnalysisRecord, ConfidenceLevel, DecisionSource, ErrorRecord, FeatureSnapshot, Prediction,
    Probabilities, Sentiment,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{AnalysisRecord, Prediction, Probabilities, Sentiment};
}
