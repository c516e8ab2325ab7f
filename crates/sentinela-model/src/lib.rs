//! Sentinela Model
//!
//! Statistical half of the hybrid classifier. Cleaned text is turned into a
//! uni+bi-gram TF-IDF block, fused with the scaled dense lexical features and
//! scored by a soft-voting ensemble of:
//! - a bagged random forest
//! - softmax gradient boosting
//! - multinomial logistic regression
//!
//! Training uses a stratified split, balanced class weights and synthetic
//! minority oversampling on the training rows only. The result is a
//! [`ModelArtifact`] that can be saved, loaded and shared read-only.

pub mod artifact;
pub mod boosting;
pub mod config;
pub mod ensemble;
pub mod forest;
pub mod linear;
pub mod metrics;
pub mod sampling;
pub mod scaler;
pub mod trainer;
pub mod tree;
pub mod vectorizer;

pub use artifact::{ClassCount, ModelArtifact, TrainingMetadata, ARTIFACT_VERSION};
pub use config::{BoostingConfig, ForestConfig, LinearConfig, SmoteConfig, TfidfConfig, TrainingConfig};
pub use ensemble::VotingEnsemble;
pub use metrics::{ClassMetrics, ClassificationReport};
pub use trainer::{Trainer, TrainingSet};
pub use vectorizer::TfidfVectorizer;
