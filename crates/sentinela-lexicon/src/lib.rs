//! Sentinela Lexicon
//!
//! Rule-free text analysis for short Spanish social-media comments.
//!
//! The pipeline has three stages, all pure functions of the input text:
//! - [`FeatureExtractor`]: raw signals read before any normalization (emoji,
//!   punctuation, casing, elongation)
//! - [`TextCleaner`]: idempotent normalization into a letter-only token stream
//! - [`LexicalScorer`]: negation-scoped word polarity, phrase scores and
//!   contextual pattern flags
//!
//! [`Featurizer`] runs all three and produces a named dense row.

pub mod cleaner;
pub mod context;
pub mod features;
pub mod lexicon;
pub mod raw;
pub mod scorer;
mod tables;

pub use cleaner::TextCleaner;
pub use context::ContextFlags;
pub use features::{Featurizer, TextFeatures};
pub use lexicon::{CueSet, Polarity, SentimentLexicon};
pub use raw::{FeatureExtractor, RawFeatures};
pub use scorer::{LengthBucket, LexicalFeatures, LexicalScorer, ScoredText};
