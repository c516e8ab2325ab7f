//! Dense feature assembly
//!
//! Raw signals, lexical scores and context flags are flattened into one named
//! dense row. Column names are persisted with the trained artifact so that
//! inference can align by name.

use sentinela_core::{FeatureSnapshot, Result};
use std::sync::Arc;

use crate::cleaner::TextCleaner;
use crate::context::ContextFlags;
use crate::lexicon::SentimentLexicon;
use crate::raw::{FeatureExtractor, RawFeatures};
use crate::scorer::{LexicalFeatures, LexicalScorer};

/// Everything derived from one comment before vectorization
#[derive(Debug, Clone, PartialEq)]
pub struct TextFeatures {
    pub cleaned: String,
    pub raw: RawFeatures,
    pub lexical: LexicalFeatures,
}

impl TextFeatures {
    /// Dense column names in row order
    pub fn columns() -> Vec<String> {
        RawFeatures::COLUMNS
            .iter()
            .chain(LexicalFeatures::COLUMNS.iter())
            .chain(ContextFlags::COLUMNS.iter())
            .map(|c| c.to_string())
            .collect()
    }

    /// Dense row matching [`TextFeatures::columns`]
    pub fn dense(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(
            RawFeatures::COLUMNS.len() + LexicalFeatures::COLUMNS.len() + ContextFlags::COLUMNS.len(),
        );
        row.extend_from_slice(&self.raw.values());
        row.extend_from_slice(&self.lexical.values());
        row.extend_from_slice(&self.lexical.context.values());
        row
    }

    /// Value of one named column
    pub fn value(&self, column: &str) -> Option<f64> {
        let position = RawFeatures::COLUMNS
            .iter()
            .chain(LexicalFeatures::COLUMNS.iter())
            .chain(ContextFlags::COLUMNS.iter())
            .position(|c| *c == column)?;
        self.dense().get(position).copied()
    }

    /// Features reported alongside a prediction
    pub fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            emoji_score: self.raw.emoji_score,
            pos_word_score: self.lexical.pos_word_score,
            neg_word_score: self.lexical.neg_word_score,
            sentiment_diff: self.lexical.sentiment_diff,
            overall_sentiment: self.lexical.overall_sentiment,
            word_count: self.lexical.word_count,
            char_count: self.lexical.char_count,
            is_simple_courtesy: self.lexical.is_simple_courtesy,
        }
    }
}

/// Runs raw extraction and lexical scoring over a comment
#[derive(Clone)]
pub struct Featurizer {
    lexicon: Arc<SentimentLexicon>,
    extractor: FeatureExtractor,
    scorer: LexicalScorer,
}

impl Featurizer {
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Result<Self> {
        let cleaner = TextCleaner::new(lexicon.clone())?;
        Ok(Self {
            extractor: FeatureExtractor::new(lexicon.clone()),
            scorer: LexicalScorer::new(lexicon.clone(), cleaner),
            lexicon,
        })
    }

    /// Featurizer over the built-in Spanish lexicon
    pub fn spanish() -> Result<Self> {
        Self::new(Arc::new(SentimentLexicon::spanish()?))
    }

    pub fn lexicon(&self) -> &Arc<SentimentLexicon> {
        &self.lexicon
    }

    pub fn scorer(&self) -> &LexicalScorer {
        &self.scorer
    }

    pub fn featurize(&self, text: &str) -> TextFeatures {
        let raw = self.extractor.extract(text);
        let scored = self.scorer.score(text);
        TextFeatures {
            cleaned: scored.cleaned,
            raw,
            lexical: scored.features,
        }
    }
}
