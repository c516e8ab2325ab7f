//! Raw, pre-cleaning signals
//!
//! Everything here is computed on the comment exactly as received, before any
//! normalization strips emoji, punctuation or casing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::lexicon::SentimentLexicon;

/// Raw signal vector of a comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeatures {
    pub emoji_score: f64,
    pub emoji_count: usize,
    pub positive_emoji_count: usize,
    pub negative_emoji_count: usize,
    /// positive minus negative emoji occurrences
    pub emoji_net_polarity: i64,
    pub distinct_emoji_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub ellipsis_count: usize,
    /// Share of uppercase letters among alphabetic characters
    pub uppercase_ratio: f64,
    pub all_caps_word_count: usize,
    pub elongation_count: usize,
    pub max_elongation: usize,
}

impl RawFeatures {
    /// Column names, in the order produced by [`RawFeatures::values`]
    pub const COLUMNS: [&'static str; 13] = [
        "raw_emoji_score",
        "raw_emoji_count",
        "raw_positive_emoji_count",
        "raw_negative_emoji_count",
        "raw_emoji_net_polarity",
        "raw_distinct_emoji_count",
        "raw_exclamation_count",
        "raw_question_count",
        "raw_ellipsis_count",
        "raw_uppercase_ratio",
        "raw_all_caps_word_count",
        "raw_elongation_count",
        "raw_max_elongation",
    ];

    pub fn values(&self) -> [f64; 13] {
        [
            self.emoji_score,
            self.emoji_count as f64,
            self.positive_emoji_count as f64,
            self.negative_emoji_count as f64,
            self.emoji_net_polarity as f64,
            self.distinct_emoji_count as f64,
            self.exclamation_count as f64,
            self.question_count as f64,
            self.ellipsis_count as f64,
            self.uppercase_ratio,
            self.all_caps_word_count as f64,
            self.elongation_count as f64,
            self.max_elongation as f64,
        ]
    }
}

/// Extracts [`RawFeatures`] from an uncleaned comment
#[derive(Clone)]
pub struct FeatureExtractor {
    lexicon: Arc<SentimentLexicon>,
}

impl FeatureExtractor {
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Self {
        Self { lexicon }
    }

    /// Extract raw signals. Unusable input yields the zero vector.
    pub fn extract(&self, text: &str) -> RawFeatures {
        if text.trim().is_empty() {
            return RawFeatures::default();
        }

        let mut features = RawFeatures::default();

        let mut distinct = HashSet::new();
        for (start, end, weight) in self.lexicon.emoji_matches(text) {
            features.emoji_count += 1;
            features.emoji_score += weight;
            if weight > 0.0 {
                features.positive_emoji_count += 1;
            } else if weight < 0.0 {
                features.negative_emoji_count += 1;
            }
            distinct.insert(&text[start..end]);
        }
        features.distinct_emoji_count = distinct.len();
        features.emoji_net_polarity =
            features.positive_emoji_count as i64 - features.negative_emoji_count as i64;

        features.exclamation_count = text.matches('!').count();
        features.question_count = text.matches('?').count();
        features.ellipsis_count = text.matches("...").count() + text.matches('…').count();

        let (upper, alpha) = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(u, a), c| (u + c.is_uppercase() as usize, a + 1));
        features.uppercase_ratio = if alpha == 0 {
            0.0
        } else {
            upper as f64 / alpha as f64
        };

        features.all_caps_word_count = text.split_whitespace().filter(|w| is_all_caps(w)).count();

        let (count, longest) = elongations(text);
        features.elongation_count = count;
        features.max_elongation = longest;

        features
    }
}

fn is_all_caps(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// Runs of 3+ identical non-whitespace characters: (number of runs, longest run)
fn elongations(text: &str) -> (usize, usize) {
    let mut count = 0;
    let mut longest = 0;
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    let mut close = |run: usize| {
        if run >= 3 {
            count += 1;
            longest = longest.max(run);
        }
    };

    for c in text.chars() {
        if Some(c) == prev && !c.is_whitespace() {
            run += 1;
        } else {
            close(run);
            run = 1;
            prev = Some(c);
        }
    }
    close(run);

    (count, longest)
}
