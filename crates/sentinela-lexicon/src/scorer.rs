//! Lexical scoring
//!
//! Cleans the comment and computes word-level polarity with negation scope and
//! intensifiers, plus phrase scores and contextual flags.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

use crate::cleaner::{TextCleaner, NEGATIVE_EMOJI_TOKEN, POSITIVE_EMOJI_TOKEN};
use crate::context::{flag, ContextFlags};
use crate::lexicon::{Polarity, SentimentLexicon};

/// Number of tokens after a negation whose polarity is inverted
pub const NEGATION_WINDOW: usize = 3;

/// Weight applied to a positive hit inside a negation window (counted as negative)
pub const NEGATED_POSITIVE_FACTOR: f64 = 1.5;

/// Weight applied to a negative hit inside a negation window (counted as positive)
pub const NEGATED_NEGATIVE_FACTOR: f64 = 0.8;

/// Lower bound on the denominator of the sentiment ratio
const RATIO_FLOOR: f64 = 0.1;

/// Word-count buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBucket {
    VeryShort,
    Short,
    Medium,
    Long,
    VeryLong,
}

impl LengthBucket {
    pub fn from_word_count(words: usize) -> Self {
        match words {
            0..=2 => Self::VeryShort,
            3..=5 => Self::Short,
            6..=15 => Self::Medium,
            16..=30 => Self::Long,
            _ => Self::VeryLong,
        }
    }
}

/// Lexical polarity and context features of a comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalFeatures {
    pub pos_word_score: f64,
    pub neg_word_score: f64,
    pub sentiment_diff: f64,
    /// `tanh(sentiment_diff / 10)`, always within [-1, 1]
    pub overall_sentiment: f64,
    pub sentiment_ratio: f64,
    /// Signed sum of slang contributions
    pub slang_score: f64,
    pub negation_count: usize,
    pub intensifier_count: usize,
    pub negated_positive_count: usize,
    pub negated_negative_count: usize,
    pub word_count: usize,
    pub char_count: usize,
    pub avg_word_length: f64,
    pub unique_word_ratio: f64,
    pub is_very_short: bool,
    pub is_short: bool,
    pub is_medium: bool,
    pub is_long: bool,
    pub is_very_long: bool,
    pub neg_pattern_score: f64,
    pub pos_pattern_score: f64,
    pub neu_pattern_score: f64,
    pub positive_emoji_tokens: usize,
    pub negative_emoji_tokens: usize,
    /// Occurrences of strong positive cues (used by the concession override)
    pub strong_positive_cues: usize,
    pub context: ContextFlags,
    pub is_simple_courtesy: bool,
}

impl LexicalFeatures {
    pub const COLUMNS: [&'static str; 26] = [
        "lex_pos_word_score",
        "lex_neg_word_score",
        "lex_sentiment_diff",
        "lex_overall_sentiment",
        "lex_sentiment_ratio",
        "lex_slang_score",
        "lex_negation_count",
        "lex_intensifier_count",
        "lex_negated_positive_count",
        "lex_negated_negative_count",
        "lex_word_count",
        "lex_char_count",
        "lex_avg_word_length",
        "lex_unique_word_ratio",
        "lex_is_very_short",
        "lex_is_short",
        "lex_is_medium",
        "lex_is_long",
        "lex_is_very_long",
        "lex_neg_pattern_score",
        "lex_pos_pattern_score",
        "lex_neu_pattern_score",
        "lex_positive_emoji_tokens",
        "lex_negative_emoji_tokens",
        "lex_strong_positive_cues",
        "lex_is_simple_courtesy",
    ];

    pub fn values(&self) -> [f64; 26] {
        [
            self.pos_word_score,
            self.neg_word_score,
            self.sentiment_diff,
            self.overall_sentiment,
            self.sentiment_ratio,
            self.slang_score,
            self.negation_count as f64,
            self.intensifier_count as f64,
            self.negated_positive_count as f64,
            self.negated_negative_count as f64,
            self.word_count as f64,
            self.char_count as f64,
            self.avg_word_length,
            self.unique_word_ratio,
            flag(self.is_very_short),
            flag(self.is_short),
            flag(self.is_medium),
            flag(self.is_long),
            flag(self.is_very_long),
            self.neg_pattern_score,
            self.pos_pattern_score,
            self.neu_pattern_score,
            self.positive_emoji_tokens as f64,
            self.negative_emoji_tokens as f64,
            self.strong_positive_cues as f64,
            flag(self.is_simple_courtesy),
        ]
    }

    /// Zero vector tagged as a simple courtesy
    pub fn courtesy() -> Self {
        Self {
            is_simple_courtesy: true,
            ..Self::default()
        }
    }

    pub fn length_bucket(&self) -> LengthBucket {
        LengthBucket::from_word_count(self.word_count)
    }
}

/// Output of [`LexicalScorer::score`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredText {
    pub cleaned: String,
    pub features: LexicalFeatures,
}

/// Computes [`LexicalFeatures`] for a raw comment
#[derive(Clone)]
pub struct LexicalScorer {
    lexicon: Arc<SentimentLexicon>,
    cleaner: TextCleaner,
}

impl LexicalScorer {
    pub fn new(lexicon: Arc<SentimentLexicon>, cleaner: TextCleaner) -> Self {
        Self { lexicon, cleaner }
    }

    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// True for one or two tokens that are all acknowledgements, or any single
    /// token of at most five characters
    pub fn is_simple_courtesy(&self, text: &str) -> bool {
        let tokens = self.cleaner.courtesy_tokens(text);
        match tokens.len() {
            1 | 2 => {
                tokens.iter().all(|t| self.lexicon.is_courtesy(t))
                    || (tokens.len() == 1 && tokens[0].chars().count() <= 5)
            }
            _ => false,
        }
    }

    pub fn score(&self, text: &str) -> ScoredText {
        let cleaned = self.cleaner.clean(text);

        if self.is_simple_courtesy(text) {
            trace!(text, "courtesy shortcut");
            return ScoredText {
                cleaned,
                features: LexicalFeatures::courtesy(),
            };
        }

        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let mut features = self.score_tokens(&tokens);

        let word_count = tokens.len();
        features.word_count = word_count;
        features.char_count = text.trim().chars().count();
        if word_count > 0 {
            let letters: usize = tokens.iter().map(|t| t.chars().count()).sum();
            features.avg_word_length = letters as f64 / word_count as f64;
            let unique: HashSet<&str> = tokens.iter().copied().collect();
            features.unique_word_ratio = unique.len() as f64 / word_count as f64;
        }

        match LengthBucket::from_word_count(word_count) {
            LengthBucket::VeryShort => features.is_very_short = true,
            LengthBucket::Short => features.is_short = true,
            LengthBucket::Medium => features.is_medium = true,
            LengthBucket::Long => features.is_long = true,
            LengthBucket::VeryLong => features.is_very_long = true,
        }

        let lowered = text.to_lowercase();
        features.neg_pattern_score = self.lexicon.negative_patterns.score(&lowered);
        features.pos_pattern_score = self.lexicon.positive_patterns.score(&lowered);
        features.neu_pattern_score = self.lexicon.neutral_patterns.score(&lowered);
        features.strong_positive_cues = self.lexicon.context.strong_positive.count(&lowered);
        features.context = ContextFlags::detect(&self.lexicon, &lowered, &tokens);

        ScoredText { cleaned, features }
    }

    /// Negation-scoped polarity accumulation over cleaned tokens
    fn score_tokens(&self, tokens: &[&str]) -> LexicalFeatures {
        let mut f = LexicalFeatures::default();
        let mut window = 0usize;
        let mut pending: Option<f64> = None;

        for &token in tokens {
            let multiplier = pending.take().unwrap_or(1.0);

            if token == POSITIVE_EMOJI_TOKEN {
                f.positive_emoji_tokens += 1;
            } else if token == NEGATIVE_EMOJI_TOKEN {
                f.negative_emoji_tokens += 1;
            }

            if self.lexicon.is_negation(token) {
                f.negation_count += 1;
                window = NEGATION_WINDOW;
                continue;
            }

            if let Some(boost) = self.lexicon.intensifier(token) {
                f.intensifier_count += 1;
                pending = Some(boost);
                window = window.saturating_sub(1);
                continue;
            }

            if let Some(polarity) = self.lexicon.polarity(token) {
                let negated = window > 0;
                match polarity {
                    Polarity::Positive(weight) if negated => {
                        f.neg_word_score += weight * multiplier * NEGATED_POSITIVE_FACTOR;
                        f.negated_positive_count += 1;
                    }
                    Polarity::Positive(weight) => f.pos_word_score += weight * multiplier,
                    Polarity::Negative(weight) if negated => {
                        f.pos_word_score += weight * multiplier * NEGATED_NEGATIVE_FACTOR;
                        f.negated_negative_count += 1;
                    }
                    Polarity::Negative(weight) => f.neg_word_score += weight * multiplier,
                }
                if let Some(slang) = self.lexicon.slang_weight(token) {
                    let signed = if negated { -slang } else { slang };
                    f.slang_score += signed * multiplier;
                }
            }

            window = window.saturating_sub(1);
        }

        f.sentiment_diff = f.pos_word_score - f.neg_word_score;
        f.overall_sentiment = (f.sentiment_diff / 10.0).tanh();
        f.sentiment_ratio = f.pos_word_score / f.neg_word_score.max(RATIO_FLOOR);
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexicalScorer {
        let lexicon = Arc::new(SentimentLexicon::spanish().unwrap());
        let cleaner = TextCleaner::new(lexicon.clone()).unwrap();
        LexicalScorer::new(lexicon, cleaner)
    }

    #[test]
    fn test_courtesy_shortcut() {
        let scorer = scorer();
        for text in ["Gracias", "gracias!!", "Muchas gracias 🙏", "ok", "Hola"] {
            let scored = scorer.score(text);
            assert!(scored.features.is_simple_courtesy, "{text}");
            assert_eq!(scored.features.sentiment_diff, 0.0);
        }
        assert!(!scorer.score("Excelente universidad").features.is_simple_courtesy);
        assert!(!scorer.score("gracias por nada, pésimo").features.is_simple_courtesy);
    }

    #[test]
    fn test_plain_polarity() {
        let scorer = scorer();
        let pos = scorer.score("Excelente universidad").features;
        assert!((pos.pos_word_score - 3.0).abs() < 1e-9);
        assert!(pos.sentiment_diff > 0.0);

        let neg = scorer.score("Pésimo servicio").features;
        assert!((neg.neg_word_score - 3.0).abs() < 1e-9);
        assert!(neg.sentiment_diff < 0.0);
    }

    #[test]
    fn test_negation_inverts_direction() {
        let scorer = scorer();
        let negated = scorer.score("no es bueno el servicio").features;
        assert!((negated.neg_word_score - 1.5 * 1.5).abs() < 1e-9);
        assert_eq!(negated.negated_positive_count, 1);
        assert!(negated.sentiment_diff < 0.0);

        let negated = scorer.score("no es malo el servicio").features;
        assert!((negated.pos_word_score - 2.0 * 0.8).abs() < 1e-9);
        assert!(negated.sentiment_diff > 0.0);
    }

    #[test]
    fn test_negation_window_closes() {
        let features = scorer().score("no vine ayer ni hoy pero excelente").features;
        // "ni" reopens the window; "excelente" is the 3rd token after it
        assert_eq!(features.negated_positive_count, 1);

        let features = scorer().score("no vine ayer tarde pero excelente clase").features;
        assert_eq!(features.negated_positive_count, 0);
        assert!((features.pos_word_score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_applies_to_next_hit_only() {
        let scorer = scorer();
        let boosted = scorer.score("la clase es muy buena").features;
        assert!((boosted.pos_word_score - 1.5 * 1.5).abs() < 1e-9);
        assert_eq!(boosted.intensifier_count, 1);

        let dangling = scorer.score("muy temprano pero buena clase").features;
        assert!((dangling.pos_word_score - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_overall_sentiment_bounded() {
        let features = scorer()
            .score("excelente excelente excelente excelente excelente excelente genial")
            .features;
        assert!(features.overall_sentiment > 0.9);
        assert!(features.overall_sentiment <= 1.0);
    }

    #[test]
    fn test_length_buckets() {
        let scorer = scorer();
        assert!(scorer.score("excelente universidad").features.is_very_short);
        assert!(scorer.score("la universidad es excelente").features.is_short);
        assert_eq!(LengthBucket::from_word_count(40), LengthBucket::VeryLong);
    }

    #[test]
    fn test_slang_is_signed() {
        let features = scorer().score("qué roche la cola").features;
        assert!(features.slang_score < 0.0);
        assert!(features.neg_word_score > 0.0);
    }
}
