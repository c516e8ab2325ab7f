//! Rule trait and evaluation context

use sentinela_core::{Probabilities, Sentiment};
use sentinela_lexicon::{LexicalFeatures, SentimentLexicon};

/// Everything a rule may inspect for one comment
pub struct RuleContext<'a> {
    /// Raw comment
    pub text: &'a str,
    /// Lowercased raw comment
    pub lowered: String,
    /// Ensemble output
    pub probabilities: &'a Probabilities,
    pub features: &'a LexicalFeatures,
    pub lexicon: &'a SentimentLexicon,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        text: &'a str,
        probabilities: &'a Probabilities,
        features: &'a LexicalFeatures,
        lexicon: &'a SentimentLexicon,
    ) -> Self {
        Self {
            text,
            lowered: text.to_lowercase(),
            probabilities,
            features,
            lexicon,
        }
    }

    /// Whitespace tokens of the raw comment
    pub fn token_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether a lexicon emoji with weight at or above `min` occurs
    pub fn has_emoji_at_least(&self, min: f64) -> bool {
        self.lexicon.emoji_matches(self.text).any(|(_, _, w)| w >= min)
    }

    /// Whether a lexicon emoji with weight at or below `max` occurs
    pub fn has_emoji_at_most(&self, max: f64) -> bool {
        self.lexicon.emoji_matches(self.text).any(|(_, _, w)| w <= max)
    }

    pub fn is_question(&self) -> bool {
        self.text.contains('?') || self.text.contains('¿')
    }
}

/// One step of the overlay: a pure function from context to an optional label.
///
/// Rules are evaluated in order and the first `Some` wins.
pub trait Rule: Send + Sync {
    /// Stable name recorded in the decision trace
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment>;
}
