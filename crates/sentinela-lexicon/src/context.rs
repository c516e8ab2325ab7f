//! Contextual pattern detectors
//!
//! Each detector is independent and reads the lowercased, uncleaned comment so
//! that emoji and punctuation are still visible.

use serde::{Deserialize, Serialize};

use crate::lexicon::SentimentLexicon;

/// Boolean context flags attached to the lexical feature set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFlags {
    /// Exaggerated positive idiom next to a contrastive conjunction
    pub irony_indicator: bool,
    pub rhetorical_question: bool,
    /// Concession marker followed later by a strong positive cue
    pub has_positive_despite_context: bool,
    /// Laughing emoji together with queue or wait complaints
    pub has_ironic_laugh_complaint: bool,
    /// Both a "best" and a "worst" token
    pub has_oxymoron_pattern: bool,
    pub has_uncertainty_expression: bool,
    pub has_sarcastic_emoji: bool,
}

impl ContextFlags {
    pub const COLUMNS: [&'static str; 7] = [
        "ctx_irony_indicator",
        "ctx_rhetorical_question",
        "ctx_positive_despite",
        "ctx_ironic_laugh_complaint",
        "ctx_oxymoron",
        "ctx_uncertainty",
        "ctx_sarcastic_emoji",
    ];

    pub fn values(&self) -> [f64; 7] {
        [
            flag(self.irony_indicator),
            flag(self.rhetorical_question),
            flag(self.has_positive_despite_context),
            flag(self.has_ironic_laugh_complaint),
            flag(self.has_oxymoron_pattern),
            flag(self.has_uncertainty_expression),
            flag(self.has_sarcastic_emoji),
        ]
    }

    /// Run every detector.
    ///
    /// `lowered` is the lowercased raw comment, `tokens` the cleaned tokens.
    pub fn detect(lexicon: &SentimentLexicon, lowered: &str, tokens: &[&str]) -> Self {
        let vocab = &lexicon.context;

        let has_positive_despite_context = vocab
            .concession
            .first_match_end(lowered)
            .map(|end| vocab.strong_positive.is_match(&lowered[end..]))
            .unwrap_or(false);

        let has_best = tokens.iter().any(|t| vocab.best_tokens.contains(*t));
        let has_worst = tokens.iter().any(|t| vocab.worst_tokens.contains(*t));

        Self {
            irony_indicator: vocab.exaggerated_positive.is_match(lowered)
                && vocab.contrastive.is_match(lowered),
            rhetorical_question: lowered.contains('?') && vocab.rhetorical.is_match(lowered),
            has_positive_despite_context,
            has_ironic_laugh_complaint: vocab.laughing_emojis.is_match(lowered)
                && vocab.wait_complaints.is_match(lowered),
            has_oxymoron_pattern: has_best && has_worst,
            has_uncertainty_expression: vocab.hedges.is_match(lowered),
            has_sarcastic_emoji: lowered.contains(vocab.sarcastic_emoji),
        }
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
