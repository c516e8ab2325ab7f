//! Sentiment lexicon
//!
//! Fixed maps loaded once at startup and shared read-only by every component.

use aho_corasick::{AhoCorasick, MatchKind};
use sentinela_core::{Error, Result};
use std::collections::{HashMap, HashSet};

use crate::tables;

/// Polarity of a single token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Polarity {
    Positive(f64),
    Negative(f64),
}

/// A weighted multi-word phrase table with a compiled matcher
pub struct PhraseTable {
    matcher: AhoCorasick,
    weights: Vec<f64>,
}

impl PhraseTable {
    fn new(name: &str, entries: &[(&str, f64)]) -> Result<Self> {
        let (phrases, weights): (Vec<_>, Vec<_>) = entries.iter().copied().unzip();
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| Error::config(format!("Failed to build {name} phrase matcher: {e}")))?;
        Ok(Self { matcher, weights })
    }

    /// Sum of weights over every word-bounded occurrence
    pub fn score(&self, text: &str) -> f64 {
        self.matcher
            .find_overlapping_iter(text)
            .filter(|m| word_bounded(text, m.start(), m.end()))
            .map(|m| self.weights[m.pattern().as_usize()])
            .sum()
    }

    /// Whether any phrase occurs in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher
            .find_overlapping_iter(text)
            .any(|m| word_bounded(text, m.start(), m.end()))
    }
}

/// An unweighted set of cues, matched leftmost-longest
pub struct CueSet {
    matcher: AhoCorasick,
}

impl CueSet {
    /// Compile a cue set; `name` only labels build errors
    pub fn new(name: &str, cues: &[&str]) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(cues)
            .map_err(|e| Error::config(format!("Failed to build {name} matcher: {e}")))?;
        Ok(Self { matcher })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matches(text).next().is_some()
    }

    /// Number of word-bounded occurrences
    pub fn count(&self, text: &str) -> usize {
        self.matches(text).count()
    }

    /// Byte offset where the first occurrence ends
    pub fn first_match_end(&self, text: &str) -> Option<usize> {
        self.matches(text).next().map(|(_, end)| end)
    }

    fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.matcher
            .find_iter(text)
            .filter(move |m| word_bounded(text, m.start(), m.end()))
            .map(|m| (m.start(), m.end()))
    }
}

/// A match counts only when it does not sit inside a longer word.
///
/// Cues that begin or end with a symbol (emoji) are exempt on that side.
pub(crate) fn word_bounded(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let left_ok = match (matched.chars().next(), text[..start].chars().next_back()) {
        (Some(first), Some(before)) if first.is_alphanumeric() => !before.is_alphanumeric(),
        _ => true,
    };
    let right_ok = match (matched.chars().next_back(), text[end..].chars().next()) {
        (Some(last), Some(after)) if last.is_alphanumeric() => !after.is_alphanumeric(),
        _ => true,
    };
    left_ok && right_ok
}

/// Contextual vocabulary used by the pattern detectors
pub struct ContextVocabulary {
    pub exaggerated_positive: CueSet,
    pub contrastive: CueSet,
    pub rhetorical: CueSet,
    pub concession: CueSet,
    pub strong_positive: CueSet,
    pub laughing_emojis: CueSet,
    pub wait_complaints: CueSet,
    pub hedges: CueSet,
    pub best_tokens: HashSet<&'static str>,
    pub worst_tokens: HashSet<&'static str>,
    pub sarcastic_emoji: &'static str,
}

/// Fixed sentiment lexicon
pub struct SentimentLexicon {
    emoji_matcher: AhoCorasick,
    emoji_weights: Vec<f64>,
    positive: HashMap<&'static str, f64>,
    negative: HashMap<&'static str, f64>,
    slang: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    courtesy: HashSet<&'static str>,
    stopwords: HashSet<&'static str>,
    contractions: HashMap<&'static str, &'static str>,
    pub negative_patterns: PhraseTable,
    pub positive_patterns: PhraseTable,
    pub neutral_patterns: PhraseTable,
    pub context: ContextVocabulary,
}

impl SentimentLexicon {
    /// Build the built-in Spanish lexicon
    pub fn spanish() -> Result<Self> {
        let (emojis, emoji_weights): (Vec<_>, Vec<_>) = tables::EMOJIS.iter().copied().unzip();

        // Leftmost-longest so "❤️" wins over the bare "❤"
        let emoji_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&emojis)
            .map_err(|e| Error::config(format!("Failed to build emoji matcher: {e}")))?;

        let context = ContextVocabulary {
            exaggerated_positive: CueSet::new("exaggerated positive", tables::EXAGGERATED_POSITIVE)?,
            contrastive: CueSet::new("contrastive", tables::CONTRASTIVE)?,
            rhetorical: CueSet::new("rhetorical", tables::RHETORICAL)?,
            concession: CueSet::new("concession", tables::CONCESSION_MARKERS)?,
            strong_positive: CueSet::new("strong positive", tables::STRONG_POSITIVE_CUES)?,
            laughing_emojis: CueSet::new("laughing emoji", tables::LAUGHING_EMOJIS)?,
            wait_complaints: CueSet::new("wait complaint", tables::WAIT_COMPLAINTS)?,
            hedges: CueSet::new("hedge", tables::HEDGES)?,
            best_tokens: tables::BEST_TOKENS.iter().copied().collect(),
            worst_tokens: tables::WORST_TOKENS.iter().copied().collect(),
            sarcastic_emoji: tables::SARCASTIC_EMOJI,
        };

        Ok(Self {
            emoji_matcher,
            emoji_weights,
            positive: tables::POSITIVE_WORDS.iter().copied().collect(),
            negative: tables::NEGATIVE_WORDS.iter().copied().collect(),
            slang: tables::SLANG.iter().copied().collect(),
            intensifiers: tables::INTENSIFIERS.iter().copied().collect(),
            negations: tables::NEGATIONS.iter().copied().collect(),
            courtesy: tables::COURTESY.iter().copied().collect(),
            stopwords: tables::STOPWORDS.iter().copied().collect(),
            contractions: tables::CONTRACTIONS.iter().copied().collect(),
            negative_patterns: PhraseTable::new("negative", tables::NEGATIVE_PATTERNS)?,
            positive_patterns: PhraseTable::new("positive", tables::POSITIVE_PATTERNS)?,
            neutral_patterns: PhraseTable::new("neutral", tables::NEUTRAL_PATTERNS)?,
            context,
        })
    }

    /// Iterate emoji occurrences as (byte start, byte end, weight)
    pub fn emoji_matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (usize, usize, f64)> + 'a {
        self.emoji_matcher
            .find_iter(text)
            .map(|m| (m.start(), m.end(), self.emoji_weights[m.pattern().as_usize()]))
    }

    /// Polarity of a word or slang token
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        if let Some(&w) = self.positive.get(token) {
            return Some(Polarity::Positive(w));
        }
        if let Some(&w) = self.negative.get(token) {
            return Some(Polarity::Negative(w));
        }
        self.slang_weight(token).map(|w| {
            if w >= 0.0 {
                Polarity::Positive(w)
            } else {
                Polarity::Negative(-w)
            }
        })
    }

    /// Signed slang weight
    pub fn slang_weight(&self, token: &str) -> Option<f64> {
        self.slang.get(token).copied()
    }

    pub fn intensifier(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }

    pub fn is_courtesy(&self, token: &str) -> bool {
        self.courtesy.contains(token)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn expand_contraction(&self, token: &str) -> Option<&'static str> {
        self.contractions.get(token).copied()
    }

    /// Stop tokens, sorted for deterministic export
    pub fn stopwords(&self) -> Vec<String> {
        let mut words: Vec<String> = self.stopwords.iter().map(|s| s.to_string()).collect();
        words.sort();
        words
    }
}
